use regex::Regex;

use crate::decimal::Money;

/// labels under which sub-amounts are written into movement lines
pub const CAPITAL_LABELS: &[&str] = &["capital"];
pub const INTEREST_LABELS: &[&str] = &["juros", "interest", "interés", "interes"];
pub const PENALTY_LABELS: &[&str] = &["multa", "penalty"];

/// Recovers currency-marked amounts from free text.
///
/// An amount is a `R$` or `$` marker, an optional space, and a digit-and-dot
/// run. Lines without a marked amount contribute zero and are excluded from
/// financial totals.
pub struct AmountExtractor {
    amount: Regex,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            amount: Regex::new(r"(?i)(?:R\$|\$) ?([0-9]+(?:\.[0-9]+)?)").unwrap(),
        }
    }

    /// first currency-marked amount in the line, or None
    pub fn extract(&self, line: &str) -> Option<Money> {
        let caps = self.amount.captures(line)?;
        Money::from_str_exact(&caps[1]).ok()
    }

    /// first currency-marked amount appearing after any of the given labels
    ///
    /// Used by the reporting pass to split a receipt into its labeled
    /// capital/interest/penalty portions.
    pub fn labeled(&self, line: &str, labels: &[&str]) -> Option<Money> {
        let lowered = line.to_lowercase();
        let pos = labels
            .iter()
            .filter_map(|label| lowered.find(label).map(|p| p + label.len()))
            .min()?;
        self.extract(&lowered[pos..])
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}
