pub mod amount;
pub mod category;
pub mod date;

use chrono::NaiveDate;

use crate::decimal::Money;
use crate::types::MovementKind;

pub use amount::{AmountExtractor, CAPITAL_LABELS, INTEREST_LABELS, PENALTY_LABELS};
pub use date::{DateExtractor, DateMatch};

/// structured fields recovered from one free-text movement line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMovement {
    /// effective date, None when no date pattern matched
    pub date: Option<NaiveDate>,
    /// first currency-marked amount, zero when absent
    pub amount: Money,
    /// operation category, None when no keyword set matched
    pub kind: Option<MovementKind>,
    /// whether the line represents money actually received
    pub is_cash_event: bool,
    /// exact date substring the extraction matched, for display/debugging
    pub raw_match: Option<String>,
}

impl ParsedMovement {
    /// a line contributes financial data only when both a date and a
    /// currency-marked amount were recovered
    pub fn contributes(&self) -> bool {
        self.date.is_some() && !self.amount.is_zero()
    }
}

/// Heuristic parser recovering date, amount and category from the free-text
/// movement lines a contract durably stores.
///
/// Parsing is a pure function of the line: ambiguity in slashed dates is
/// resolved by the English-keyword scan in [`date::DateExtractor`], never by
/// ambient session state. Unparseable fields degrade to None/zero rather than
/// erroring; callers treat such lines as non-contributing.
pub struct LedgerLineParser {
    dates: DateExtractor,
    amounts: AmountExtractor,
}

impl LedgerLineParser {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            amounts: AmountExtractor::new(),
        }
    }

    /// parse one movement line
    pub fn parse(&self, line: &str) -> ParsedMovement {
        let date_match = self.dates.extract(line);
        let amount = self.amounts.extract(line).unwrap_or(Money::ZERO);
        let kind = category::classify(line);
        let is_cash_event = kind.map_or(false, |k| k.is_cash_event()) && !amount.is_zero();

        let (date, raw_match) = match date_match {
            Some(m) => (Some(m.date), Some(m.matched)),
            None => (None, None),
        };

        ParsedMovement {
            date,
            amount,
            kind,
            is_cash_event,
            raw_match,
        }
    }

    /// labeled sub-amount lookup, used by the reporting pass to split totals
    pub fn labeled_amount(&self, line: &str, labels: &[&str]) -> Option<Money> {
        self.amounts.labeled(line, labels)
    }
}

impl Default for LedgerLineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_full_portuguese_installment_line() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("01/06/2024: Parcela 2/4 Recebido R$ 240.00 + Multa R$ 5.00");

        assert_eq!(parsed.date, Some(d(2024, 6, 1)));
        assert_eq!(parsed.amount, Money::from_major(240));
        assert_eq!(parsed.kind, Some(MovementKind::Installment));
        assert!(parsed.is_cash_event);
        assert_eq!(parsed.raw_match.as_deref(), Some("01/06/2024"));
        assert!(parsed.contributes());
    }

    #[test]
    fn test_english_renewal_line_uses_us_date_order() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("04/01/2024: Renewal - Interest $ 50.00");

        assert_eq!(parsed.date, Some(d(2024, 4, 1)));
        assert_eq!(parsed.amount, Money::from_major(50));
        assert_eq!(parsed.kind, Some(MovementKind::Renewal));
        assert!(parsed.is_cash_event);
    }

    #[test]
    fn test_agreement_is_not_a_cash_event() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("01/07/2024: Acordo - R$ 600.00 em 6x");

        assert_eq!(parsed.kind, Some(MovementKind::Agreement));
        assert!(!parsed.is_cash_event);
        assert!(parsed.contributes()); // has date and amount, just not cash
    }

    #[test]
    fn test_disbursement_is_not_a_cash_event() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("01/03/2024: Capital R$ 500.00 liberado");

        assert_eq!(parsed.kind, Some(MovementKind::Disbursement));
        assert!(!parsed.is_cash_event);
    }

    #[test]
    fn test_dateless_line_degrades_without_error() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("Recebido R$ 100.00");

        assert_eq!(parsed.date, None);
        assert_eq!(parsed.amount, Money::from_major(100));
        assert!(!parsed.contributes());
        // still recognizable as a receipt for raw history displays
        assert_eq!(parsed.kind, Some(MovementKind::Installment));
    }

    #[test]
    fn test_amountless_line_is_excluded_from_cash() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("01/06/2024: Recebido em mãos");

        assert_eq!(parsed.amount, Money::ZERO);
        assert!(!parsed.is_cash_event);
        assert!(!parsed.contributes());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = LedgerLineParser::new();
        let line = "10/06/2024: QUITADO - Total R$ 552.50 + Multa R$ 2.50";
        assert_eq!(parser.parse(line), parser.parse(line));
    }

    #[test]
    fn test_generated_lines_round_trip_for_every_kind_and_locale() {
        use crate::movement::Movement;
        use crate::types::Locale;

        let parser = LedgerLineParser::new();
        // readable either way around, so the hint ladder decides
        let date = d(2024, 4, 1);
        let amount = Money::from_major(500);

        for locale in [Locale::Portuguese, Locale::English, Locale::Spanish] {
            let cases = [
                (
                    Movement::Disbursement { date, amount },
                    MovementKind::Disbursement,
                ),
                (
                    Movement::Renewal { date, interest: amount, penalty: Money::ZERO },
                    MovementKind::Renewal,
                ),
                (
                    Movement::Installment {
                        date,
                        number: 1,
                        total: 4,
                        amount,
                        penalty: Money::ZERO,
                    },
                    MovementKind::Installment,
                ),
                (
                    Movement::Settlement { date, total: amount, penalty: Money::ZERO },
                    MovementKind::Settlement,
                ),
                (
                    Movement::Agreement { date, total: amount, installments: 4 },
                    MovementKind::Agreement,
                ),
            ];

            for (movement, kind) in cases {
                let line = movement.to_line(locale);
                let parsed = parser.parse(&line);
                assert_eq!(parsed.date, Some(date), "line: {line}");
                assert_eq!(parsed.amount, amount, "line: {line}");
                assert_eq!(parsed.kind, Some(kind), "line: {line}");
            }
        }
    }

    #[test]
    fn test_iso_date_inside_noise() {
        let parser = LedgerLineParser::new();
        let parsed = parser.parse("ajuste 2024-11-30 Recebido R$ 75.25 manual");
        assert_eq!(parsed.date, Some(d(2024, 11, 30)));
        assert_eq!(parsed.amount, Money::from_str_exact("75.25").unwrap());
    }
}
