use chrono::NaiveDate;
use regex::Regex;

/// a date recovered from a movement line, plus the exact substring it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub matched: String,
}

/// Recovers an effective date from free text.
///
/// Two patterns are tried in order, first match wins:
/// 1. ISO-like `YYYY-M-D`, read unambiguously as year/month/day.
/// 2. Slashed `a/b/YYYY`, where the day/month reading is resolved by the
///    component values and, when both are <= 12, by scanning the line for
///    English-specific keywords (US month-first convention when present).
pub struct DateExtractor {
    iso: Regex,
    slashed: Regex,
    english_hint: Regex,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            // unanchored: the date may be embedded in arbitrary text, even
            // flush against word characters; component validation rejects
            // the false positives
            iso: Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").unwrap(),
            slashed: Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap(),
            english_hint: Regex::new(
                r"(?i)\b(settled|received|renewal|agreement|disbursed|daily|weekly|monthly)\b",
            )
            .unwrap(),
        }
    }

    /// extract the first date in the line, or None if no pattern matches or
    /// the matched components form no valid calendar date
    pub fn extract(&self, line: &str) -> Option<DateMatch> {
        if let Some(caps) = self.iso.captures(line) {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            return Some(DateMatch {
                date,
                matched: caps[0].to_string(),
            });
        }

        let caps = self.slashed.captures(line)?;
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;

        let (day, month) = if first > 12 {
            // first component cannot be a month
            (first, second)
        } else if second > 12 {
            // second component cannot be a month
            (second, first)
        } else if self.english_hint.is_match(line) {
            // ambiguous, English wording implies month/day/year
            (second, first)
        } else {
            (first, second)
        };

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(DateMatch {
            date,
            matched: caps[0].to_string(),
        })
    }
}

impl Default for DateExtractor {
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
    fn test_iso_date_recovered_regardless_of_surrounding_text() {
        let ex = DateExtractor::new();
        let m = ex.extract("snapshot 2024-03-01: Capital R$ 500.00 liberado").unwrap();
        assert_eq!(m.date, d(2024, 3, 1));
        assert_eq!(m.matched, "2024-03-01");

        let m = ex.extract("x2024-12-31y").unwrap();
        assert_eq!(m.date, d(2024, 12, 31));

        // flush against word characters on both sides
        let m = ex.extract("ref#A2024-12-31B balance").unwrap();
        assert_eq!(m.date, d(2024, 12, 31));
        assert_eq!(m.matched, "2024-12-31");
    }

    #[test]
    fn test_iso_takes_priority_over_slashed() {
        let ex = DateExtractor::new();
        let m = ex.extract("2024-06-05 backfill of 01/02/2023").unwrap();
        assert_eq!(m.date, d(2024, 6, 5));
    }

    #[test]
    fn test_first_component_over_twelve_is_day() {
        let ex = DateExtractor::new();
        // English keyword present, but 15 can only be a day
        let m = ex.extract("Renewal 15/04/2024").unwrap();
        assert_eq!(m.date, d(2024, 4, 15));
    }

    #[test]
    fn test_second_component_over_twelve_is_day() {
        let ex = DateExtractor::new();
        let m = ex.extract("Renovação 04/15/2024").unwrap();
        assert_eq!(m.date, d(2024, 4, 15));
    }

    #[test]
    fn test_ambiguous_date_with_english_keyword_is_month_first() {
        let ex = DateExtractor::new();
        // month/day/year: February 5th
        let m = ex.extract("Renewal 02/05/2024 - Interest $ 50.00").unwrap();
        assert_eq!(m.date, d(2024, 2, 5));
    }

    #[test]
    fn test_ambiguous_date_without_english_keyword_is_day_first() {
        let ex = DateExtractor::new();
        // day/month/year: May 2nd
        let m = ex.extract("Renovação 02/05/2024 - Juros R$ 50.00").unwrap();
        assert_eq!(m.date, d(2024, 5, 2));
    }

    #[test]
    fn test_keyword_scan_is_case_insensitive() {
        let ex = DateExtractor::new();
        let m = ex.extract("02/05/2024: SETTLED - Total $ 550.00").unwrap();
        assert_eq!(m.date, d(2024, 2, 5));
    }

    #[test]
    fn test_disbursed_counts_as_english_hint() {
        let ex = DateExtractor::new();
        let m = ex.extract("04/01/2024: Capital $ 500.00 disbursed").unwrap();
        assert_eq!(m.date, d(2024, 4, 1));
    }

    #[test]
    fn test_invalid_calendar_date_yields_none() {
        let ex = DateExtractor::new();
        assert!(ex.extract("31/02/2024: Recebido R$ 100.00").is_none());
        assert!(ex.extract("2024-02-31 snapshot").is_none());
    }

    #[test]
    fn test_no_date_yields_none() {
        let ex = DateExtractor::new();
        assert!(ex.extract("Recebido R$ 100.00").is_none());
        assert!(ex.extract("Parcela 2/4 sem data").is_none());
    }

    #[test]
    fn test_installment_counter_is_not_a_date() {
        let ex = DateExtractor::new();
        // 2/4 lacks a 4-digit year and must not be read as a date
        let m = ex.extract("01/06/2024: Parcela 2/4 Recebido R$ 240.00").unwrap();
        assert_eq!(m.date, d(2024, 6, 1));
    }
}
