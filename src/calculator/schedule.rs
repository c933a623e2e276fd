use chrono::{Datelike, Duration, NaiveDate};

use crate::types::PeriodUnit;

/// Advance a due date by one period.
///
/// Always advances from the given (current) due date; never from the payment
/// date, so a late payment does not shift the schedule.
pub fn advance_due_date(due_date: NaiveDate, unit: PeriodUnit) -> NaiveDate {
    match unit {
        PeriodUnit::Month => add_one_month(due_date),
        PeriodUnit::Week => due_date + Duration::days(7),
        PeriodUnit::Day => due_date + Duration::days(1),
    }
}

/// one calendar month later, day-of-month clamped to the target month length
fn add_one_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(days_in_month(year, month));
    // year/month/clamped day is always a valid date
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
