use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::Money;

/// late-payment penalty result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyCalculation {
    pub penalty_amount: Money,
    pub days_late: u32,
    pub penalty_per_day: Money,
}

impl PenaltyCalculation {
    pub fn none(penalty_per_day: Money) -> Self {
        Self {
            penalty_amount: Money::ZERO,
            days_late: 0,
            penalty_per_day,
        }
    }
}

/// Accrue the per-day late fee between a due date and a payment date.
///
/// Both sides are calendar dates (already truncated to midnight), so the day
/// count is exact: a payment on the due date is zero days late, one day after
/// is exactly one. No penalty accrues unless a positive per-day fee is
/// configured and the payment lands strictly after the due date.
pub fn late_penalty(
    penalty_per_day: Money,
    due_date: NaiveDate,
    payment_date: NaiveDate,
) -> PenaltyCalculation {
    if !penalty_per_day.is_positive() || payment_date <= due_date {
        return PenaltyCalculation::none(penalty_per_day);
    }

    let days_late = (payment_date - due_date).num_days() as u32;
    let penalty_amount = penalty_per_day * Decimal::from(days_late);

    PenaltyCalculation {
        penalty_amount,
        days_late,
        penalty_per_day,
    }
}
