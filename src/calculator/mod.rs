pub mod penalty;
pub mod schedule;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{InstallmentPlan, PeriodUnit};

pub use penalty::{late_penalty, PenaltyCalculation};
pub use schedule::advance_due_date;

/// monetary shape of a renewal at the moment it happens
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalCalculation {
    pub interest: Money,
    pub penalty: PenaltyCalculation,
    pub next_due_date: NaiveDate,
}

/// Interest for one period plus any late penalty; the next due date advances
/// from the current due date by one period, regardless of when the payment
/// actually arrived.
pub fn compute_renewal(
    principal: Money,
    rate: Rate,
    penalty_per_day: Money,
    due_date: NaiveDate,
    payment_date: NaiveDate,
    unit: PeriodUnit,
) -> RenewalCalculation {
    RenewalCalculation {
        interest: principal.percentage(rate),
        penalty: late_penalty(penalty_per_day, due_date, payment_date),
        next_due_date: advance_due_date(due_date, unit),
    }
}

/// monetary shape of a full payoff
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementCalculation {
    pub interest: Money,
    pub penalty: PenaltyCalculation,
    pub total_due: Money,
}

/// Interest and penalty exactly as for a renewal, plus the remaining
/// principal, collected in one receipt.
pub fn compute_settlement(
    principal: Money,
    rate: Rate,
    penalty_per_day: Money,
    due_date: NaiveDate,
    payment_date: NaiveDate,
) -> SettlementCalculation {
    let interest = principal.percentage(rate);
    let penalty = late_penalty(penalty_per_day, due_date, payment_date);

    SettlementCalculation {
        interest,
        penalty,
        total_due: principal + interest + penalty.penalty_amount,
    }
}

/// Split a principal plus one application of the rate into equal periodic
/// installments.
///
/// The interest portion is fixed here, at plan creation, and never
/// recomputed; late payments only ever add a penalty on top.
pub fn installment_plan(
    principal: Money,
    rate: Rate,
    period_count: u32,
    period: PeriodUnit,
) -> Result<InstallmentPlan> {
    if period_count == 0 {
        return Err(LedgerError::InvalidPeriodCount { count: period_count });
    }

    let periods = Decimal::from(period_count);
    let total_interest = principal.percentage(rate);
    let total_with_interest = principal + total_interest;

    Ok(InstallmentPlan {
        total_installments: period_count,
        installments_paid: 0,
        per_installment: total_with_interest / periods,
        interest_per_installment: total_interest / periods,
        period,
    })
}

/// monetary shape of one installment receipt
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPayment {
    pub penalty: PenaltyCalculation,
    pub amortization: Money,
    pub new_principal: Money,
    pub installment_number: u32,
    pub is_final: bool,
}

/// One installment against an existing plan.
///
/// Amortization is the plan's fixed principal portion. The plan is final when
/// this payment completes the installment count, or when the residual
/// principal falls within [`Money::SETTLEMENT_EPSILON`] — the epsilon absorbs
/// the sub-cent drift that equal-division plans accumulate.
pub fn compute_installment_payment(
    principal: Money,
    plan: &InstallmentPlan,
    penalty_per_day: Money,
    due_date: NaiveDate,
    payment_date: NaiveDate,
) -> InstallmentPayment {
    let penalty = late_penalty(penalty_per_day, due_date, payment_date);
    let amortization = plan.amortization();
    let new_principal = (principal - amortization).max(Money::ZERO);
    let installment_number = plan.installments_paid + 1;
    let is_final = installment_number >= plan.total_installments
        || new_principal <= Money::SETTLEMENT_EPSILON;

    InstallmentPayment {
        penalty,
        amortization,
        new_principal,
        installment_number,
        is_final,
    }
}

/// monetary shape of a restructuring agreement
#[derive(Debug, Clone, PartialEq)]
pub struct RestructureCalculation {
    /// total_value minus the previous principal; can be zero or negative when
    /// the restructuring writes off value, and is deliberately not clamped
    pub implied_interest: Money,
    pub plan: InstallmentPlan,
}

/// Convert an outstanding balance into a fixed agreement of `period_count`
/// installments totalling `total_value`.
pub fn compute_restructure(
    previous_principal: Money,
    total_value: Money,
    period_count: u32,
    period: PeriodUnit,
) -> Result<RestructureCalculation> {
    if period_count == 0 {
        return Err(LedgerError::InvalidPeriodCount { count: period_count });
    }

    let periods = Decimal::from(period_count);
    let implied_interest = total_value - previous_principal;

    Ok(RestructureCalculation {
        implied_interest,
        plan: InstallmentPlan {
            total_installments: period_count,
            installments_paid: 0,
            per_installment: total_value / periods,
            interest_per_installment: implied_interest / periods,
            period,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_renewal_on_due_date() {
        let calc = compute_renewal(
            Money::from_major(500),
            Rate::from_percent(10),
            Money::from_major(2),
            d(2024, 4, 1),
            d(2024, 4, 1),
            PeriodUnit::Month,
        );

        assert_eq!(calc.interest, Money::from_major(50));
        assert_eq!(calc.penalty.penalty_amount, Money::ZERO);
        assert_eq!(calc.next_due_date, d(2024, 5, 1));
    }

    #[test]
    fn test_renewal_late_accrues_penalty_but_advances_from_due_date() {
        let calc = compute_renewal(
            Money::from_major(500),
            Rate::from_percent(10),
            Money::from_major(2),
            d(2024, 4, 1),
            d(2024, 4, 6),
            PeriodUnit::Month,
        );

        assert_eq!(calc.penalty.days_late, 5);
        assert_eq!(calc.penalty.penalty_amount, Money::from_major(10));
        // advances from the due date, not the payment date
        assert_eq!(calc.next_due_date, d(2024, 5, 1));
    }

    #[test]
    fn test_settlement_total() {
        let calc = compute_settlement(
            Money::from_major(500),
            Rate::from_percent(10),
            Money::from_str_exact("2.50").unwrap(),
            d(2024, 4, 1),
            d(2024, 4, 2),
        );

        assert_eq!(calc.interest, Money::from_major(50));
        assert_eq!(calc.penalty.penalty_amount, Money::from_str_exact("2.50").unwrap());
        assert_eq!(calc.total_due, Money::from_str_exact("552.50").unwrap());
    }

    #[test]
    fn test_installment_plan_split() {
        let plan = installment_plan(
            Money::from_major(1000),
            Rate::from_percent(20),
            5,
            PeriodUnit::Month,
        )
        .unwrap();

        assert_eq!(plan.per_installment, Money::from_major(240));
        assert_eq!(plan.interest_per_installment, Money::from_major(40));
        assert_eq!(plan.amortization(), Money::from_major(200));
        assert_eq!(plan.total_installments, 5);
        assert_eq!(plan.installments_paid, 0);
    }

    #[test]
    fn test_installment_plan_rejects_zero_periods() {
        let err = installment_plan(Money::from_major(1000), Rate::from_percent(20), 0, PeriodUnit::Day)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPeriodCount { count: 0 }));
    }

    #[test]
    fn test_installment_payment_amortizes() {
        let plan = installment_plan(
            Money::from_major(1000),
            Rate::from_percent(20),
            5,
            PeriodUnit::Month,
        )
        .unwrap();

        let payment = compute_installment_payment(
            Money::from_major(1000),
            &plan,
            Money::ZERO,
            d(2024, 4, 1),
            d(2024, 4, 1),
        );

        assert_eq!(payment.amortization, Money::from_major(200));
        assert_eq!(payment.new_principal, Money::from_major(800));
        assert_eq!(payment.installment_number, 1);
        assert!(!payment.is_final);
        assert_eq!(payment.penalty.penalty_amount, Money::ZERO);
    }

    #[test]
    fn test_final_installment_by_count() {
        let mut plan = installment_plan(
            Money::from_major(1000),
            Rate::from_percent(20),
            5,
            PeriodUnit::Month,
        )
        .unwrap();
        plan.installments_paid = 4;

        let payment = compute_installment_payment(
            Money::from_major(200),
            &plan,
            Money::ZERO,
            d(2024, 8, 1),
            d(2024, 8, 1),
        );

        assert!(payment.is_final);
        assert_eq!(payment.new_principal, Money::ZERO);
    }

    #[test]
    fn test_final_installment_by_epsilon_residual() {
        let plan = installment_plan(
            Money::from_major(600),
            Rate::from_percent(0),
            3,
            PeriodUnit::Month,
        )
        .unwrap();

        // residual drifted below one installment; a dangling 0.05 balance must
        // not keep the plan open even though only one of three was paid
        let payment = compute_installment_payment(
            Money::from_str_exact("200.05").unwrap(),
            &plan,
            Money::ZERO,
            d(2024, 4, 1),
            d(2024, 4, 1),
        );

        assert_eq!(payment.installment_number, 1);
        assert_eq!(payment.new_principal, Money::from_str_exact("0.05").unwrap());
        assert!(payment.is_final);
    }

    #[test]
    fn test_restructure_plan() {
        let calc = compute_restructure(
            Money::from_major(500),
            Money::from_major(600),
            6,
            PeriodUnit::Month,
        )
        .unwrap();

        assert_eq!(calc.implied_interest, Money::from_major(100));
        assert_eq!(calc.plan.per_installment, Money::from_major(100));
        assert_eq!(
            calc.plan.interest_per_installment,
            Money::from_str_exact("16.6667").unwrap()
        );
    }

    #[test]
    fn test_restructure_writeoff_keeps_negative_implied_interest() {
        // writing off value produces negative implied interest; it is not
        // clamped here, callers decide what to do with it downstream
        let calc = compute_restructure(
            Money::from_major(500),
            Money::from_major(400),
            4,
            PeriodUnit::Month,
        )
        .unwrap();

        assert_eq!(calc.implied_interest, Money::from_major(-100));
        assert_eq!(calc.plan.interest_per_installment, Money::from_major(-25));
        // the full 400 still amortizes the 500 balance at 125 per installment
        assert_eq!(calc.plan.amortization(), Money::from_major(125));
    }
}
