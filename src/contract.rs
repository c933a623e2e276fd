use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};

use crate::calculator::{
    advance_due_date, compute_installment_payment, compute_renewal, compute_restructure,
    compute_settlement, installment_plan,
};
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::movement::{Movement, MovementLog};
use crate::types::{
    ClientId, ContractId, ContractStatus, Frequency, InstallmentPlan, Locale, PeriodUnit,
};

/// weekly loans always amortize over four installments
const WEEKLY_PLAN_INSTALLMENTS: u32 = 4;

/// A single loan or sale agreement.
///
/// The movement log is the only durable record of what happened: every
/// financial action appends exactly one rendered text line (most recent
/// first) and mutates the accumulator fields. The log is never reordered or
/// rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub client_id: ClientId,

    // financial state
    pub principal: Money,
    pub original_principal: Money,
    pub rate: Rate,
    pub penalty_per_day: Money,
    pub frequency: Frequency,
    pub status: ContractStatus,

    // accumulators
    pub total_interest_collected: Money,
    pub total_penalties_collected: Money,

    // schedule
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
    pub plan: Option<InstallmentPlan>,

    // history
    pub movements: MovementLog,
}

/// values applied by a renewal
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalOutcome {
    pub interest: Money,
    pub penalty: Money,
    pub next_due_date: NaiveDate,
}

/// values applied by a settlement
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementOutcome {
    pub interest: Money,
    pub penalty: Money,
    pub total_due: Money,
}

/// values applied by one installment receipt
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentOutcome {
    pub penalty: Money,
    pub amortization: Money,
    pub new_principal: Money,
    pub installment_number: u32,
    pub is_final: bool,
}

/// values applied by a restructuring agreement
#[derive(Debug, Clone, PartialEq)]
pub struct RestructureOutcome {
    /// not clamped: negative when the agreement writes off value
    pub implied_interest: Money,
    pub per_installment: Money,
    pub first_due_date: NaiveDate,
}

impl Contract {
    /// Open a contract and record the disbursement as its first movement.
    ///
    /// Weekly contracts get a fixed 4-installment plan; daily and
    /// monthly-parceled contracts require `period_count`; monthly rollover
    /// contracts carry no plan and renew instead.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: ContractId,
        client_id: ClientId,
        principal: Money,
        rate: Rate,
        penalty_per_day: Money,
        frequency: Frequency,
        start_date: NaiveDate,
        period_count: Option<u32>,
        locale: Locale,
    ) -> Result<Self> {
        if !principal.is_positive() {
            return Err(LedgerError::InvalidPrincipal { amount: principal });
        }

        let plan = match frequency {
            Frequency::Monthly => None,
            Frequency::Weekly => Some(installment_plan(
                principal,
                rate,
                WEEKLY_PLAN_INSTALLMENTS,
                PeriodUnit::Week,
            )?),
            Frequency::Daily | Frequency::Installment => {
                let count = period_count.ok_or_else(|| LedgerError::InvalidConfiguration {
                    message: format!("{:?} contracts require a period count", frequency),
                })?;
                Some(installment_plan(principal, rate, count, frequency.period_unit())?)
            }
        };

        let mut contract = Self {
            id,
            client_id,
            principal,
            original_principal: principal,
            rate,
            penalty_per_day,
            frequency,
            status: ContractStatus::Active,
            total_interest_collected: Money::ZERO,
            total_penalties_collected: Money::ZERO,
            start_date,
            next_due_date: advance_due_date(start_date, frequency.period_unit()),
            plan,
            movements: MovementLog::new(),
        };

        contract.record(
            Movement::Disbursement {
                date: start_date,
                amount: principal,
            },
            locale,
        );

        Ok(contract)
    }

    /// whether the contract can still take financial actions
    pub fn is_open(&self) -> bool {
        !matches!(self.status, ContractStatus::Settled)
    }

    /// Roll the principal over for one more period.
    ///
    /// Interest accrues on the full principal; the due date advances from the
    /// current due date by one period. Principal is unchanged.
    pub fn renew(&mut self, payment_date: NaiveDate, locale: Locale) -> Result<RenewalOutcome> {
        self.require_active()?;

        let calc = compute_renewal(
            self.principal,
            self.rate,
            self.penalty_per_day,
            self.next_due_date,
            payment_date,
            self.frequency.period_unit(),
        );

        self.total_interest_collected += calc.interest;
        self.total_penalties_collected += calc.penalty.penalty_amount;
        self.next_due_date = calc.next_due_date;

        self.record(
            Movement::Renewal {
                date: payment_date,
                interest: calc.interest,
                penalty: calc.penalty.penalty_amount,
            },
            locale,
        );

        Ok(RenewalOutcome {
            interest: calc.interest,
            penalty: calc.penalty.penalty_amount,
            next_due_date: calc.next_due_date,
        })
    }

    /// Pay the contract off in full.
    ///
    /// Only an active contract settles this way; a restructured plan exits
    /// through its final installment, since its interest was already fixed at
    /// plan creation and must not be charged again as a rollover. Principal
    /// becomes exactly zero and the contract enters its terminal status; no
    /// operation is accepted afterwards.
    pub fn settle(&mut self, payment_date: NaiveDate, locale: Locale) -> Result<SettlementOutcome> {
        self.require_active()?;

        let calc = compute_settlement(
            self.principal,
            self.rate,
            self.penalty_per_day,
            self.next_due_date,
            payment_date,
        );

        self.total_interest_collected += calc.interest;
        self.total_penalties_collected += calc.penalty.penalty_amount;
        self.principal = Money::ZERO;
        self.status = ContractStatus::Settled;

        self.record(
            Movement::Settlement {
                date: payment_date,
                total: calc.total_due,
                penalty: calc.penalty.penalty_amount,
            },
            locale,
        );

        Ok(SettlementOutcome {
            interest: calc.interest,
            penalty: calc.penalty.penalty_amount,
            total_due: calc.total_due,
        })
    }

    /// Receive one installment against the contract's plan.
    ///
    /// The final installment (by count, or by the residual falling within the
    /// settlement epsilon) zeroes the principal and settles the contract.
    pub fn pay_installment(
        &mut self,
        payment_date: NaiveDate,
        locale: Locale,
    ) -> Result<InstallmentOutcome> {
        if !self.is_open() {
            return Err(LedgerError::ContractAlreadySettled);
        }
        let plan = self.plan.ok_or(LedgerError::NoInstallmentPlan)?;

        let calc = compute_installment_payment(
            self.principal,
            &plan,
            self.penalty_per_day,
            self.next_due_date,
            payment_date,
        );

        self.total_interest_collected += plan.interest_per_installment;
        self.total_penalties_collected += calc.penalty.penalty_amount;

        if let Some(p) = self.plan.as_mut() {
            p.installments_paid = calc.installment_number;
        }

        if calc.is_final {
            self.principal = Money::ZERO;
            self.status = ContractStatus::Settled;
        } else {
            self.principal = calc.new_principal;
            self.next_due_date = advance_due_date(self.next_due_date, plan.period);
        }

        self.record(
            Movement::Installment {
                date: payment_date,
                number: calc.installment_number,
                total: plan.total_installments,
                amount: plan.per_installment,
                penalty: calc.penalty.penalty_amount,
            },
            locale,
        );

        Ok(InstallmentOutcome {
            penalty: calc.penalty.penalty_amount,
            amortization: calc.amortization,
            new_principal: calc.new_principal,
            installment_number: calc.installment_number,
            is_final: calc.is_final,
        })
    }

    /// Convert the outstanding balance into a fixed installment agreement.
    ///
    /// The implied interest (agreed total minus outstanding principal) is
    /// recorded unclamped; an agreement below the outstanding balance carries
    /// it as negative.
    pub fn restructure(
        &mut self,
        total_value: Money,
        period_count: u32,
        first_due_date: NaiveDate,
        daily_penalty: Money,
        agreement_date: NaiveDate,
        locale: Locale,
    ) -> Result<RestructureOutcome> {
        if !self.is_open() {
            return Err(LedgerError::ContractAlreadySettled);
        }
        if self.status != ContractStatus::Active {
            return Err(LedgerError::ContractNotActive { status: self.status });
        }
        if !total_value.is_positive() {
            return Err(LedgerError::InvalidPrincipal { amount: total_value });
        }

        let calc = compute_restructure(self.principal, total_value, period_count, PeriodUnit::Month)?;

        self.status = ContractStatus::InstallmentPlan;
        self.plan = Some(calc.plan);
        self.penalty_per_day = daily_penalty;
        self.next_due_date = first_due_date;

        self.record(
            Movement::Agreement {
                date: agreement_date,
                total: total_value,
                installments: period_count,
            },
            locale,
        );

        Ok(RestructureOutcome {
            implied_interest: calc.implied_interest,
            per_installment: calc.plan.per_installment,
            first_due_date,
        })
    }

    /// renew with the system clock's current date
    pub fn renew_now(&mut self, locale: Locale) -> Result<RenewalOutcome> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.renew(time.now().date_naive(), locale)
    }

    /// settle with the system clock's current date
    pub fn settle_now(&mut self, locale: Locale) -> Result<SettlementOutcome> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.settle(time.now().date_naive(), locale)
    }

    /// pay an installment with the system clock's current date
    pub fn pay_installment_now(&mut self, locale: Locale) -> Result<InstallmentOutcome> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.pay_installment(time.now().date_naive(), locale)
    }

    fn require_active(&self) -> Result<()> {
        match self.status {
            ContractStatus::Active => Ok(()),
            ContractStatus::Settled => Err(LedgerError::ContractAlreadySettled),
            status => Err(LedgerError::ContractNotActive { status }),
        }
    }

    fn record(&mut self, movement: Movement, locale: Locale) {
        self.movements.record(movement.to_line(locale));
    }
}

/// serializable snapshot of a contract for display or export
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractView {
    pub id: ContractId,
    pub client_id: ClientId,
    pub status: ContractStatus,
    pub frequency: Frequency,
    pub principal: Money,
    pub original_principal: Money,
    pub rate: Rate,
    pub penalty_per_day: Money,
    pub total_interest_collected: Money,
    pub total_penalties_collected: Money,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
    pub plan: Option<InstallmentPlan>,
    pub movements: Vec<String>,
}

impl ContractView {
    pub fn from_contract(contract: &Contract) -> Self {
        Self {
            id: contract.id,
            client_id: contract.client_id,
            status: contract.status,
            frequency: contract.frequency,
            principal: contract.principal,
            original_principal: contract.original_principal,
            rate: contract.rate,
            penalty_per_day: contract.penalty_per_day,
            total_interest_collected: contract.total_interest_collected,
            total_penalties_collected: contract.total_penalties_collected,
            start_date: contract.start_date,
            next_due_date: contract.next_due_date,
            plan: contract.plan,
            movements: contract.movements.iter().map(str::to_string).collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
