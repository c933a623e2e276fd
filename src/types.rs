use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// integer identifier assigned to a contract by the owning book
pub type ContractId = i64;

/// unique identifier for the client a contract belongs to
pub type ClientId = Uuid;

/// payment cadence of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// interest-only renewals, principal rolls over each month
    Monthly,
    /// fixed plan of 4 weekly installments
    Weekly,
    /// fixed plan of a user-chosen number of daily installments
    Daily,
    /// fixed plan of a user-chosen number of monthly installments
    Installment,
}

impl Frequency {
    /// the calendar unit one period advances by
    pub fn period_unit(&self) -> PeriodUnit {
        match self {
            Frequency::Monthly | Frequency::Installment => PeriodUnit::Month,
            Frequency::Weekly => PeriodUnit::Week,
            Frequency::Daily => PeriodUnit::Day,
        }
    }
}

/// calendar unit separating two consecutive due dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Month,
    Week,
    Day,
}

/// contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// performing, renewable or amortizing per its original terms
    Active,
    /// restructured into a fixed installment agreement
    InstallmentPlan,
    /// fully paid off, terminal
    Settled,
}

/// operation category recovered from (or written into) a movement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    /// capital handed to the client, cash out
    Disbursement,
    /// interest-only renewal receipt
    Renewal,
    /// installment receipt
    Installment,
    /// final payoff receipt
    Settlement,
    /// restructuring into a plan, a change of obligation with no cash movement
    Agreement,
}

impl MovementKind {
    /// whether lines of this kind represent money actually received
    pub fn is_cash_event(&self) -> bool {
        matches!(
            self,
            MovementKind::Installment | MovementKind::Settlement | MovementKind::Renewal
        )
    }
}

/// session language, passed explicitly into every parse/format call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    Portuguese,
    English,
    Spanish,
}

impl Locale {
    /// currency marker written in front of amounts
    pub fn currency_marker(&self) -> &'static str {
        match self {
            Locale::Portuguese => "R$",
            Locale::English | Locale::Spanish => "$",
        }
    }

    /// strftime pattern for dates embedded in movement lines
    pub fn date_format(&self) -> &'static str {
        match self {
            // US convention
            Locale::English => "%m/%d/%Y",
            Locale::Portuguese | Locale::Spanish => "%d/%m/%Y",
        }
    }
}

/// fixed installment plan attached to a contract
///
/// The interest split is computed once at plan creation and never recomputed;
/// only the late penalty reacts to payment timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub total_installments: u32,
    pub installments_paid: u32,
    pub per_installment: Money,
    pub interest_per_installment: Money,
    pub period: PeriodUnit,
}

impl InstallmentPlan {
    /// principal portion of each installment
    pub fn amortization(&self) -> Money {
        self.per_installment - self.interest_per_installment
    }

    /// installments still owed
    pub fn remaining(&self) -> u32 {
        self.total_installments.saturating_sub(self.installments_paid)
    }

    /// whether every installment has been paid
    pub fn is_complete(&self) -> bool {
        self.installments_paid >= self.total_installments
    }
}
