use thiserror::Error;

use crate::decimal::Money;
use crate::types::ContractStatus;

/// Errors raised by contract lifecycle operations.
///
/// Parsing never produces an error: an unparseable movement line degrades to
/// a null date / zero amount and is excluded from aggregates.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("contract not active: current status is {status:?}")]
    ContractNotActive {
        status: ContractStatus,
    },

    #[error("contract already settled")]
    ContractAlreadySettled,

    #[error("contract has no installment plan")]
    NoInstallmentPlan,

    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid period count: {count}")]
    InvalidPeriodCount {
        count: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
