pub mod calculator;
pub mod contract;
pub mod decimal;
pub mod errors;
pub mod movement;
pub mod parser;
pub mod report;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use calculator::{
    advance_due_date, compute_installment_payment, compute_renewal, compute_restructure,
    compute_settlement, installment_plan, late_penalty, InstallmentPayment, PenaltyCalculation,
    RenewalCalculation, RestructureCalculation, SettlementCalculation,
};
pub use contract::{
    Contract, ContractView, InstallmentOutcome, RenewalOutcome, RestructureOutcome,
    SettlementOutcome,
};
pub use movement::{Movement, MovementLog};
pub use parser::{LedgerLineParser, ParsedMovement};
pub use report::{LedgerReport, ReportBuilder, ReportRow};
pub use types::{
    ClientId, ContractId, ContractStatus, Frequency, InstallmentPlan, Locale, MovementKind,
    PeriodUnit,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
