//! PostgreSQL 持久化

mod ledger;
mod migrations;
mod records;

pub use ledger::PgProductionLedger;
pub use migrations::migrations;
pub use records::{ConfirmationRow, ConsumptionRow, OperationRow, WorkOrderRow};
