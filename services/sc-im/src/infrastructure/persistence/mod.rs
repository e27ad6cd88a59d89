//! PostgreSQL 持久化

mod ledger;
mod migrations;
mod postgres;
mod rows;

pub use ledger::PgStockLedger;
pub use migrations::migrations;
pub use rows::{MaterialMovementRow, StockEntryRow};
