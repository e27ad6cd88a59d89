//! PostgreSQL 持久化

mod migrations;
mod records;

pub use migrations::migrations;
pub use records::{PurchaseOrderRow, SupplierRow, SupplierTypeRow};
