//! 库存领域模型

mod ledger;
mod movement;
mod stock_entry;

pub use ledger::StockLedger;
pub use movement::{MaterialMovement, MaterialMovementId, MovementType, Posting};
pub use stock_entry::{StockEntry, StockEntryId, StockPoint, stock_key};
