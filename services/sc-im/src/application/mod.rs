//! 应用层

pub mod commands;
pub mod master_data;
pub mod movements;
pub mod stock_entries;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;

pub use master_data::MasterData;
pub use movements::MovementResource;
pub use stock_entries::StockEntryResource;

use crate::domain::{MaterialMovement, StockEntry, StockLedger};

/// 库存模块的处理器集合
#[derive(Clone)]
pub struct InventoryServices {
    pub entries: CrudHandler<StockEntry>,
    pub movements: CrudHandler<MaterialMovement>,
    pub ledger: Arc<dyn StockLedger>,
    pub master: MasterData,
}

impl InventoryServices {
    pub fn new(
        entries: Arc<dyn CrudRepository<StockEntry>>,
        movements: Arc<dyn CrudRepository<MaterialMovement>>,
        ledger: Arc<dyn StockLedger>,
        master: MasterData,
    ) -> Self {
        Self {
            entries: CrudHandler::new(entries),
            movements: CrudHandler::new(movements),
            ledger,
            master,
        }
    }

    pub fn stock_entry_resource(&self) -> StockEntryResource {
        StockEntryResource::new(self.entries.clone(), self.master.clone())
    }

    pub fn movement_resource(&self) -> MovementResource {
        MovementResource::new(self.movements.clone(), self.ledger.clone(), self.master.clone())
    }
}
