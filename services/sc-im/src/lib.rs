//! Inventory Management Service Library
//!
//! 库存台账与物料移动；移动在一个事务内过账到台账

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::InventoryServices;

use application::MasterData;
use domain::{MaterialMovement, StockEntry};
use infrastructure::persistence::PgStockLedger;

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> InventoryServices {
    let pool = infra.postgres_pool();
    let materials = mdm_material::services(infra);
    let warehouses = sc_wm::services(infra);

    InventoryServices::new(
        Arc::new(PgCrudRepository::<StockEntry>::new(pool.clone())),
        Arc::new(PgCrudRepository::<MaterialMovement>::new(pool)),
        Arc::new(PgStockLedger::new(infra.transaction_manager())),
        MasterData::new(materials.cards, warehouses.warehouses, warehouses.locations),
    )
}

pub fn router(services: &InventoryServices) -> Router {
    api::routes(services)
}
