//! Shop Floor Service Library
//!
//! 生产工单、工序、报工与领料；报工在一个事务内累计到工单

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::ShopFloorServices;

use application::MasterData;
use domain::{MaterialConsumption, ProductionConfirmation, WorkOrder, WorkOrderOperation};
use infrastructure::persistence::PgProductionLedger;

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> ShopFloorServices {
    let pool = infra.postgres_pool();
    let materials = mdm_material::services(infra);
    let engineering = mf_eng::services(infra);
    let warehouses = sc_wm::services(infra);

    ShopFloorServices::new(
        Arc::new(PgCrudRepository::<WorkOrder>::new(pool.clone())),
        Arc::new(PgCrudRepository::<WorkOrderOperation>::new(pool.clone())),
        Arc::new(PgCrudRepository::<ProductionConfirmation>::new(pool.clone())),
        Arc::new(PgCrudRepository::<MaterialConsumption>::new(pool)),
        Arc::new(PgProductionLedger::new(infra.transaction_manager())),
        MasterData::new(
            materials.cards,
            engineering.headers,
            warehouses.warehouses,
            warehouses.locations,
        ),
    )
}

pub fn router(services: &ShopFloorServices) -> Router {
    api::routes(services)
}
