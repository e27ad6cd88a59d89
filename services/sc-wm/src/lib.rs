//! Warehouse Management Service Library
//!
//! 仓库与库位主数据

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::WarehouseServices;

use domain::{Location, Warehouse};

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> WarehouseServices {
    let pool = infra.postgres_pool();
    WarehouseServices::new(
        Arc::new(PgCrudRepository::<Warehouse>::new(pool.clone())),
        Arc::new(PgCrudRepository::<Location>::new(pool)),
    )
}

pub fn router(services: &WarehouseServices) -> Router {
    api::routes(services)
}
