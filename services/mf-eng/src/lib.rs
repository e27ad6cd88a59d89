//! Engineering Service Library
//!
//! 物料清单：表头与组件行

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::EngineeringServices;

use domain::{BomHeader, BomItem};

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> EngineeringServices {
    let pool = infra.postgres_pool();
    EngineeringServices::new(
        Arc::new(PgCrudRepository::<BomHeader>::new(pool.clone())),
        Arc::new(PgCrudRepository::<BomItem>::new(pool)),
        mdm_material::services(infra).cards,
    )
}

pub fn router(services: &EngineeringServices) -> Router {
    api::routes(services)
}
