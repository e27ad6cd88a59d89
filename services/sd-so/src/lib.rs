//! Sales Order Service Library
//!
//! 客户主数据与客户订单

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::SalesServices;

use domain::{Customer, CustomerOrder};

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> SalesServices {
    let pool = infra.postgres_pool();
    SalesServices::new(
        Arc::new(PgCrudRepository::<Customer>::new(pool.clone())),
        Arc::new(PgCrudRepository::<CustomerOrder>::new(pool)),
        mdm_material::services(infra).cards,
    )
}

pub fn router(services: &SalesServices) -> Router {
    api::routes(services)
}
