//! Purchasing Service Library
//!
//! 供应商主数据与采购订单

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::PurchasingServices;

use domain::{PurchaseOrder, Supplier, SupplierType};

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> PurchasingServices {
    let pool = infra.postgres_pool();
    PurchasingServices::new(
        Arc::new(PgCrudRepository::<SupplierType>::new(pool.clone())),
        Arc::new(PgCrudRepository::<Supplier>::new(pool.clone())),
        Arc::new(PgCrudRepository::<PurchaseOrder>::new(pool)),
        mdm_material::services(infra).cards,
    )
}

pub fn router(services: &PurchasingServices) -> Router {
    api::routes(services)
}
