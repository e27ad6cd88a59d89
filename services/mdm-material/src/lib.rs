//! Material Master Data Service Library
//!
//! 物料分类树与物料卡片主数据。库存汇总端点 `/api/material-cards/{id}/stock`
//! 由库存模块提供。

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::MaterialServices;

use domain::{MaterialCard, MaterialCategory};

pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

pub fn services(infra: &Infrastructure) -> MaterialServices {
    let pool = infra.postgres_pool();
    MaterialServices::new(
        Arc::new(PgCrudRepository::<MaterialCategory>::new(pool.clone())),
        Arc::new(PgCrudRepository::<MaterialCard>::new(pool)),
    )
}

pub fn router(services: &MaterialServices) -> Router {
    api::routes(services)
}
