pub mod views;

use std::sync::Arc;

use axum::Router;
use erp_bootstrap::web::crud_router;

use crate::application::MaterialServices;

/// 分类与物料卡片的 CRUD 路由
pub fn routes(services: &MaterialServices) -> Router {
    Router::new()
        .merge(crud_router(Arc::new(services.category_resource())))
        .merge(crud_router(Arc::new(services.card_resource())))
}
