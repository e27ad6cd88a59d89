pub mod views;

use std::sync::Arc;

use axum::Router;
use erp_bootstrap::web::crud_router;

use crate::application::PurchasingServices;

pub fn routes(services: &PurchasingServices) -> Router {
    Router::new()
        .merge(crud_router(Arc::new(services.supplier_type_resource())))
        .merge(crud_router(Arc::new(services.supplier_resource())))
        .merge(crud_router(Arc::new(services.purchase_order_resource())))
}
