pub mod views;

use std::sync::Arc;

use axum::Router;
use erp_bootstrap::web::crud_router;

use crate::application::SalesServices;

pub fn routes(services: &SalesServices) -> Router {
    Router::new()
        .merge(crud_router(Arc::new(services.customer_resource())))
        .merge(crud_router(Arc::new(services.customer_order_resource())))
}
