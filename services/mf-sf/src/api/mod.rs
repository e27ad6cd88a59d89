pub mod views;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use erp_auth_core::require_permission;
use erp_bootstrap::web::{AuthClaims, crud_router, crud_router_with, parse_id};
use erp_errors::AppResult;

use crate::application::{ShopFloorServices, WorkOrderResource};
use crate::domain::WorkOrderId;
use views::OperationView;

/// `GET /api/work-orders/{id}/operations`
async fn work_order_operations(
    State(resource): State<Arc<WorkOrderResource>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OperationView>>> {
    require_permission!(claims, "work-order-operations.read");
    let id: WorkOrderId = parse_id(&id)?;
    let operations = resource.operations_of(&id).await?;
    Ok(Json(operations.into_iter().map(OperationView::from).collect()))
}

pub fn routes(services: &ShopFloorServices) -> Router {
    let extra = Router::new().route("/{id}/operations", get(work_order_operations));

    Router::new()
        .merge(crud_router_with(Arc::new(services.work_order_resource()), extra))
        .merge(crud_router(Arc::new(services.operation_resource())))
        .merge(crud_router(Arc::new(services.confirmation_resource())))
        .merge(crud_router(Arc::new(services.consumption_resource())))
}
