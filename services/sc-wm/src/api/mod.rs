pub mod views;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use erp_auth_core::require_permission;
use erp_bootstrap::web::{AuthClaims, crud_router, crud_router_with, parse_id};
use erp_errors::AppResult;

use crate::application::{WarehouseResource, WarehouseServices};
use crate::domain::WarehouseId;
use views::LocationView;

/// `GET /api/warehouses/{id}/locations`
async fn warehouse_locations(
    State(resource): State<Arc<WarehouseResource>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<LocationView>>> {
    require_permission!(claims, "locations.read");
    let id: WarehouseId = parse_id(&id)?;
    let locations = resource.locations_of(&id).await?;
    Ok(Json(locations.into_iter().map(LocationView::from).collect()))
}

pub fn routes(services: &WarehouseServices) -> Router {
    let extra = Router::new().route("/{id}/locations", get(warehouse_locations));

    Router::new()
        .merge(crud_router_with(Arc::new(services.warehouse_resource()), extra))
        .merge(crud_router(Arc::new(services.location_resource())))
}
