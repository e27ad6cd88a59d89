pub mod views;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use erp_auth_core::require_permission;
use erp_bootstrap::web::{AuthClaims, crud_router, crud_router_with, parse_id};
use erp_errors::AppResult;

use crate::application::{BomHeaderResource, EngineeringServices};
use crate::domain::BomHeaderId;
use views::BomItemView;

/// `GET /api/bom-headers/{id}/items`
async fn bom_items(
    State(resource): State<Arc<BomHeaderResource>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<BomItemView>>> {
    require_permission!(claims, "bom-items.read");
    let id: BomHeaderId = parse_id(&id)?;
    let items = resource.items_of(&id).await?;
    Ok(Json(items.into_iter().map(BomItemView::from).collect()))
}

pub fn routes(services: &EngineeringServices) -> Router {
    let extra = Router::new().route("/{id}/items", get(bom_items));

    Router::new()
        .merge(crud_router_with(Arc::new(services.header_resource()), extra))
        .merge(crud_router(Arc::new(services.item_resource())))
}
