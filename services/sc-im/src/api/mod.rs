pub mod views;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use erp_auth_core::require_permission;
use erp_bootstrap::web::{AuthClaims, crud_router, parse_id};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;

use crate::application::{InventoryServices, StockEntryResource};
use views::MaterialStockView;

async fn material_stock(
    State(resource): State<Arc<StockEntryResource>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<MaterialStockView>> {
    require_permission!(claims, "stock-entries.read");
    let id: MaterialCardId = parse_id(&id)?;
    Ok(Json(resource.material_stock(&id).await?))
}

pub fn routes(services: &InventoryServices) -> Router {
    let stock = Router::new()
        .route("/api/material-cards/{id}/stock", get(material_stock))
        .with_state(Arc::new(services.stock_entry_resource()));

    Router::new()
        .merge(crud_router(Arc::new(services.stock_entry_resource())))
        .merge(crud_router(Arc::new(services.movement_resource())))
        .merge(stock)
}
