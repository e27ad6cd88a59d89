//! BOM 行管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCard;

use super::commands::{CreateBomItem, UpdateBomItem};
use crate::api::views::BomItemView;
use crate::domain::{BomHeader, BomItem, BomItemId};

/// `/api/bom-items`
pub struct BomItemResource {
    items: CrudHandler<BomItem>,
    headers: CrudHandler<BomHeader>,
    materials: CrudHandler<MaterialCard>,
}

impl BomItemResource {
    pub fn new(
        items: CrudHandler<BomItem>,
        headers: CrudHandler<BomHeader>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            items,
            headers,
            materials,
        }
    }
}

#[async_trait]
impl CrudResource for BomItemResource {
    type Entity = BomItem;
    type View = BomItemView;
    type Create = CreateBomItem;
    type Update = UpdateBomItem;

    const RESOURCE: &'static str = "bom-items";

    fn lifecycle(&self) -> &CrudHandler<BomItem> {
        &self.items
    }

    async fn create(&self, input: CreateBomItem, actor: &UserId) -> AppResult<BomItem> {
        let header = self
            .headers
            .find(&input.bom_header_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("BOM header {} does not exist", input.bom_header_id))
            })?;
        if !header.is_active() {
            return Err(AppError::validation(format!(
                "BOM header {} is not active",
                header.code
            )));
        }
        let component = self
            .materials
            .find(&input.component_material_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Material {} does not exist",
                    input.component_material_id
                ))
            })?;

        let unit_of_measure = match &input.unit_of_measure {
            Some(unit) => require_text("unit_of_measure", unit, 20)?,
            None => component.unit_of_measure.clone(),
        };
        let mut item = BomItem::new(&header, component.id, unit_of_measure, Some(actor.clone()))?;
        item.set_usage(input.quantity, input.scrap_rate, input.sequence)?;
        item.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            item.status = status;
        }

        self.items.create(item).await
    }

    async fn update(&self, id: BomItemId, input: UpdateBomItem, actor: &UserId) -> AppResult<BomItem> {
        let mut item = self.items.get(&id).await?;
        item.set_usage(input.quantity, input.scrap_rate, input.sequence)?;
        item.unit_of_measure = require_text("unit_of_measure", &input.unit_of_measure, 20)?;
        item.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            item.status = status;
        }
        item.audit_info.update(Some(actor.clone()));

        self.items.update(item).await
    }
}
