//! BOM 表头管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::{MaterialCard, MaterialCardId};
use tracing::info;

use super::commands::SaveBomHeader;
use crate::api::views::BomHeaderView;
use crate::domain::{BomHeader, BomHeaderId, BomItem};

/// `/api/bom-headers`
pub struct BomHeaderResource {
    headers: CrudHandler<BomHeader>,
    items: CrudHandler<BomItem>,
    materials: CrudHandler<MaterialCard>,
}

impl BomHeaderResource {
    pub fn new(
        headers: CrudHandler<BomHeader>,
        items: CrudHandler<BomItem>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            headers,
            items,
            materials,
        }
    }

    /// 表头下未删除的行，按序号排序
    pub async fn items_of(&self, id: &BomHeaderId) -> AppResult<Vec<BomItem>> {
        let header = self.headers.get(id).await?;
        let mut items = self
            .items
            .children("bom_header_id", header.id.as_uuid())
            .await?;
        items.sort_by_key(|item| item.sequence);
        Ok(items)
    }

    async fn resolve_product(&self, id: MaterialCardId) -> AppResult<MaterialCardId> {
        match self.materials.find(&id).await? {
            Some(material) => Ok(material.id),
            None => Err(AppError::validation(format!("Material {} does not exist", id))),
        }
    }

    fn apply(header: &mut BomHeader, input: &SaveBomHeader) -> AppResult<()> {
        header.code = require_text("code", &input.code, 50)?;
        header.name = require_text("name", &input.name, 200)?;
        if let Some(version) = &input.version {
            header.version = require_text("version", version, 20)?;
        }
        header.set_base_quantity(input.base_quantity)?;
        header.description = normalize_optional(input.description.clone());
        if let Some(status) = input.status {
            header.status = status;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for BomHeaderResource {
    type Entity = BomHeader;
    type View = BomHeaderView;
    type Create = SaveBomHeader;
    type Update = SaveBomHeader;

    const RESOURCE: &'static str = "bom-headers";

    fn lifecycle(&self) -> &CrudHandler<BomHeader> {
        &self.headers
    }

    async fn create(&self, input: SaveBomHeader, actor: &UserId) -> AppResult<BomHeader> {
        let product = self.resolve_product(input.product_material_id).await?;
        let mut header = BomHeader::new(String::new(), String::new(), product, Some(actor.clone()));
        Self::apply(&mut header, &input)?;

        let header = self.headers.create(header).await?;
        info!(code = %header.code, product = %header.product_material_id, "BOM header created");
        Ok(header)
    }

    async fn update(&self, id: BomHeaderId, input: SaveBomHeader, actor: &UserId) -> AppResult<BomHeader> {
        let mut header = self.headers.get(&id).await?;
        Self::apply(&mut header, &input)?;

        if input.product_material_id != header.product_material_id {
            let product = self.resolve_product(input.product_material_id).await?;
            let items = self.items.children("bom_header_id", header.id.as_uuid()).await?;
            if items.iter().any(|item| item.component_material_id == product) {
                return Err(AppError::validation(format!(
                    "Material {} is already a component of BOM {}",
                    product, header.code
                )));
            }
            header.product_material_id = product;
        }
        header.audit_info.update(Some(actor.clone()));

        self.headers.update(header).await
    }
}
