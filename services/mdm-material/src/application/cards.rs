//! 物料卡片管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::{AppError, AppResult};
use tracing::info;
use uuid::Uuid;

use super::commands::SaveMaterialCard;
use crate::api::views::MaterialCardView;
use crate::domain::{MaterialCard, MaterialCardId, MaterialCategory, MaterialCategoryId, StockLevels};

/// `/api/material-cards`
pub struct MaterialCardResource {
    cards: CrudHandler<MaterialCard>,
    categories: CrudHandler<MaterialCategory>,
}

impl MaterialCardResource {
    pub fn new(cards: CrudHandler<MaterialCard>, categories: CrudHandler<MaterialCategory>) -> Self {
        Self { cards, categories }
    }

    async fn resolve_category(&self, category_id: Option<Uuid>) -> AppResult<Option<MaterialCategoryId>> {
        match category_id.map(MaterialCategoryId::from_uuid) {
            Some(id) => match self.categories.find(&id).await? {
                Some(_) => Ok(Some(id)),
                None => Err(AppError::validation(format!(
                    "Material category {} does not exist",
                    id
                ))),
            },
            None => Ok(None),
        }
    }

    /// 将请求体中除编码外的字段写入卡片
    async fn apply(&self, card: &mut MaterialCard, input: SaveMaterialCard) -> AppResult<()> {
        card.name = require_text("name", &input.name, 200)?;
        card.description = normalize_optional(input.description);
        card.category_id = self.resolve_category(input.category_id).await?;
        card.material_type = input.material_type;
        card.unit_of_measure = require_text("unit_of_measure", &input.unit_of_measure, 20)?;
        card.set_unit_price(input.unit_price)?;
        card.stock_levels = StockLevels::new(input.min_stock_level, input.max_stock_level)?;
        card.barcode = normalize_optional(input.barcode);
        if let Some(status) = input.status {
            card.status = status;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for MaterialCardResource {
    type Entity = MaterialCard;
    type View = MaterialCardView;
    type Create = SaveMaterialCard;
    type Update = SaveMaterialCard;

    const RESOURCE: &'static str = "material-cards";

    fn lifecycle(&self) -> &CrudHandler<MaterialCard> {
        &self.cards
    }

    async fn create(&self, input: SaveMaterialCard, actor: &UserId) -> AppResult<MaterialCard> {
        let mut card = MaterialCard::new(
            require_text("code", &input.code, 50)?,
            String::new(),
            input.material_type,
            String::new(),
            Some(actor.clone()),
        );
        self.apply(&mut card, input).await?;

        let card = self.cards.create(card).await?;
        info!(material_id = %card.id, code = %card.code, "Material card created");
        Ok(card)
    }

    async fn update(
        &self,
        id: MaterialCardId,
        input: SaveMaterialCard,
        actor: &UserId,
    ) -> AppResult<MaterialCard> {
        let mut card = self.cards.get(&id).await?;
        card.code = require_text("code", &input.code, 50)?;
        self.apply(&mut card, input).await?;
        card.audit_info.update(Some(actor.clone()));

        self.cards.update(card).await
    }
}
