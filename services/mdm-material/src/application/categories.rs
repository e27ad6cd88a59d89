//! 物料分类管理

use std::collections::HashSet;

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::{AppError, AppResult};
use uuid::Uuid;

use super::commands::SaveCategory;
use crate::api::views::MaterialCategoryView;
use crate::domain::{MaterialCategory, MaterialCategoryId};

/// `/api/material-categories`
pub struct CategoryResource {
    categories: CrudHandler<MaterialCategory>,
}

impl CategoryResource {
    pub fn new(categories: CrudHandler<MaterialCategory>) -> Self {
        Self { categories }
    }

    /// 父分类须存在，且沿父链向上不能回到自身
    async fn resolve_parent(
        &self,
        category: &MaterialCategoryId,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<MaterialCategoryId>> {
        let Some(parent_id) = parent_id.map(MaterialCategoryId::from_uuid) else {
            return Ok(None);
        };

        let mut visited = HashSet::new();
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if current == *category {
                return Err(AppError::validation(
                    "Category hierarchy must not contain cycles",
                ));
            }
            if !visited.insert(current) {
                break;
            }
            let node = self.categories.find(&current).await?.ok_or_else(|| {
                AppError::validation(format!("Parent category {} does not exist", current))
            })?;
            cursor = node.parent_id;
        }

        Ok(Some(parent_id))
    }
}

#[async_trait]
impl CrudResource for CategoryResource {
    type Entity = MaterialCategory;
    type View = MaterialCategoryView;
    type Create = SaveCategory;
    type Update = SaveCategory;

    const RESOURCE: &'static str = "material-categories";

    fn lifecycle(&self) -> &CrudHandler<MaterialCategory> {
        &self.categories
    }

    async fn create(&self, input: SaveCategory, actor: &UserId) -> AppResult<MaterialCategory> {
        let mut category = MaterialCategory::new(
            require_text("code", &input.code, 50)?,
            require_text("name", &input.name, 200)?,
            Some(actor.clone()),
        );
        category.description = normalize_optional(input.description);
        let parent = self.resolve_parent(&category.id, input.parent_id).await?;
        category.set_parent(parent)?;
        if let Some(status) = input.status {
            category.status = status;
        }

        self.categories.create(category).await
    }

    async fn update(
        &self,
        id: MaterialCategoryId,
        input: SaveCategory,
        actor: &UserId,
    ) -> AppResult<MaterialCategory> {
        let mut category = self.categories.get(&id).await?;
        category.code = require_text("code", &input.code, 50)?;
        category.name = require_text("name", &input.name, 200)?;
        category.description = normalize_optional(input.description);
        let parent = self.resolve_parent(&id, input.parent_id).await?;
        category.set_parent(parent)?;
        if let Some(status) = input.status {
            category.status = status;
        }
        category.audit_info.update(Some(actor.clone()));

        self.categories.update(category).await
    }
}
