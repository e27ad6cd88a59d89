//! 供应商类型管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::AppResult;

use super::commands::SaveSupplierType;
use crate::api::views::SupplierTypeView;
use crate::domain::{SupplierType, SupplierTypeId};

/// `/api/supplier-types`
pub struct SupplierTypeResource {
    types: CrudHandler<SupplierType>,
}

impl SupplierTypeResource {
    pub fn new(types: CrudHandler<SupplierType>) -> Self {
        Self { types }
    }
}

#[async_trait]
impl CrudResource for SupplierTypeResource {
    type Entity = SupplierType;
    type View = SupplierTypeView;
    type Create = SaveSupplierType;
    type Update = SaveSupplierType;

    const RESOURCE: &'static str = "supplier-types";

    fn lifecycle(&self) -> &CrudHandler<SupplierType> {
        &self.types
    }

    async fn create(&self, input: SaveSupplierType, actor: &UserId) -> AppResult<SupplierType> {
        let mut supplier_type = SupplierType::new(
            require_text("code", &input.code, 50)?,
            require_text("name", &input.name, 200)?,
            Some(actor.clone()),
        );
        supplier_type.description = normalize_optional(input.description);
        if let Some(status) = input.status {
            supplier_type.status = status;
        }

        self.types.create(supplier_type).await
    }

    async fn update(
        &self,
        id: SupplierTypeId,
        input: SaveSupplierType,
        actor: &UserId,
    ) -> AppResult<SupplierType> {
        let mut supplier_type = self.types.get(&id).await?;
        supplier_type.code = require_text("code", &input.code, 50)?;
        supplier_type.name = require_text("name", &input.name, 200)?;
        supplier_type.description = normalize_optional(input.description);
        if let Some(status) = input.status {
            supplier_type.status = status;
        }
        supplier_type.audit_info.update(Some(actor.clone()));

        self.types.update(supplier_type).await
    }
}
