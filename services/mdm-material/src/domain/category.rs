//! 物料分类

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{DataStatus, EntityId, Record, UniqueKey, entity_id, impl_aggregate_root};
use erp_errors::{AppError, AppResult};
use uuid::Uuid;

entity_id!(
    /// 物料分类 ID
    MaterialCategoryId
);

/// 物料分类，通过 `parent_id` 形成树
#[derive(Debug, Clone)]
pub struct MaterialCategory {
    pub id: MaterialCategoryId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<MaterialCategoryId>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(MaterialCategory, MaterialCategoryId);

impl MaterialCategory {
    pub fn new(code: String, name: String, created_by: Option<UserId>) -> Self {
        Self {
            id: MaterialCategoryId::new(),
            code,
            name,
            description: None,
            parent_id: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    /// 设置父分类，不允许指向自身
    pub fn set_parent(&mut self, parent_id: Option<MaterialCategoryId>) -> AppResult<()> {
        if parent_id == Some(self.id) {
            return Err(AppError::validation("Category cannot be its own parent"));
        }
        self.parent_id = parent_id;
        Ok(())
    }
}

impl Record for MaterialCategory {
    const NAME: &'static str = "MaterialCategory";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        self.parent_id
            .iter()
            .map(|parent| ("parent_id", parent.as_uuid()))
            .collect()
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.description.as_deref());
        text
    }
}
