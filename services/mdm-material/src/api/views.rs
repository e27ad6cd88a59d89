//! 响应体

use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use serde::Serialize;

use crate::domain::{MaterialCard, MaterialCardId, MaterialCategory, MaterialCategoryId, MaterialType};

#[derive(Debug, Clone, Serialize)]
pub struct MaterialCategoryView {
    pub id: MaterialCategoryId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<MaterialCategoryId>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<MaterialCategory> for MaterialCategoryView {
    fn from(category: MaterialCategory) -> Self {
        Self {
            id: category.id,
            code: category.code,
            name: category.name,
            description: category.description,
            parent_id: category.parent_id,
            status: category.status,
            audit: category.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialCardView {
    pub id: MaterialCardId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<MaterialCategoryId>,
    pub material_type: MaterialType,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub min_stock_level: Decimal,
    pub max_stock_level: Option<Decimal>,
    pub barcode: Option<String>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<MaterialCard> for MaterialCardView {
    fn from(card: MaterialCard) -> Self {
        Self {
            id: card.id,
            code: card.code,
            name: card.name,
            description: card.description,
            category_id: card.category_id,
            material_type: card.material_type,
            unit_of_measure: card.unit_of_measure,
            unit_price: card.unit_price,
            min_stock_level: card.stock_levels.min,
            max_stock_level: card.stock_levels.max,
            barcode: card.barcode,
            status: card.status,
            audit: card.audit_info,
        }
    }
}
