//! 请求命令（创建与更新共用）

use erp_domain_core::{DataStatus, Decimal};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::MaterialType;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveCategory {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveMaterialCard {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub material_type: MaterialType,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub min_stock_level: Decimal,
    pub max_stock_level: Option<Decimal>,
    #[validate(length(min = 1, max = 100))]
    pub barcode: Option<String>,
    pub status: Option<DataStatus>,
}
