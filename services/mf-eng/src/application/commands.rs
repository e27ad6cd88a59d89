//! 请求命令

use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Deserialize;
use validator::Validate;

use crate::domain::BomHeaderId;

fn one() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveBomHeader {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub product_material_id: MaterialCardId,
    #[validate(length(min = 1, max = 20))]
    pub version: Option<String>,
    #[serde(default = "one")]
    pub base_quantity: Decimal,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBomItem {
    pub bom_header_id: BomHeaderId,
    pub component_material_id: MaterialCardId,
    pub quantity: Decimal,
    /// 缺省取组件物料的计量单位
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub scrap_rate: Decimal,
    #[serde(default)]
    pub sequence: i32,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub status: Option<DataStatus>,
}

/// 行所属的表头与组件不可修改
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBomItem {
    pub quantity: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
    #[serde(default)]
    pub scrap_rate: Decimal,
    #[serde(default)]
    pub sequence: i32,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub status: Option<DataStatus>,
}
