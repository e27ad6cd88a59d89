//! 请求命令

use chrono::{DateTime, Utc};
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use sc_wm::domain::{LocationId, WarehouseId};
use serde::Deserialize;
use validator::Validate;

use crate::domain::MovementType;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStockEntry {
    pub material_id: MaterialCardId,
    pub warehouse_id: WarehouseId,
    pub location_id: LocationId,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub reserved_quantity: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
    pub status: Option<DataStatus>,
}

/// 台账的物料与库存地点不可修改
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStockEntry {
    pub quantity: Decimal,
    #[serde(default)]
    pub reserved_quantity: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovement {
    #[validate(length(min = 1, max = 50))]
    pub movement_number: String,
    pub material_id: MaterialCardId,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub source_warehouse_id: Option<WarehouseId>,
    pub source_location_id: Option<LocationId>,
    pub target_warehouse_id: Option<WarehouseId>,
    pub target_location_id: Option<LocationId>,
    pub movement_date: Option<DateTime<Utc>>,
    #[validate(length(max = 100))]
    pub reference: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// 已过账的移动只允许修改说明性字段
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMovement {
    pub movement_date: Option<DateTime<Utc>>,
    #[validate(length(max = 100))]
    pub reference: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
