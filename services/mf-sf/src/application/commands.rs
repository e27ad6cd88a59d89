//! 请求命令

use chrono::{DateTime, Utc};
use erp_domain_core::Decimal;
use mdm_material::domain::MaterialCardId;
use mf_eng::domain::BomHeaderId;
use sc_wm::domain::{LocationId, WarehouseId};
use serde::Deserialize;
use validator::Validate;

use crate::domain::{DEFAULT_PRIORITY, OperationStatus, WorkOrderId, WorkOrderOperationId, WorkOrderStatus};

fn default_priority() -> i16 {
    DEFAULT_PRIORITY
}

/// 产出与报废数量、实际起止时间由报工维护
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveWorkOrder {
    #[validate(length(min = 1, max = 50))]
    pub order_number: String,
    pub product_material_id: MaterialCardId,
    pub bom_header_id: Option<BomHeaderId>,
    pub planned_quantity: Decimal,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    #[serde(default = "default_priority")]
    pub priority: i16,
    pub status: Option<WorkOrderStatus>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOperation {
    pub work_order_id: WorkOrderId,
    pub sequence: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub work_center: Option<String>,
    #[serde(default)]
    pub planned_minutes: i32,
    #[serde(default)]
    pub actual_minutes: i32,
    pub status: Option<OperationStatus>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// 工序所属工单不可修改
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOperation {
    pub sequence: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub work_center: Option<String>,
    #[serde(default)]
    pub planned_minutes: i32,
    #[serde(default)]
    pub actual_minutes: i32,
    pub status: Option<OperationStatus>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConfirmation {
    #[validate(length(min = 1, max = 50))]
    pub confirmation_number: String,
    pub work_order_id: WorkOrderId,
    pub operation_id: Option<WorkOrderOperationId>,
    pub confirmed_quantity: Decimal,
    #[serde(default)]
    pub scrap_quantity: Decimal,
    pub confirmation_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// 已过账的报工只允许修改说明
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateConfirmation {
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConsumption {
    pub work_order_id: WorkOrderId,
    pub material_id: MaterialCardId,
    pub warehouse_id: WarehouseId,
    pub location_id: Option<LocationId>,
    pub quantity: Decimal,
    pub consumption_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateConsumption {
    pub quantity: Decimal,
    pub consumption_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
