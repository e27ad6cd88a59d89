//! 响应体

use chrono::{DateTime, Utc};
use erp_common::AuditInfo;
use erp_domain_core::Decimal;
use mdm_material::domain::MaterialCardId;
use mf_eng::domain::BomHeaderId;
use sc_wm::domain::{LocationId, WarehouseId};
use serde::Serialize;

use crate::domain::{
    MaterialConsumption, MaterialConsumptionId, OperationStatus, ProductionConfirmation,
    ProductionConfirmationId, WorkOrder, WorkOrderId, WorkOrderOperation, WorkOrderOperationId,
    WorkOrderStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct WorkOrderView {
    pub id: WorkOrderId,
    pub order_number: String,
    pub product_material_id: MaterialCardId,
    pub bom_header_id: Option<BomHeaderId>,
    pub planned_quantity: Decimal,
    pub produced_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub priority: i16,
    pub status: WorkOrderStatus,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<WorkOrder> for WorkOrderView {
    fn from(order: WorkOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            product_material_id: order.product_material_id,
            bom_header_id: order.bom_header_id,
            planned_quantity: order.planned_quantity,
            produced_quantity: order.produced_quantity,
            scrap_quantity: order.scrap_quantity,
            planned_start: order.planned_start,
            planned_end: order.planned_end,
            actual_start: order.actual_start,
            actual_end: order.actual_end,
            priority: order.priority,
            status: order.status,
            notes: order.notes,
            audit: order.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
    pub id: WorkOrderOperationId,
    pub work_order_id: WorkOrderId,
    pub sequence: i32,
    pub name: String,
    pub work_center: Option<String>,
    pub planned_minutes: i32,
    pub actual_minutes: i32,
    pub status: OperationStatus,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<WorkOrderOperation> for OperationView {
    fn from(operation: WorkOrderOperation) -> Self {
        Self {
            id: operation.id,
            work_order_id: operation.work_order_id,
            sequence: operation.sequence,
            name: operation.name,
            work_center: operation.work_center,
            planned_minutes: operation.planned_minutes,
            actual_minutes: operation.actual_minutes,
            status: operation.status,
            notes: operation.notes,
            audit: operation.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub id: ProductionConfirmationId,
    pub confirmation_number: String,
    pub work_order_id: WorkOrderId,
    pub operation_id: Option<WorkOrderOperationId>,
    pub confirmed_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub confirmation_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<ProductionConfirmation> for ConfirmationView {
    fn from(confirmation: ProductionConfirmation) -> Self {
        Self {
            id: confirmation.id,
            confirmation_number: confirmation.confirmation_number,
            work_order_id: confirmation.work_order_id,
            operation_id: confirmation.operation_id,
            confirmed_quantity: confirmation.confirmed_quantity,
            scrap_quantity: confirmation.scrap_quantity,
            confirmation_date: confirmation.confirmation_date,
            notes: confirmation.notes,
            audit: confirmation.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionView {
    pub id: MaterialConsumptionId,
    pub work_order_id: WorkOrderId,
    pub material_id: MaterialCardId,
    pub warehouse_id: WarehouseId,
    pub location_id: Option<LocationId>,
    pub quantity: Decimal,
    pub consumption_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<MaterialConsumption> for ConsumptionView {
    fn from(consumption: MaterialConsumption) -> Self {
        Self {
            id: consumption.id,
            work_order_id: consumption.work_order_id,
            material_id: consumption.material_id,
            warehouse_id: consumption.warehouse_id,
            location_id: consumption.location_id,
            quantity: consumption.quantity,
            consumption_date: consumption.consumption_date,
            notes: consumption.notes,
            audit: consumption.audit_info,
        }
    }
}
