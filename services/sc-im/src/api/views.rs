//! 响应体

use chrono::{DateTime, Utc};
use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use sc_wm::domain::{LocationId, WarehouseId};
use serde::Serialize;

use crate::domain::{MaterialMovement, MaterialMovementId, MovementType, StockEntry, StockEntryId};

#[derive(Debug, Clone, Serialize)]
pub struct StockEntryView {
    pub id: StockEntryId,
    pub material_id: MaterialCardId,
    pub warehouse_id: WarehouseId,
    pub location_id: LocationId,
    pub quantity: Decimal,
    pub reserved_quantity: Decimal,
    pub available_quantity: Decimal,
    pub unit_cost: Decimal,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<StockEntry> for StockEntryView {
    fn from(entry: StockEntry) -> Self {
        Self {
            available_quantity: entry.available_quantity(),
            id: entry.id,
            material_id: entry.material_id,
            warehouse_id: entry.point.warehouse_id,
            location_id: entry.point.location_id,
            quantity: entry.quantity,
            reserved_quantity: entry.reserved_quantity,
            unit_cost: entry.unit_cost,
            status: entry.status,
            audit: entry.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialMovementView {
    pub id: MaterialMovementId,
    pub movement_number: String,
    pub material_id: MaterialCardId,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub source_warehouse_id: Option<WarehouseId>,
    pub source_location_id: Option<LocationId>,
    pub target_warehouse_id: Option<WarehouseId>,
    pub target_location_id: Option<LocationId>,
    pub movement_date: DateTime<Utc>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<MaterialMovement> for MaterialMovementView {
    fn from(movement: MaterialMovement) -> Self {
        Self {
            id: movement.id,
            movement_number: movement.movement_number,
            material_id: movement.material_id,
            movement_type: movement.movement_type,
            quantity: movement.quantity,
            source_warehouse_id: movement.source.map(|p| p.warehouse_id),
            source_location_id: movement.source.map(|p| p.location_id),
            target_warehouse_id: movement.target.map(|p| p.warehouse_id),
            target_location_id: movement.target.map(|p| p.location_id),
            movement_date: movement.movement_date,
            reference: movement.reference,
            description: movement.description,
            status: movement.status,
            audit: movement.audit_info,
        }
    }
}

/// 单个仓库内的库存合计
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseStockView {
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub reserved_quantity: Decimal,
    pub available_quantity: Decimal,
    /// 有台账的库位数
    pub locations: u32,
}

impl WarehouseStockView {
    pub fn empty(warehouse_id: WarehouseId) -> Self {
        Self {
            warehouse_id,
            quantity: Decimal::ZERO,
            reserved_quantity: Decimal::ZERO,
            available_quantity: Decimal::ZERO,
            locations: 0,
        }
    }
}

/// `GET /api/material-cards/{id}/stock`
#[derive(Debug, Clone, Serialize)]
pub struct MaterialStockView {
    pub material_id: MaterialCardId,
    pub material_code: String,
    pub unit_of_measure: String,
    pub total_quantity: Decimal,
    pub reserved_quantity: Decimal,
    pub available_quantity: Decimal,
    pub warehouses: Vec<WarehouseStockView>,
}
