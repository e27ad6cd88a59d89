//! 响应体

use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use serde::Serialize;

use crate::domain::{Location, LocationId, Warehouse, WarehouseId};

#[derive(Debug, Clone, Serialize)]
pub struct WarehouseView {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Warehouse> for WarehouseView {
    fn from(warehouse: Warehouse) -> Self {
        Self {
            id: warehouse.id,
            code: warehouse.code,
            name: warehouse.name,
            address: warehouse.address,
            description: warehouse.description,
            capacity: warehouse.capacity,
            status: warehouse.status,
            audit: warehouse.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub id: LocationId,
    pub warehouse_id: WarehouseId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Location> for LocationView {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            warehouse_id: location.warehouse_id,
            code: location.code,
            name: location.name,
            description: location.description,
            capacity: location.capacity,
            status: location.status,
            audit: location.audit_info,
        }
    }
}
