//! 仓库与库位

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, EntityId, Record, UniqueKey, ensure_non_negative_opt, entity_id,
    impl_aggregate_root,
};
use erp_errors::AppResult;
use uuid::Uuid;

entity_id!(WarehouseId);
entity_id!(LocationId);

#[derive(Debug, Clone)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(Warehouse, WarehouseId);

impl Warehouse {
    pub fn new(code: String, name: String, created_by: Option<UserId>) -> Self {
        Self {
            id: WarehouseId::new(),
            code,
            name,
            address: None,
            description: None,
            capacity: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_capacity(&mut self, capacity: Option<Decimal>) -> AppResult<()> {
        ensure_non_negative_opt("capacity", capacity)?;
        self.capacity = capacity;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

impl Record for Warehouse {
    const NAME: &'static str = "Warehouse";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.address.as_deref());
        text.extend(self.description.as_deref());
        text
    }
}

/// 库位，编码在所属仓库内唯一
#[derive(Debug, Clone)]
pub struct Location {
    pub id: LocationId,
    pub warehouse_id: WarehouseId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(Location, LocationId);

impl Location {
    pub fn new(
        warehouse_id: WarehouseId,
        code: String,
        name: String,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: LocationId::new(),
            warehouse_id,
            code,
            name,
            description: None,
            capacity: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_capacity(&mut self, capacity: Option<Decimal>) -> AppResult<()> {
        ensure_non_negative_opt("capacity", capacity)?;
        self.capacity = capacity;
        Ok(())
    }
}

impl Record for Location {
    const NAME: &'static str = "Location";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::pair(
            ("warehouse_id", self.warehouse_id.as_uuid()),
            ("code", &self.code),
        )]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![("warehouse_id", self.warehouse_id.as_uuid())]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.description.as_deref());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_must_not_be_negative() {
        let mut warehouse = Warehouse::new("WH-01".to_string(), "Main".to_string(), None);
        assert!(warehouse.set_capacity(Some(Decimal::new(-5, 0))).is_err());
        warehouse.set_capacity(None).unwrap();
        warehouse.set_capacity(Some(Decimal::new(1000, 0))).unwrap();
        assert_eq!(warehouse.capacity, Some(Decimal::new(1000, 0)));
    }

    #[test]
    fn test_location_code_is_scoped_to_warehouse() {
        let a = Location::new(WarehouseId::new(), "A-01".to_string(), "Rack A".to_string(), None);
        let b = Location::new(WarehouseId::new(), "A-01".to_string(), "Rack A".to_string(), None);
        assert_ne!(a.unique_keys(), b.unique_keys());
        assert!(!b.has_key(&a.unique_keys()[0]));
    }
}
