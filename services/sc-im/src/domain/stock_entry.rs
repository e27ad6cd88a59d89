//! 库存台账

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, EntityId, Record, UniqueKey, checked_sum, ensure_non_negative,
    entity_id, impl_aggregate_root,
};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use sc_wm::domain::{LocationId, WarehouseId};
use uuid::Uuid;

entity_id!(StockEntryId);

/// 库存地点：仓库 + 库位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StockPoint {
    pub warehouse_id: WarehouseId,
    pub location_id: LocationId,
}

impl StockPoint {
    pub fn new(warehouse_id: WarehouseId, location_id: LocationId) -> Self {
        Self {
            warehouse_id,
            location_id,
        }
    }
}

/// 某物料在某库位上的数量
///
/// 不变量：`0 <= reserved_quantity <= quantity`，`unit_cost >= 0`。
#[derive(Debug, Clone)]
pub struct StockEntry {
    pub id: StockEntryId,
    pub material_id: MaterialCardId,
    pub point: StockPoint,
    pub quantity: Decimal,
    pub reserved_quantity: Decimal,
    pub unit_cost: Decimal,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(StockEntry, StockEntryId);

impl StockEntry {
    /// 数量为零的新台账
    pub fn empty(material_id: MaterialCardId, point: StockPoint, created_by: Option<UserId>) -> Self {
        Self {
            id: StockEntryId::new(),
            material_id,
            point,
            quantity: Decimal::ZERO,
            reserved_quantity: Decimal::ZERO,
            unit_cost: Decimal::ZERO,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    /// 设置数量、预留与单位成本
    pub fn set_quantities(
        &mut self,
        quantity: Decimal,
        reserved_quantity: Decimal,
        unit_cost: Decimal,
    ) -> AppResult<()> {
        ensure_non_negative("quantity", quantity)?;
        ensure_non_negative("reserved_quantity", reserved_quantity)?;
        ensure_non_negative("unit_cost", unit_cost)?;
        if reserved_quantity > quantity {
            return Err(AppError::validation(format!(
                "reserved_quantity ({}) must not exceed quantity ({})",
                reserved_quantity, quantity
            )));
        }
        self.quantity = quantity;
        self.reserved_quantity = reserved_quantity;
        self.unit_cost = unit_cost;
        Ok(())
    }

    pub fn available_quantity(&self) -> Decimal {
        self.quantity - self.reserved_quantity
    }

    /// 过账一笔增减，减少后不得为负或低于预留量
    pub fn apply_delta(&mut self, delta: Decimal, actor: &UserId) -> AppResult<()> {
        if self.audit_info.is_deleted {
            return Err(AppError::conflict(format!(
                "Stock entry {} is deleted and must be restored before posting",
                self.id
            )));
        }
        let quantity = checked_sum("quantity", self.quantity, delta)?;
        if quantity < Decimal::ZERO {
            return Err(AppError::conflict(format!(
                "Insufficient stock: {} on hand, {} requested",
                self.quantity, -delta
            )));
        }
        if quantity < self.reserved_quantity {
            return Err(AppError::conflict(format!(
                "Movement would leave {} below reserved quantity {}",
                quantity, self.reserved_quantity
            )));
        }
        self.quantity = quantity;
        self.audit_info.update(Some(actor.clone()));
        Ok(())
    }

    pub fn stock_key(&self) -> UniqueKey {
        stock_key(self.material_id, self.point)
    }
}

/// 台账唯一键（物料、仓库、库位）
pub fn stock_key(material_id: MaterialCardId, point: StockPoint) -> UniqueKey {
    UniqueKey {
        fields: vec![
            ("material_id", material_id.as_uuid().to_string()),
            ("warehouse_id", point.warehouse_id.as_uuid().to_string()),
            ("location_id", point.location_id.as_uuid().to_string()),
        ],
    }
}

impl Record for StockEntry {
    const NAME: &'static str = "StockEntry";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![self.stock_key()]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![
            ("material_id", self.material_id.as_uuid()),
            ("warehouse_id", self.point.warehouse_id.as_uuid()),
            ("location_id", self.point.location_id.as_uuid()),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: i64, reserved: i64) -> StockEntry {
        let mut entry = StockEntry::empty(
            MaterialCardId::new(),
            StockPoint::new(WarehouseId::new(), LocationId::new()),
            None,
        );
        entry
            .set_quantities(Decimal::new(quantity, 0), Decimal::new(reserved, 0), Decimal::ZERO)
            .unwrap();
        entry
    }

    #[test]
    fn test_reserved_cannot_exceed_quantity() {
        let mut stock = entry(10, 0);
        assert!(
            stock
                .set_quantities(Decimal::new(5, 0), Decimal::new(6, 0), Decimal::ZERO)
                .is_err()
        );
        assert!(
            stock
                .set_quantities(Decimal::new(5, 0), Decimal::ZERO, Decimal::new(-1, 0))
                .is_err()
        );
        assert_eq!(stock.available_quantity(), Decimal::new(10, 0));
    }

    #[test]
    fn test_delta_guards() {
        let actor = UserId::new();
        let mut stock = entry(10, 4);

        stock.apply_delta(Decimal::new(-6, 0), &actor).unwrap();
        assert_eq!(stock.quantity, Decimal::new(4, 0));

        let err = stock.apply_delta(Decimal::new(-1, 0), &actor).unwrap_err();
        assert_eq!(err.status_code(), 409);

        let mut empty = entry(0, 0);
        assert!(empty.apply_delta(Decimal::new(-1, 0), &actor).is_err());
        empty.apply_delta(Decimal::new(25, 1), &actor).unwrap();
        assert_eq!(empty.quantity, Decimal::new(25, 1));

        let mut full = entry(0, 0);
        full.quantity = erp_domain_core::MAX_AMOUNT;
        let err = full.apply_delta(Decimal::ONE, &actor).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(full.quantity, erp_domain_core::MAX_AMOUNT);
    }

    #[test]
    fn test_deleted_entry_rejects_posting() {
        let mut stock = entry(1, 0);
        stock.audit_info.is_deleted = true;
        assert!(stock.apply_delta(Decimal::ONE, &UserId::new()).is_err());
    }
}
