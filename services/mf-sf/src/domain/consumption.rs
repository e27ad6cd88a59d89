//! 工单领料记录

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{Decimal, EntityId, Record, UniqueKey, ensure_positive, entity_id, impl_aggregate_root};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;
use sc_wm::domain::{LocationId, WarehouseId};
use uuid::Uuid;

use super::work_order::WorkOrderId;

entity_id!(MaterialConsumptionId);

/// 只记录消耗，不过账库存
#[derive(Debug, Clone)]
pub struct MaterialConsumption {
    pub id: MaterialConsumptionId,
    pub work_order_id: WorkOrderId,
    pub material_id: MaterialCardId,
    pub warehouse_id: WarehouseId,
    pub location_id: Option<LocationId>,
    pub quantity: Decimal,
    pub consumption_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(MaterialConsumption, MaterialConsumptionId);

impl MaterialConsumption {
    pub fn new(
        work_order_id: WorkOrderId,
        material_id: MaterialCardId,
        warehouse_id: WarehouseId,
        consumption_date: DateTime<Utc>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: MaterialConsumptionId::new(),
            work_order_id,
            material_id,
            warehouse_id,
            location_id: None,
            quantity: Decimal::ZERO,
            consumption_date,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_quantity(&mut self, quantity: Decimal) -> AppResult<()> {
        ensure_positive("quantity", quantity)?;
        self.quantity = quantity;
        Ok(())
    }
}

impl Record for MaterialConsumption {
    const NAME: &'static str = "MaterialConsumption";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        let mut refs = vec![
            ("work_order_id", self.work_order_id.as_uuid()),
            ("material_id", self.material_id.as_uuid()),
            ("warehouse_id", self.warehouse_id.as_uuid()),
        ];
        if let Some(location) = self.location_id {
            refs.push(("location_id", location.as_uuid()));
        }
        refs
    }

    fn search_text(&self) -> Vec<&str> {
        self.notes.as_deref().into_iter().collect()
    }
}
