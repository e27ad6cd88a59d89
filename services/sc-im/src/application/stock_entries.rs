//! 库存台账管理与物料库存汇总

use std::collections::BTreeMap;

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::UserId;
use erp_crud_core::CrudHandler;
use erp_domain_core::{Decimal, EntityId};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;

use super::commands::{CreateStockEntry, UpdateStockEntry};
use super::master_data::MasterData;
use crate::api::views::{MaterialStockView, StockEntryView, WarehouseStockView};
use crate::domain::{StockEntry, StockEntryId};

/// `/api/stock-entries`
pub struct StockEntryResource {
    entries: CrudHandler<StockEntry>,
    master: MasterData,
}

impl StockEntryResource {
    pub fn new(entries: CrudHandler<StockEntry>, master: MasterData) -> Self {
        Self { entries, master }
    }

    /// 物料在各仓库的库存合计
    pub async fn material_stock(&self, material_id: &MaterialCardId) -> AppResult<MaterialStockView> {
        let material = self.master.get_material(material_id).await?;
        let entries = self
            .entries
            .children("material_id", material.id.as_uuid())
            .await?;

        let mut per_warehouse: BTreeMap<_, WarehouseStockView> = BTreeMap::new();
        for entry in &entries {
            let row = per_warehouse
                .entry(entry.point.warehouse_id)
                .or_insert_with(|| WarehouseStockView::empty(entry.point.warehouse_id));
            row.quantity += entry.quantity;
            row.reserved_quantity += entry.reserved_quantity;
            row.available_quantity += entry.available_quantity();
            row.locations += 1;
        }

        let warehouses: Vec<WarehouseStockView> = per_warehouse.into_values().collect();
        let total_quantity: Decimal = warehouses.iter().map(|w| w.quantity).sum();
        let reserved_quantity: Decimal = warehouses.iter().map(|w| w.reserved_quantity).sum();
        let available_quantity: Decimal = warehouses.iter().map(|w| w.available_quantity).sum();

        Ok(MaterialStockView {
            material_id: material.id,
            material_code: material.code,
            unit_of_measure: material.unit_of_measure,
            total_quantity,
            reserved_quantity,
            available_quantity,
            warehouses,
        })
    }
}

#[async_trait]
impl CrudResource for StockEntryResource {
    type Entity = StockEntry;
    type View = StockEntryView;
    type Create = CreateStockEntry;
    type Update = UpdateStockEntry;

    const RESOURCE: &'static str = "stock-entries";

    fn lifecycle(&self) -> &CrudHandler<StockEntry> {
        &self.entries
    }

    async fn create(&self, input: CreateStockEntry, actor: &UserId) -> AppResult<StockEntry> {
        let material = self.master.stocked_material(&input.material_id).await?;
        let point = self.master.point(input.warehouse_id, input.location_id).await?;

        let mut entry = StockEntry::empty(material.id, point, Some(actor.clone()));
        entry.set_quantities(input.quantity, input.reserved_quantity, input.unit_cost)?;
        if let Some(status) = input.status {
            entry.status = status;
        }

        self.entries.create(entry).await
    }

    async fn update(
        &self,
        id: StockEntryId,
        input: UpdateStockEntry,
        actor: &UserId,
    ) -> AppResult<StockEntry> {
        // 与移动过账共用行锁，避免覆盖期间过账的数量
        self.entries
            .modify(&id, |entry| {
                entry.set_quantities(input.quantity, input.reserved_quantity, input.unit_cost)?;
                if let Some(status) = input.status {
                    entry.status = status;
                }
                entry.audit_info.update(Some(actor.clone()));
                Ok(())
            })
            .await
    }
}
