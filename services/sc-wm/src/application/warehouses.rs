//! 仓库管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::AppResult;

use super::commands::SaveWarehouse;
use crate::api::views::WarehouseView;
use crate::domain::{Location, Warehouse, WarehouseId};

/// `/api/warehouses`
pub struct WarehouseResource {
    warehouses: CrudHandler<Warehouse>,
    locations: CrudHandler<Location>,
}

impl WarehouseResource {
    pub fn new(warehouses: CrudHandler<Warehouse>, locations: CrudHandler<Location>) -> Self {
        Self {
            warehouses,
            locations,
        }
    }

    /// 仓库下未删除的库位，按编码排序
    pub async fn locations_of(&self, id: &WarehouseId) -> AppResult<Vec<Location>> {
        let warehouse = self.warehouses.get(id).await?;
        let mut locations = self
            .locations
            .children("warehouse_id", warehouse.id.as_uuid())
            .await?;
        locations.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(locations)
    }

    fn apply(warehouse: &mut Warehouse, input: SaveWarehouse) -> AppResult<()> {
        warehouse.code = require_text("code", &input.code, 50)?;
        warehouse.name = require_text("name", &input.name, 200)?;
        warehouse.address = normalize_optional(input.address);
        warehouse.description = normalize_optional(input.description);
        warehouse.set_capacity(input.capacity)?;
        if let Some(status) = input.status {
            warehouse.status = status;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for WarehouseResource {
    type Entity = Warehouse;
    type View = WarehouseView;
    type Create = SaveWarehouse;
    type Update = SaveWarehouse;

    const RESOURCE: &'static str = "warehouses";

    fn lifecycle(&self) -> &CrudHandler<Warehouse> {
        &self.warehouses
    }

    async fn create(&self, input: SaveWarehouse, actor: &UserId) -> AppResult<Warehouse> {
        let mut warehouse = Warehouse::new(String::new(), String::new(), Some(actor.clone()));
        Self::apply(&mut warehouse, input)?;

        self.warehouses.create(warehouse).await
    }

    async fn update(
        &self,
        id: WarehouseId,
        input: SaveWarehouse,
        actor: &UserId,
    ) -> AppResult<Warehouse> {
        let mut warehouse = self.warehouses.get(&id).await?;
        Self::apply(&mut warehouse, input)?;
        warehouse.audit_info.update(Some(actor.clone()));

        self.warehouses.update(warehouse).await
    }
}
