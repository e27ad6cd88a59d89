//! 物料与库存地点的引用校验

use erp_crud_core::CrudHandler;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::{MaterialCard, MaterialCardId};
use sc_wm::domain::{Location, LocationId, Warehouse, WarehouseId};

use crate::domain::StockPoint;

#[derive(Clone)]
pub struct MasterData {
    materials: CrudHandler<MaterialCard>,
    warehouses: CrudHandler<Warehouse>,
    locations: CrudHandler<Location>,
}

impl MasterData {
    pub fn new(
        materials: CrudHandler<MaterialCard>,
        warehouses: CrudHandler<Warehouse>,
        locations: CrudHandler<Location>,
    ) -> Self {
        Self {
            materials,
            warehouses,
            locations,
        }
    }

    /// 路径中引用的物料，不存在时 404
    pub async fn get_material(&self, id: &MaterialCardId) -> AppResult<MaterialCard> {
        self.materials.get(id).await
    }

    /// 请求体中引用的物料，不存在时 400
    pub async fn material(&self, id: &MaterialCardId) -> AppResult<MaterialCard> {
        self.materials
            .find(id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Material {} does not exist", id)))
    }

    /// 可入库的物料（服务类物料不计库存）
    pub async fn stocked_material(&self, id: &MaterialCardId) -> AppResult<MaterialCard> {
        let material = self.material(id).await?;
        if !material.material_type.is_stocked() {
            return Err(AppError::validation(format!(
                "Material {} is a {} and carries no stock",
                material.code, material.material_type
            )));
        }
        Ok(material)
    }

    /// 仓库须启用，库位须存在且属于该仓库
    pub async fn point(&self, warehouse_id: WarehouseId, location_id: LocationId) -> AppResult<StockPoint> {
        let warehouse = self.warehouses.find(&warehouse_id).await?.ok_or_else(|| {
            AppError::validation(format!("Warehouse {} does not exist", warehouse_id))
        })?;
        if !warehouse.is_active() {
            return Err(AppError::validation(format!(
                "Warehouse {} is not active",
                warehouse.code
            )));
        }

        let location = self.locations.find(&location_id).await?.ok_or_else(|| {
            AppError::validation(format!("Location {} does not exist", location_id))
        })?;
        if location.warehouse_id != warehouse_id {
            return Err(AppError::validation(format!(
                "Location {} does not belong to warehouse {}",
                location.code, warehouse.code
            )));
        }

        Ok(StockPoint::new(warehouse_id, location_id))
    }

    /// 来源或目标：仓库与库位须同时给出或同时省略
    pub async fn endpoint(
        &self,
        side: &str,
        warehouse_id: Option<WarehouseId>,
        location_id: Option<LocationId>,
    ) -> AppResult<Option<StockPoint>> {
        match (warehouse_id, location_id) {
            (Some(warehouse_id), Some(location_id)) => {
                self.point(warehouse_id, location_id).await.map(Some)
            }
            (None, None) => Ok(None),
            _ => Err(AppError::validation(format!(
                "{side}_warehouse_id and {side}_location_id must be given together"
            ))),
        }
    }
}
