//! 工单引用的主数据校验

use erp_crud_core::CrudHandler;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::{MaterialCard, MaterialCardId};
use mf_eng::domain::{BomHeader, BomHeaderId};
use sc_wm::domain::{Location, LocationId, Warehouse, WarehouseId};

#[derive(Clone)]
pub struct MasterData {
    materials: CrudHandler<MaterialCard>,
    boms: CrudHandler<BomHeader>,
    warehouses: CrudHandler<Warehouse>,
    locations: CrudHandler<Location>,
}

impl MasterData {
    pub fn new(
        materials: CrudHandler<MaterialCard>,
        boms: CrudHandler<BomHeader>,
        warehouses: CrudHandler<Warehouse>,
        locations: CrudHandler<Location>,
    ) -> Self {
        Self {
            materials,
            boms,
            warehouses,
            locations,
        }
    }

    pub async fn material(&self, id: &MaterialCardId) -> AppResult<MaterialCard> {
        self.materials
            .find(id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Material {} does not exist", id)))
    }

    /// BOM 须启用且产出给定物料
    pub async fn bom_for(&self, id: &BomHeaderId, product: &MaterialCard) -> AppResult<BomHeader> {
        let bom = self
            .boms
            .find(id)
            .await?
            .ok_or_else(|| AppError::validation(format!("BOM header {} does not exist", id)))?;
        if !bom.is_active() {
            return Err(AppError::validation(format!("BOM header {} is not active", bom.code)));
        }
        if bom.product_material_id != product.id {
            return Err(AppError::validation(format!(
                "BOM {} does not produce material {}",
                bom.code, product.code
            )));
        }
        Ok(bom)
    }

    /// 库位可省略，给出时须属于该仓库
    pub async fn storage(&self, warehouse_id: &WarehouseId, location_id: Option<&LocationId>) -> AppResult<()> {
        let warehouse = self.warehouses.find(warehouse_id).await?.ok_or_else(|| {
            AppError::validation(format!("Warehouse {} does not exist", warehouse_id))
        })?;

        let Some(location_id) = location_id else {
            return Ok(());
        };
        let location = self.locations.find(location_id).await?.ok_or_else(|| {
            AppError::validation(format!("Location {} does not exist", location_id))
        })?;
        if location.warehouse_id != warehouse.id {
            return Err(AppError::validation(format!(
                "Location {} does not belong to warehouse {}",
                location.code, warehouse.code
            )));
        }
        Ok(())
    }
}
