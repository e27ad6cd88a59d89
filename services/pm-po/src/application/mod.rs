//! 应用层

pub mod commands;
pub mod purchase_orders;
pub mod supplier_types;
pub mod suppliers;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;
use mdm_material::domain::MaterialCard;

pub use purchase_orders::PurchaseOrderResource;
pub use supplier_types::SupplierTypeResource;
pub use suppliers::SupplierResource;

use crate::domain::{PurchaseOrder, Supplier, SupplierType};

/// 采购模块的处理器集合
#[derive(Clone)]
pub struct PurchasingServices {
    pub supplier_types: CrudHandler<SupplierType>,
    pub suppliers: CrudHandler<Supplier>,
    pub orders: CrudHandler<PurchaseOrder>,
    pub materials: CrudHandler<MaterialCard>,
}

impl PurchasingServices {
    pub fn new(
        supplier_types: Arc<dyn CrudRepository<SupplierType>>,
        suppliers: Arc<dyn CrudRepository<Supplier>>,
        orders: Arc<dyn CrudRepository<PurchaseOrder>>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            supplier_types: CrudHandler::new(supplier_types),
            suppliers: CrudHandler::new(suppliers),
            orders: CrudHandler::new(orders),
            materials,
        }
    }

    pub fn supplier_type_resource(&self) -> SupplierTypeResource {
        SupplierTypeResource::new(self.supplier_types.clone())
    }

    pub fn supplier_resource(&self) -> SupplierResource {
        SupplierResource::new(self.suppliers.clone(), self.supplier_types.clone())
    }

    pub fn purchase_order_resource(&self) -> PurchaseOrderResource {
        PurchaseOrderResource::new(
            self.orders.clone(),
            self.suppliers.clone(),
            self.materials.clone(),
        )
    }
}
