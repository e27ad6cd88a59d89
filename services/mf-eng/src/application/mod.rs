//! 应用层

pub mod commands;
pub mod headers;
pub mod items;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;
use mdm_material::domain::MaterialCard;

pub use headers::BomHeaderResource;
pub use items::BomItemResource;

use crate::domain::{BomHeader, BomItem};

/// 工程模块的处理器集合
#[derive(Clone)]
pub struct EngineeringServices {
    pub headers: CrudHandler<BomHeader>,
    pub items: CrudHandler<BomItem>,
    pub materials: CrudHandler<MaterialCard>,
}

impl EngineeringServices {
    pub fn new(
        headers: Arc<dyn CrudRepository<BomHeader>>,
        items: Arc<dyn CrudRepository<BomItem>>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            headers: CrudHandler::new(headers),
            items: CrudHandler::new(items),
            materials,
        }
    }

    pub fn header_resource(&self) -> BomHeaderResource {
        BomHeaderResource::new(self.headers.clone(), self.items.clone(), self.materials.clone())
    }

    pub fn item_resource(&self) -> BomItemResource {
        BomItemResource::new(self.items.clone(), self.headers.clone(), self.materials.clone())
    }
}
