//! 应用层

pub mod commands;
pub mod locations;
pub mod warehouses;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;

pub use locations::LocationResource;
pub use warehouses::WarehouseResource;

use crate::domain::{Location, Warehouse};

#[derive(Clone)]
pub struct WarehouseServices {
    pub warehouses: CrudHandler<Warehouse>,
    pub locations: CrudHandler<Location>,
}

impl WarehouseServices {
    pub fn new(
        warehouses: Arc<dyn CrudRepository<Warehouse>>,
        locations: Arc<dyn CrudRepository<Location>>,
    ) -> Self {
        Self {
            warehouses: CrudHandler::new(warehouses),
            locations: CrudHandler::new(locations),
        }
    }

    pub fn warehouse_resource(&self) -> WarehouseResource {
        WarehouseResource::new(self.warehouses.clone(), self.locations.clone())
    }

    pub fn location_resource(&self) -> LocationResource {
        LocationResource::new(self.locations.clone(), self.warehouses.clone())
    }
}
