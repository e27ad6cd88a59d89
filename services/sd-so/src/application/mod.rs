//! 应用层

pub mod commands;
pub mod customer_orders;
pub mod customers;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;
use mdm_material::domain::MaterialCard;

pub use customer_orders::CustomerOrderResource;
pub use customers::CustomerResource;

use crate::domain::{Customer, CustomerOrder};

/// 销售模块的处理器集合
#[derive(Clone)]
pub struct SalesServices {
    pub customers: CrudHandler<Customer>,
    pub orders: CrudHandler<CustomerOrder>,
    pub materials: CrudHandler<MaterialCard>,
}

impl SalesServices {
    pub fn new(
        customers: Arc<dyn CrudRepository<Customer>>,
        orders: Arc<dyn CrudRepository<CustomerOrder>>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            customers: CrudHandler::new(customers),
            orders: CrudHandler::new(orders),
            materials,
        }
    }

    pub fn customer_resource(&self) -> CustomerResource {
        CustomerResource::new(self.customers.clone())
    }

    pub fn customer_order_resource(&self) -> CustomerOrderResource {
        CustomerOrderResource::new(
            self.orders.clone(),
            self.customers.clone(),
            self.materials.clone(),
        )
    }
}
