//! 应用层

pub mod commands;
pub mod confirmations;
pub mod consumptions;
pub mod master_data;
pub mod operations;
pub mod work_orders;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;

pub use confirmations::ConfirmationResource;
pub use consumptions::ConsumptionResource;
pub use master_data::MasterData;
pub use operations::OperationResource;
pub use work_orders::WorkOrderResource;

use crate::domain::{
    MaterialConsumption, ProductionConfirmation, ProductionLedger, WorkOrder, WorkOrderOperation,
};

/// 车间执行模块的处理器集合
#[derive(Clone)]
pub struct ShopFloorServices {
    pub work_orders: CrudHandler<WorkOrder>,
    pub operations: CrudHandler<WorkOrderOperation>,
    pub confirmations: CrudHandler<ProductionConfirmation>,
    pub consumptions: CrudHandler<MaterialConsumption>,
    pub ledger: Arc<dyn ProductionLedger>,
    pub master: MasterData,
}

impl ShopFloorServices {
    pub fn new(
        work_orders: Arc<dyn CrudRepository<WorkOrder>>,
        operations: Arc<dyn CrudRepository<WorkOrderOperation>>,
        confirmations: Arc<dyn CrudRepository<ProductionConfirmation>>,
        consumptions: Arc<dyn CrudRepository<MaterialConsumption>>,
        ledger: Arc<dyn ProductionLedger>,
        master: MasterData,
    ) -> Self {
        Self {
            work_orders: CrudHandler::new(work_orders),
            operations: CrudHandler::new(operations),
            confirmations: CrudHandler::new(confirmations),
            consumptions: CrudHandler::new(consumptions),
            ledger,
            master,
        }
    }

    pub fn work_order_resource(&self) -> WorkOrderResource {
        WorkOrderResource::new(self.work_orders.clone(), self.operations.clone(), self.master.clone())
    }

    pub fn operation_resource(&self) -> OperationResource {
        OperationResource::new(self.operations.clone(), self.work_orders.clone())
    }

    pub fn confirmation_resource(&self) -> ConfirmationResource {
        ConfirmationResource::new(
            self.confirmations.clone(),
            self.work_orders.clone(),
            self.operations.clone(),
            self.ledger.clone(),
        )
    }

    pub fn consumption_resource(&self) -> ConsumptionResource {
        ConsumptionResource::new(self.consumptions.clone(), self.work_orders.clone(), self.master.clone())
    }
}
