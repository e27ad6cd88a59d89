//! 车间执行领域模型

mod confirmation;
mod consumption;
mod operation;
mod production;
mod work_order;

pub use confirmation::{ProductionConfirmation, ProductionConfirmationId};
pub use consumption::{MaterialConsumption, MaterialConsumptionId};
pub use operation::{OperationStatus, WorkOrderOperation, WorkOrderOperationId};
pub use production::ProductionLedger;
pub use work_order::{DEFAULT_PRIORITY, WorkOrder, WorkOrderId, WorkOrderStatus};
