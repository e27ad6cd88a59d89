//! 工序管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};

use super::commands::{CreateOperation, UpdateOperation};
use crate::api::views::OperationView;
use crate::domain::{WorkOrder, WorkOrderOperation, WorkOrderOperationId};

/// `/api/work-order-operations`
pub struct OperationResource {
    operations: CrudHandler<WorkOrderOperation>,
    orders: CrudHandler<WorkOrder>,
}

impl OperationResource {
    pub fn new(operations: CrudHandler<WorkOrderOperation>, orders: CrudHandler<WorkOrder>) -> Self {
        Self { operations, orders }
    }
}

#[async_trait]
impl CrudResource for OperationResource {
    type Entity = WorkOrderOperation;
    type View = OperationView;
    type Create = CreateOperation;
    type Update = UpdateOperation;

    const RESOURCE: &'static str = "work-order-operations";

    fn lifecycle(&self) -> &CrudHandler<WorkOrderOperation> {
        &self.operations
    }

    async fn create(&self, input: CreateOperation, actor: &UserId) -> AppResult<WorkOrderOperation> {
        let order = self.orders.find(&input.work_order_id).await?.ok_or_else(|| {
            AppError::validation(format!("Work order {} does not exist", input.work_order_id))
        })?;

        let mut operation = WorkOrderOperation::new(
            order.id,
            input.sequence,
            require_text("name", &input.name, 200)?,
            Some(actor.clone()),
        )?;
        operation.work_center = normalize_optional(input.work_center);
        operation.set_minutes(input.planned_minutes, input.actual_minutes)?;
        operation.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            operation.transition_to(status)?;
        }

        self.operations.create(operation).await
    }

    async fn update(
        &self,
        id: WorkOrderOperationId,
        input: UpdateOperation,
        actor: &UserId,
    ) -> AppResult<WorkOrderOperation> {
        let mut operation = self.operations.get(&id).await?;
        operation.set_sequence(input.sequence)?;
        operation.name = require_text("name", &input.name, 200)?;
        operation.work_center = normalize_optional(input.work_center);
        operation.set_minutes(input.planned_minutes, input.actual_minutes)?;
        operation.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            operation.transition_to(status)?;
        }
        operation.audit_info.update(Some(actor.clone()));

        self.operations.update(operation).await
    }
}
