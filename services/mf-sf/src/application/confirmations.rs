//! 报工：创建即过账到工单

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{Record, require_text};
use erp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::{CreateConfirmation, UpdateConfirmation};
use crate::api::views::ConfirmationView;
use crate::domain::{
    ProductionConfirmation, ProductionConfirmationId, ProductionLedger, WorkOrder, WorkOrderOperation,
};

/// `/api/production-confirmations`
pub struct ConfirmationResource {
    confirmations: CrudHandler<ProductionConfirmation>,
    orders: CrudHandler<WorkOrder>,
    operations: CrudHandler<WorkOrderOperation>,
    ledger: Arc<dyn ProductionLedger>,
}

impl ConfirmationResource {
    pub fn new(
        confirmations: CrudHandler<ProductionConfirmation>,
        orders: CrudHandler<WorkOrder>,
        operations: CrudHandler<WorkOrderOperation>,
        ledger: Arc<dyn ProductionLedger>,
    ) -> Self {
        Self {
            confirmations,
            orders,
            operations,
            ledger,
        }
    }

    async fn ensure_unique(&self, confirmation: &ProductionConfirmation) -> AppResult<()> {
        for key in confirmation.unique_keys() {
            if self.confirmations.repository().is_taken(&key, None).await? {
                return Err(AppError::conflict(format!(
                    "{} with {} already exists",
                    ProductionConfirmation::NAME,
                    key.describe()
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for ConfirmationResource {
    type Entity = ProductionConfirmation;
    type View = ConfirmationView;
    type Create = CreateConfirmation;
    type Update = UpdateConfirmation;

    const RESOURCE: &'static str = "production-confirmations";

    fn lifecycle(&self) -> &CrudHandler<ProductionConfirmation> {
        &self.confirmations
    }

    async fn create(&self, input: CreateConfirmation, actor: &UserId) -> AppResult<ProductionConfirmation> {
        let order = self.orders.find(&input.work_order_id).await?.ok_or_else(|| {
            AppError::validation(format!("Work order {} does not exist", input.work_order_id))
        })?;
        if let Some(operation_id) = &input.operation_id {
            let operation = self.operations.find(operation_id).await?.ok_or_else(|| {
                AppError::validation(format!("Operation {} does not exist", operation_id))
            })?;
            if operation.work_order_id != order.id {
                return Err(AppError::validation(format!(
                    "Operation {} does not belong to work order {}",
                    operation.sequence, order.order_number
                )));
            }
        }

        let mut confirmation = ProductionConfirmation::new(
            require_text("confirmation_number", &input.confirmation_number, 50)?,
            order.id,
            input.confirmed_quantity,
            input.scrap_quantity,
            input.confirmation_date.unwrap_or_else(Utc::now),
            Some(actor.clone()),
        )?;
        confirmation.operation_id = input.operation_id;
        confirmation.notes = normalize_optional(input.notes);

        self.ensure_unique(&confirmation).await?;
        let order = self.ledger.confirm(&confirmation, actor).await?;

        info!(
            confirmation = %confirmation.confirmation_number,
            order = %order.order_number,
            produced = %order.produced_quantity,
            status = %order.status,
            "Production confirmation posted"
        );
        Ok(confirmation)
    }

    async fn update(
        &self,
        id: ProductionConfirmationId,
        input: UpdateConfirmation,
        actor: &UserId,
    ) -> AppResult<ProductionConfirmation> {
        let mut confirmation = self.confirmations.get(&id).await?;
        confirmation.notes = normalize_optional(input.notes);
        confirmation.audit_info.update(Some(actor.clone()));

        self.confirmations.update(confirmation).await
    }
}
