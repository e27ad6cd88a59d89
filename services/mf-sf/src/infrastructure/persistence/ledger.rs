//! 基于行锁的报工过账

use async_trait::async_trait;
use erp_adapter_postgres::{PgRecord, TransactionManager, map_db_error};
use erp_common::UserId;
use erp_errors::{AppError, AppResult};
use tracing::debug;

use super::records::WorkOrderRow;
use crate::domain::{ProductionConfirmation, ProductionLedger, WorkOrder};

pub struct PgProductionLedger {
    transactions: TransactionManager,
}

impl PgProductionLedger {
    pub fn new(transactions: TransactionManager) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl ProductionLedger for PgProductionLedger {
    async fn confirm(&self, confirmation: &ProductionConfirmation, actor: &UserId) -> AppResult<WorkOrder> {
        let lock_sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
            WorkOrder::COLUMNS,
            WorkOrder::TABLE
        );

        let mut tx = self.transactions.begin().await?;

        let row = sqlx::query_as::<_, WorkOrderRow>(&lock_sql)
            .bind(confirmation.work_order_id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        let Some(row) = row else {
            return Err(AppError::validation(format!(
                "Work order {} does not exist",
                confirmation.work_order_id
            )));
        };
        let mut order = WorkOrder::from_row(row)?;

        order.record_confirmation(
            confirmation.confirmed_quantity,
            confirmation.scrap_quantity,
            confirmation.confirmation_date,
        )?;
        order.audit_info.update(Some(actor.clone()));
        order
            .update_query()
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        debug!(order = %order.order_number, produced = %order.produced_quantity, "Work order confirmed");

        confirmation
            .insert_query()
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        TransactionManager::commit(tx).await?;
        Ok(order)
    }
}
