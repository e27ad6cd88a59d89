//! 基于行锁的库存过账

use async_trait::async_trait;
use erp_adapter_postgres::{PgRecord, TransactionManager, map_db_error};
use erp_common::UserId;
use erp_domain_core::Decimal;
use erp_errors::{AppError, AppResult};
use tracing::debug;

use super::rows::StockEntryRow;
use crate::domain::{MaterialMovement, StockEntry, StockEntryId, StockLedger};

/// 增加方向的台账不存在时先以零数量建立
const OPEN_ENTRY: &str = r#"
INSERT INTO stock_entries (id, material_id, warehouse_id, location_id, quantity,
                           reserved_quantity, unit_cost, status,
                           created_at, created_by, updated_at, updated_by, is_deleted)
VALUES ($1, $2, $3, $4, 0, 0, 0, 1, NOW(), $5, NOW(), $5, FALSE)
ON CONFLICT (material_id, warehouse_id, location_id) DO NOTHING
"#;

pub struct PgStockLedger {
    transactions: TransactionManager,
}

impl PgStockLedger {
    pub fn new(transactions: TransactionManager) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl StockLedger for PgStockLedger {
    async fn post(&self, movement: &MaterialMovement, actor: &UserId) -> AppResult<()> {
        let lock_sql = format!(
            "SELECT {} FROM {} \
             WHERE material_id = $1 AND warehouse_id = $2 AND location_id = $3 FOR UPDATE",
            StockEntry::COLUMNS,
            StockEntry::TABLE
        );

        let mut tx = self.transactions.begin().await?;

        for posting in movement.postings() {
            if posting.delta > Decimal::ZERO {
                sqlx::query(OPEN_ENTRY)
                    .bind(StockEntryId::new().0)
                    .bind(movement.material_id.0)
                    .bind(posting.point.warehouse_id.0)
                    .bind(posting.point.location_id.0)
                    .bind(actor.0)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }

            let row = sqlx::query_as::<_, StockEntryRow>(&lock_sql)
                .bind(movement.material_id.0)
                .bind(posting.point.warehouse_id.0)
                .bind(posting.point.location_id.0)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
            let mut entry = match row {
                Some(row) => StockEntry::from_row(row)?,
                None => {
                    return Err(AppError::conflict(format!(
                        "Insufficient stock: no stock of material {} at location {}",
                        movement.material_id, posting.point.location_id
                    )));
                }
            };

            entry.apply_delta(posting.delta, actor)?;
            entry
                .update_query()
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            debug!(entry = %entry.id, quantity = %entry.quantity, "Stock entry posted");
        }

        movement
            .insert_query()
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        TransactionManager::commit(tx).await
    }
}
