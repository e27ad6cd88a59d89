//! 过账事务
//!
//! 库存过账、生产报工在一个事务内读取并锁定行（`SELECT ... FOR UPDATE`），
//! 锁等待超过 `lock_timeout` 时放弃，由调用方重试。

use std::time::Duration;

use erp_errors::{AppError, AppResult};
use sqlx::{Executor, PgPool, Postgres, Transaction};

/// 默认锁等待上限
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TransactionManager {
    pool: PgPool,
    lock_timeout: Duration,
}

impl TransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// 开始事务并限定本事务的锁等待时间
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        (&mut *tx)
            .execute(sqlx::raw_sql(&lock_timeout_statement(self.lock_timeout)))
            .await
            .map_err(|e| AppError::database(format!("Failed to set lock timeout: {}", e)))?;
        Ok(tx)
    }

    pub async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))
    }
}

fn lock_timeout_statement(lock_timeout: Duration) -> String {
    format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout.as_millis().max(1))
}
