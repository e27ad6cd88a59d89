//! 建表迁移
//!
//! 各服务以 [`Migration`] 列表提供建表脚本，网关启动时按版本号顺序执行。
//! 已执行的版本及其校验和记录在 `_migrations` 表中；已执行脚本被改动时拒绝继续。
//! 多个实例同时启动时用 advisory lock 串行化。

use std::collections::HashMap;

use erp_errors::{AppError, AppResult};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgPool, Postgres};
use tracing::{info, warn};

const MIGRATIONS_TABLE: &str = "_migrations";

/// advisory lock 键（"ERP_MIGR"）
const MIGRATION_LOCK_KEY: i64 = 0x4552_505f_4d49_4752;

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub sql: String,
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, sql: impl Into<String>) -> Self {
        let sql = sql.into();
        Self {
            version,
            name: name.into(),
            checksum: checksum(&sql),
            sql,
        }
    }
}

/// FNV-1a 64 位
fn checksum(sql: &str) -> String {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = sql
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(PRIME));
    format!("{:016x}", hash)
}

#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}

impl MigrationError {
    fn of(migration: &Migration, error: impl Into<String>) -> Self {
        Self {
            version: migration.version,
            name: migration.name.clone(),
            error: error.into(),
        }
    }
}

/// 按版本排序并拒绝重复版本号
pub fn plan(migrations: &[Migration]) -> AppResult<Vec<&Migration>> {
    let mut sorted: Vec<&Migration> = migrations.iter().collect();
    sorted.sort_by_key(|m| m.version);

    if let Some(pair) = sorted.windows(2).find(|w| w[0].version == w[1].version) {
        return Err(AppError::internal(format!(
            "Duplicate migration version {}: {} / {}",
            pair[0].version, pair[0].name, pair[1].name
        )));
    }
    Ok(sorted)
}

/// 对照已执行记录（版本 → 校验和）划分出已跳过与待执行的迁移
fn pending<'a>(
    planned: Vec<&'a Migration>,
    applied: &HashMap<i64, String>,
) -> Result<(Vec<i64>, Vec<&'a Migration>), MigrationError> {
    let mut skipped = Vec::new();
    let mut todo = Vec::new();
    for migration in planned {
        match applied.get(&migration.version) {
            Some(recorded) if *recorded != migration.checksum => {
                return Err(MigrationError::of(
                    migration,
                    "Checksum mismatch - migration has been modified",
                ));
            }
            Some(_) => skipped.push(migration.version),
            None => todo.push(migration),
        }
    }
    Ok((skipped, todo))
}

pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 执行全部待处理迁移，遇到第一个错误即停止
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        let planned = plan(migrations)?;

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {}", e)))?;
        execute(&mut conn, "SELECT pg_advisory_lock($1)", "take migration lock").await?;

        let result = run(&mut conn, planned).await;

        if let Err(e) = execute(&mut conn, "SELECT pg_advisory_unlock($1)", "release migration lock").await {
            warn!(error = %e, "Migration lock not released");
        }
        result
    }
}

async fn execute(conn: &mut PoolConnection<Postgres>, sql: &str, what: &str) -> AppResult<()> {
    sqlx::query(sql)
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut **conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to {}: {}", what, e)))?;
    Ok(())
}

async fn run(
    conn: &mut PoolConnection<Postgres>,
    planned: Vec<&Migration>,
) -> AppResult<MigrationResult> {
    sqlx::raw_sql(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            checksum VARCHAR(64) NOT NULL
        )",
        MIGRATIONS_TABLE
    ))
    .execute(&mut **conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

    let applied: HashMap<i64, String> =
        sqlx::query_as::<_, (i64, String)>(&format!("SELECT version, checksum FROM {}", MIGRATIONS_TABLE))
            .fetch_all(&mut **conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to read applied migrations: {}", e)))?
            .into_iter()
            .collect();

    let mut result = MigrationResult::default();
    let todo = match pending(planned, &applied) {
        Ok((skipped, todo)) => {
            result.skipped = skipped;
            todo
        }
        Err(error) => {
            warn!(version = error.version, name = %error.name, "Applied migration has been modified");
            result.errors.push(error);
            return Ok(result);
        }
    };

    for migration in todo {
        if let Err(e) = apply(conn, migration).await {
            result.errors.push(MigrationError::of(migration, e.to_string()));
            break;
        }
        result.applied.push(migration.version);
    }
    Ok(result)
}

/// 脚本与版本记录在同一事务中提交
async fn apply(conn: &mut PoolConnection<Postgres>, migration: &Migration) -> AppResult<()> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

    // 多语句脚本走简单查询协议
    sqlx::raw_sql(&migration.sql)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply migration {}: {}", migration.version, e)))?;

    sqlx::query(&format!(
        "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
        MIGRATIONS_TABLE
    ))
    .bind(migration.version)
    .bind(&migration.name)
    .bind(&migration.checksum)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

    info!(version = migration.version, name = %migration.name, "Migration applied");
    Ok(())
}
