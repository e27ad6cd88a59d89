//! 审计列的行映射

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

/// 审计列行数据，通过 `#[sqlx(flatten)]` 嵌入各表的 Row
#[derive(Debug, Clone, FromRow)]
pub struct AuditRow {
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub is_deleted: bool,
}

impl From<AuditRow> for AuditInfo {
    fn from(row: AuditRow) -> Self {
        Self {
            created_at: row.created_at,
            created_by: row.created_by.map(UserId),
            updated_at: row.updated_at,
            updated_by: row.updated_by.map(UserId),
            is_deleted: row.is_deleted,
        }
    }
}

/// 绑定全部审计列（用于 INSERT）
pub fn bind_audit(
    query: Query<'static, Postgres, PgArguments>,
    audit: &AuditInfo,
) -> Query<'static, Postgres, PgArguments> {
    query
        .bind(audit.created_at)
        .bind(audit.created_by.as_ref().map(|u| u.0))
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|u| u.0))
        .bind(audit.is_deleted)
}

/// 绑定更新痕迹（用于 UPDATE）
pub fn bind_touch(
    query: Query<'static, Postgres, PgArguments>,
    audit: &AuditInfo,
) -> Query<'static, Postgres, PgArguments> {
    query
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|u| u.0))
}
