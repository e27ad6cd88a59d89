//! sqlx 错误到 AppError 的映射

use erp_errors::AppError;

/// 唯一约束冲突
pub const UNIQUE_VIOLATION: &str = "23505";
/// 外键约束冲突
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// CHECK 约束冲突
pub const CHECK_VIOLATION: &str = "23514";
/// 数值超出列精度
pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
/// 锁等待超时（`lock_timeout`）
pub const LOCK_NOT_AVAILABLE: &str = "55P03";

/// 按 SQLSTATE 归类数据库错误
pub fn map_sqlstate(code: Option<&str>, constraint: Option<&str>, message: &str) -> AppError {
    let constraint = constraint.unwrap_or("unknown");
    match code {
        Some(UNIQUE_VIOLATION) => {
            AppError::conflict(format!("Duplicate value violates {}", constraint))
        }
        Some(FOREIGN_KEY_VIOLATION) => AppError::conflict(format!(
            "Record is referenced by other records or references a missing record ({})",
            constraint
        )),
        Some(CHECK_VIOLATION) => {
            AppError::validation(format!("Value violates constraint {}", constraint))
        }
        Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
            AppError::validation("Numeric value exceeds the supported range")
        }
        Some(LOCK_NOT_AVAILABLE) => {
            AppError::conflict("Record is being updated by another request, please retry")
        }
        _ => AppError::database(message.to_string()),
    }
}

/// 将 sqlx 错误转换为 AppError
pub fn map_db_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) => map_sqlstate(db.code().as_deref(), db.constraint(), db.message()),
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        _ => AppError::database(err.to_string()),
    }
}
