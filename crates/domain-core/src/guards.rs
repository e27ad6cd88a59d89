//! 数值与文本校验

use erp_errors::{AppError, AppResult};
use rust_decimal::Decimal;

/// `NUMERIC(18, 4)` 列能保存的最大值
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, 4);

fn out_of_range(field: &str) -> AppError {
    AppError::validation(format!("{} must not exceed {}", field, MAX_AMOUNT))
}

/// 要求绝对值不超过 [`MAX_AMOUNT`]
pub fn ensure_storable(field: &str, value: Decimal) -> AppResult<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(out_of_range(field));
    }
    Ok(())
}

/// 要求数值 ≥ 0
pub fn ensure_non_negative(field: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must not be negative",
            field
        )));
    }
    ensure_storable(field, value)
}

/// 要求数值 > 0
pub fn ensure_positive(field: &str, value: Decimal) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    ensure_storable(field, value)
}

/// 乘积，溢出或超出可保存范围时为校验错误
pub fn checked_product(field: &str, lhs: Decimal, rhs: Decimal) -> AppResult<Decimal> {
    let product = lhs.checked_mul(rhs).ok_or_else(|| out_of_range(field))?;
    ensure_storable(field, product)?;
    Ok(product)
}

/// 和，溢出或超出可保存范围时为校验错误
pub fn checked_sum(field: &str, lhs: Decimal, rhs: Decimal) -> AppResult<Decimal> {
    let sum = lhs.checked_add(rhs).ok_or_else(|| out_of_range(field))?;
    ensure_storable(field, sum)?;
    Ok(sum)
}

/// 可选数值 ≥ 0
pub fn ensure_non_negative_opt(field: &str, value: Option<Decimal>) -> AppResult<()> {
    match value {
        Some(v) => ensure_non_negative(field, v),
        None => Ok(()),
    }
}

/// 要求数值在闭区间内
pub fn ensure_between(field: &str, value: Decimal, min: Decimal, max: Decimal) -> AppResult<()> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(())
}

/// 去除首尾空白后要求非空，返回修剪后的值
pub fn require_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}
