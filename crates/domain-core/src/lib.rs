//! erp-domain-core - 跨 context 的领域核心类型
//!
//! 实体/聚合根 trait、ID 宏、记录契约、数据状态与数值校验

mod entity;
mod guards;
mod record;
mod status;

pub use entity::*;
pub use guards::*;
pub use record::*;
pub use status::*;

// Re-export common types
pub use erp_common::{AuditInfo, UserId};
pub use rust_decimal::Decimal;

#[doc(hidden)]
pub mod __private {
    pub use erp_errors;
    pub use serde;
    pub use uuid;
}
