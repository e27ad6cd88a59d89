//! erp-ports - 抽象 trait 层
//!
//! 定义持久化的抽象接口

#[cfg(any(test, feature = "testing"))]
mod memory;
mod repository;

#[cfg(any(test, feature = "testing"))]
pub use memory::*;
pub use repository::*;

pub use erp_domain_core::UniqueKey;
