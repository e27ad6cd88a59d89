//! erp-bootstrap - 统一服务启动骨架
//!
//! 基础设施初始化、运行时、HTTP 公共组件

mod health;
pub mod web;
mod http_metrics;
mod infrastructure;
mod retry;
mod runtime;
mod shutdown;

pub use health::*;
pub use http_metrics::*;
pub use infrastructure::*;
pub use retry::*;
pub use runtime::*;
pub use shutdown::*;
