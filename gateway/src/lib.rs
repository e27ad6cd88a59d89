//! erp-gateway - HTTP 入口
//!
//! 组装各业务模块路由、公共中间件与数据库迁移

mod app;
mod migrations;
mod security_headers;

pub use app::{Modules, build_router, cors_layer};
pub use migrations::{all_migrations, run_migrations};
pub use security_headers::security_headers;
