//! HTTP 公共组件
//!
//! 认证中间件、请求提取器以及通用 CRUD 路由

mod auth;
mod crud;
mod extract;

pub use auth::*;
pub use crud::*;
pub use extract::*;
