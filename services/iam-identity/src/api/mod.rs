//! HTTP 接口

mod routes;
pub mod views;

pub use routes::{protected_routes, public_routes};
