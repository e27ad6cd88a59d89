//! erp-adapter-postgres - PostgreSQL 适配器

mod connection;
mod crud;
mod error;
mod migration;
mod rows;
mod transaction;

pub use connection::*;
pub use crud::*;
pub use error::*;
pub use migration::*;
pub use rows::*;
pub use transaction::*;

pub use sqlx::PgPool;
