//! IAM Identity Service Library
//!
//! 用户、角色、用户角色分配以及认证端点：
//! - `domain`: 实体与值对象（用户名、邮箱、密码策略）
//! - `application`: CRUD 资源、认证服务、权限聚合、初始化
//! - `infrastructure`: PostgreSQL 表映射与建表脚本
//! - `api`: 响应体与路由

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;
use erp_adapter_postgres::{Migration, PgCrudRepository};
use erp_bootstrap::Infrastructure;

pub use application::IdentityServices;

use domain::{Role, User, UserRole};

/// 本模块的建表脚本
pub fn migrations() -> Vec<Migration> {
    infrastructure::persistence::migrations()
}

/// 基于 PostgreSQL 的处理器集合
pub fn services(infra: &Infrastructure) -> IdentityServices {
    let pool = infra.postgres_pool();
    IdentityServices::new(
        Arc::new(PgCrudRepository::<User>::new(pool.clone())),
        Arc::new(PgCrudRepository::<Role>::new(pool.clone())),
        Arc::new(PgCrudRepository::<UserRole>::new(pool)),
        infra.token_service(),
        infra.revocations(),
    )
}

/// 需要认证的路由
pub fn router(services: &IdentityServices) -> Router {
    api::protected_routes(services)
}

/// 公开路由（登录、刷新）
pub fn public_router(services: &IdentityServices) -> Router {
    api::public_routes(services)
}
