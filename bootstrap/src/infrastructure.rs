//! 基础设施资源管理
//!
//! 统一管理所有业务模块共享的基础设施资源

use std::sync::Arc;
use std::time::Duration;

use erp_adapter_postgres::{PoolSettings, TransactionManager};
use erp_auth_core::{TokenRevocationList, TokenService};
use erp_config::{AppConfig, DatabaseConfig};
use erp_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::Backoff;
use crate::web::AuthState;

/// 基础设施资源容器
///
/// 由网关启动时初始化，各业务模块从中取得连接池与认证组件
#[derive(Clone)]
pub struct Infrastructure {
    config: Arc<AppConfig>,
    postgres_pool: PgPool,
    token_service: Arc<TokenService>,
    revocations: TokenRevocationList,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（数据库连接带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let settings = pool_settings(&config.database);
        let postgres_pool = Backoff::default()
            .retry("PostgreSQL connection", || settings.connect())
            .await?;

        Ok(Self::with_pool(config, postgres_pool))
    }

    /// 延迟连接（首次查询时才建立连接），用于无需数据库的场景
    pub fn connect_lazy(config: AppConfig) -> AppResult<Self> {
        let pool = pool_settings(&config.database).connect_lazy()?;
        Ok(Self::with_pool(config, pool))
    }

    /// 使用已有连接池组装
    pub fn with_pool(config: AppConfig, postgres_pool: PgPool) -> Self {
        let token_service = Arc::new(TokenService::new(
            config.jwt.secret.expose_secret(),
            config.jwt.expires_in as i64,
            config.jwt.refresh_expires_in as i64,
            config.jwt.issuer.clone(),
            config.jwt.audience.clone(),
        ));
        info!(
            issuer = %config.jwt.issuer,
            audience = %config.jwt.audience,
            "Token service initialized"
        );

        Self {
            config: Arc::new(config),
            postgres_pool,
            token_service,
            revocations: TokenRevocationList::new(),
        }
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取事务管理器
    pub fn transaction_manager(&self) -> TransactionManager {
        TransactionManager::new(self.postgres_pool.clone())
    }

    /// 获取 Token 服务
    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    /// 获取令牌吊销列表
    pub fn revocations(&self) -> TokenRevocationList {
        self.revocations.clone()
    }

    /// 认证中间件所需状态
    pub fn auth_state(&self) -> AuthState {
        AuthState::new(self.token_service.clone(), self.revocations.clone())
    }
}

fn pool_settings(database: &DatabaseConfig) -> PoolSettings {
    PoolSettings {
        url: database.url.expose_secret().clone(),
        max_connections: database.max_connections,
        min_connections: database.min_connections,
        acquire_timeout: Duration::from_secs(database.connect_timeout_secs),
    }
}
