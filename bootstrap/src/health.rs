//! 健康检查
//!
//! `/health` 只表示进程存活，`/ready` 额外检查数据库连接

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use erp_adapter_postgres::check_connection;
use erp_telemetry::{HealthCheck, HealthStatus};
use serde::Serialize;
use sqlx::PgPool;

/// 存活响应
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn readiness(State(pool): State<PgPool>) -> impl IntoResponse {
    let postgres = match check_connection(&pool).await {
        Ok(()) => HealthCheck::up("postgres"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            HealthCheck::down("postgres", "database unavailable")
        }
    };
    let status = HealthStatus::from_checks(vec![postgres]);

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

/// 健康检查路由
pub fn health_router(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .with_state(pool)
}
