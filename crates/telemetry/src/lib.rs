//! erp-telemetry - 日志、指标与健康状态
//!
//! `RUST_LOG` 优先于配置文件中的日志级别。

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 请求计数
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// 请求耗时（秒）
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// 耗时直方图分桶：CRUD 请求多在 100ms 内，过账事务可到秒级
const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 安装全局 tracing subscriber，进程内只调用一次
pub fn init_tracing(log_level: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter(log_level));
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init(),
    }
    tracing::info!(level = log_level, format = ?format, "Tracing initialized");
}

/// 安装 Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()
        .inspect(|_| tracing::info!(buckets = LATENCY_BUCKETS.len(), "Prometheus recorder installed"))
}

/// `/ready` 响应体
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub checks: Vec<HealthCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheck {
    pub fn up(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: true,
            message: None,
        }
    }

    pub fn down(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: false,
            message: Some(message.into()),
        }
    }
}

impl HealthStatus {
    pub fn from_checks(checks: Vec<HealthCheck>) -> Self {
        Self {
            healthy: checks.iter().all(|c| c.healthy),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_failed_check_marks_unhealthy() {
        assert!(HealthStatus::from_checks(vec![HealthCheck::up("postgres")]).healthy);
        assert!(HealthStatus::from_checks(Vec::new()).healthy);

        let status = HealthStatus::from_checks(vec![
            HealthCheck::up("postgres"),
            HealthCheck::down("migrations", "pending"),
        ]);
        assert!(!status.healthy);
        assert_eq!(status.checks[1].message.as_deref(), Some("pending"));
    }

    #[test]
    fn test_healthy_check_omits_message() {
        let json = serde_json::to_value(HealthCheck::up("postgres")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "postgres", "healthy": true}));
    }

    // 全局 subscriber 只能安装一次，本模块只有这一个测试安装
    #[test]
    fn test_init_tracing_installs_global_subscriber() {
        init_tracing("info", LogFormat::Json);
        assert!(tracing::dispatcher::has_been_set());
    }
}
