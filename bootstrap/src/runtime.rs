//! 服务运行时

use erp_config::AppConfig;
use erp_telemetry::{LogFormat, init_tracing};
use tracing::info;

/// 配置目录的默认位置
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// 初始化服务运行时（日志）
pub fn init_runtime(config: &AppConfig) {
    let format = if config.is_production() || config.telemetry.json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&config.telemetry.log_level, format);

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}
