//! 路由组装

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use erp_bootstrap::web::auth_middleware;
use erp_bootstrap::{Infrastructure, health_router, metrics_router, track_metrics};
use erp_config::CorsConfig;
use erp_errors::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::security_headers::security_headers;

/// 全部业务模块
pub struct Modules {
    pub identity: iam_identity::IdentityServices,
    pub materials: mdm_material::MaterialServices,
    pub warehouses: sc_wm::WarehouseServices,
    pub inventory: sc_im::InventoryServices,
    pub purchasing: pm_po::PurchasingServices,
    pub sales: sd_so::SalesServices,
    pub engineering: mf_eng::EngineeringServices,
    pub shop_floor: mf_sf::ShopFloorServices,
}

impl Modules {
    pub fn new(infra: &Infrastructure) -> Self {
        Self {
            identity: iam_identity::services(infra),
            materials: mdm_material::services(infra),
            warehouses: sc_wm::services(infra),
            inventory: sc_im::services(infra),
            purchasing: pm_po::services(infra),
            sales: sd_so::services(infra),
            engineering: mf_eng::services(infra),
            shop_floor: mf_sf::services(infra),
        }
    }
}

/// 公开路由（登录、健康检查、指标）与受保护的业务路由
pub fn build_router(infra: &Infrastructure, modules: &Modules, metrics: Option<PrometheusHandle>) -> Router {
    let protected = Router::new()
        .merge(iam_identity::router(&modules.identity))
        .merge(mdm_material::router(&modules.materials))
        .merge(sc_wm::router(&modules.warehouses))
        .merge(sc_im::router(&modules.inventory))
        .merge(pm_po::router(&modules.purchasing))
        .merge(sd_so::router(&modules.sales))
        .merge(mf_eng::router(&modules.engineering))
        .merge(mf_sf::router(&modules.shop_floor))
        .layer(middleware::from_fn_with_state(infra.auth_state(), auth_middleware));

    let mut public = Router::new()
        .merge(iam_identity::public_router(&modules.identity))
        .merge(health_router(infra.postgres_pool()));
    if let Some(handle) = metrics {
        public = public.merge(metrics_router(handle));
    }

    let server = &infra.config().server;
    public.merge(protected).layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_metrics))
            .layer(cors_layer(&infra.config().cors))
            .layer(middleware::from_fn(security_headers))
            .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
            .map_response(IntoResponse::into_response)
            .layer(RequestBodyLimitLayer::new(server.body_limit)),
    )
}

/// 未配置来源时不限制
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(AnyOrigin).allow_headers(AnyOrigin);
    if config.allowed_origins.is_empty() {
        return layer.allow_origin(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %message, "Request handler panicked");
    AppError::internal("Request handler panicked").into_response()
}
