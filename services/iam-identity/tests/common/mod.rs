//! 集成测试公共设施：内存仓储 + 完整路由

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use erp_auth_core::{TokenRevocationList, TokenService};
use erp_bootstrap::web::{AuthState, auth_middleware};
use erp_config::SeedConfig;
use erp_ports::InMemoryRepository;
use iam_identity::IdentityServices;
use iam_identity::domain::{Role, User, UserRole};
use secrecy::Secret;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-key-at-least-32-chars-long";
pub const ADMIN_PASSWORD: &str = "Adm1n!Secure";

pub fn seed_config() -> SeedConfig {
    SeedConfig {
        admin_username: "admin".to_string(),
        admin_email: "admin@forge.local".to_string(),
        admin_password: Secret::new(ADMIN_PASSWORD.to_string()),
    }
}

pub struct TestApp {
    pub services: IdentityServices,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let services = IdentityServices::new(
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Role>::new()),
            Arc::new(InMemoryRepository::<UserRole>::new()),
            Arc::new(TokenService::new(SECRET, 900, 3600, "forge-erp", "forge-erp-api")),
            TokenRevocationList::new(),
        );
        services.seeder().seed(Some(&seed_config())).await.unwrap();

        let auth_state = AuthState::new(services.token_service.clone(), services.revocations.clone());
        let router = iam_identity::public_router(&services).merge(
            iam_identity::router(&services)
                .layer(middleware::from_fn_with_state(auth_state, auth_middleware)),
        );
        Self { services, router }
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// 登录并返回完整响应
    pub async fn login(&self, login: &str, password: &str) -> (StatusCode, Value) {
        self.call(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "login": login, "password": password })),
        )
        .await
    }

    /// 管理员访问令牌
    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login("admin", ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["access_token"].as_str().unwrap().to_string()
    }
}
