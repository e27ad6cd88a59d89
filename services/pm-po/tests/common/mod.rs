#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use erp_auth_core::{TokenRevocationList, TokenService, TokenSubject};
use erp_bootstrap::web::{AuthState, auth_middleware};
use erp_common::UserId;
use erp_ports::InMemoryRepository;
use mdm_material::MaterialServices;
use mdm_material::domain::{MaterialCard, MaterialCategory};
use pm_po::PurchasingServices;
use pm_po::domain::{PurchaseOrder, Supplier, SupplierType};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "test-secret-key-at-least-32-chars-long";

pub struct TestApp {
    router: Router,
    tokens: Arc<TokenService>,
}

impl TestApp {
    pub fn new() -> Self {
        let materials = MaterialServices::new(
            Arc::new(InMemoryRepository::<MaterialCategory>::new()),
            Arc::new(InMemoryRepository::<MaterialCard>::new()),
        );
        let purchasing = PurchasingServices::new(
            Arc::new(InMemoryRepository::<SupplierType>::new()),
            Arc::new(InMemoryRepository::<Supplier>::new()),
            Arc::new(InMemoryRepository::<PurchaseOrder>::new()),
            materials.cards.clone(),
        );

        let tokens = Arc::new(TokenService::new(SECRET, 900, 3600, "forge-erp", "forge-erp-api"));
        let router = Router::new()
            .merge(mdm_material::router(&materials))
            .merge(pm_po::router(&purchasing))
            .layer(middleware::from_fn_with_state(
                AuthState::new(tokens.clone(), TokenRevocationList::new()),
                auth_middleware,
            ));
        Self { router, tokens }
    }

    pub fn token(&self, permissions: &[&str]) -> String {
        self.tokens
            .generate_access_token(&TokenSubject {
                user_id: UserId::new(),
                username: "buyer".to_string(),
                roles: vec![],
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
            })
            .unwrap()
    }

    pub async fn call(&self, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token));
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
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// 创建记录并断言 201
    pub async fn create(&self, token: &str, uri: &str, body: Value) -> Value {
        let (status, created) = self.call("POST", uri, token, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", created);
        created
    }

    pub async fn material(&self, token: &str, code: &str) -> Value {
        self.create(
            token,
            "/api/material-cards",
            json!({ "code": code, "name": code, "unit_of_measure": "KG" }),
        )
        .await
    }
}
