#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use erp_auth_core::{TokenRevocationList, TokenService, TokenSubject};
use erp_bootstrap::web::{AuthState, auth_middleware};
use erp_common::UserId;
use erp_domain_core::Decimal;
use erp_errors::{AppError, AppResult};
use erp_ports::{CrudRepository, InMemoryRepository};
use mdm_material::MaterialServices;
use mdm_material::domain::{MaterialCard, MaterialCategory};
use sc_im::InventoryServices;
use sc_im::application::MasterData;
use sc_im::domain::{MaterialMovement, StockEntry, StockLedger};
use sc_wm::WarehouseServices;
use sc_wm::domain::{Location, Warehouse};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

const SECRET: &str = "test-secret-key-at-least-32-chars-long";

/// 内存过账：串行执行，先校验全部分录再写入
pub struct MemoryLedger {
    entries: Arc<InMemoryRepository<StockEntry>>,
    movements: Arc<InMemoryRepository<MaterialMovement>>,
    lock: Mutex<()>,
}

#[async_trait]
impl StockLedger for MemoryLedger {
    async fn post(&self, movement: &MaterialMovement, actor: &UserId) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let existing = self.entries.snapshot().await;

        let mut pending = Vec::new();
        for posting in movement.postings() {
            let found = existing
                .iter()
                .find(|e| e.material_id == movement.material_id && e.point == posting.point)
                .cloned();
            let (mut entry, is_new) = match found {
                Some(entry) => (entry, false),
                None if posting.delta > Decimal::ZERO => (
                    StockEntry::empty(movement.material_id, posting.point, Some(actor.clone())),
                    true,
                ),
                None => return Err(AppError::conflict("Insufficient stock: no stock entry")),
            };
            entry.apply_delta(posting.delta, actor)?;
            pending.push((entry, is_new));
        }

        for (entry, is_new) in &pending {
            if *is_new {
                self.entries.insert(entry).await?;
            } else {
                self.entries.update(entry).await?;
            }
        }
        self.movements.insert(movement).await
    }
}

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
        let warehouses = WarehouseServices::new(
            Arc::new(InMemoryRepository::<Warehouse>::new()),
            Arc::new(InMemoryRepository::<Location>::new()),
        );

        let entries = Arc::new(InMemoryRepository::<StockEntry>::new());
        let movements = Arc::new(InMemoryRepository::<MaterialMovement>::new());
        let ledger = Arc::new(MemoryLedger {
            entries: entries.clone(),
            movements: movements.clone(),
            lock: Mutex::new(()),
        });
        let inventory = InventoryServices::new(
            entries,
            movements,
            ledger,
            MasterData::new(
                materials.cards.clone(),
                warehouses.warehouses.clone(),
                warehouses.locations.clone(),
            ),
        );

        let tokens = Arc::new(TokenService::new(SECRET, 900, 3600, "forge-erp", "forge-erp-api"));
        let router = Router::new()
            .merge(mdm_material::router(&materials))
            .merge(sc_wm::router(&warehouses))
            .merge(sc_im::router(&inventory))
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
                username: "storekeeper".to_string(),
                roles: vec![],
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
            })
            .unwrap()
    }

    /// 拥有库存相关全部权限的令牌
    pub fn admin_token(&self) -> String {
        let mut permissions = Vec::new();
        for resource in ["material-cards", "warehouses", "locations", "stock-entries", "material-movements"] {
            for action in ["read", "create", "update", "delete"] {
                permissions.push(format!("{}.{}", resource, action));
            }
        }
        let permissions: Vec<&str> = permissions.iter().map(String::as_str).collect();
        self.token(&permissions)
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

    /// 仓库及其下的一个库位
    pub async fn storage(&self, token: &str, warehouse: &str, location: &str) -> (String, String) {
        let warehouse = self
            .create(token, "/api/warehouses", json!({ "code": warehouse, "name": warehouse }))
            .await;
        let location = self
            .create(
                token,
                "/api/locations",
                json!({ "warehouse_id": warehouse["id"], "code": location, "name": location }),
            )
            .await;
        (id_of(&warehouse), id_of(&location))
    }

    pub async fn material(&self, token: &str, code: &str) -> String {
        let card = self
            .create(
                token,
                "/api/material-cards",
                json!({ "code": code, "name": code, "unit_of_measure": "PCS" }),
            )
            .await;
        id_of(&card)
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
