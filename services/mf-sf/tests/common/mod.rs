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
use erp_errors::{AppError, AppResult};
use erp_ports::{CrudRepository, InMemoryRepository};
use mdm_material::MaterialServices;
use mdm_material::domain::{MaterialCard, MaterialCategory};
use mf_eng::EngineeringServices;
use mf_eng::domain::{BomHeader, BomItem};
use mf_sf::ShopFloorServices;
use mf_sf::application::MasterData;
use mf_sf::domain::{
    MaterialConsumption, ProductionConfirmation, ProductionLedger, WorkOrder, WorkOrderOperation,
};
use sc_wm::WarehouseServices;
use sc_wm::domain::{Location, Warehouse};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

const SECRET: &str = "test-secret-key-at-least-32-chars-long";

/// 内存报工过账：串行执行，工单校验通过后才写入
pub struct MemoryProductionLedger {
    orders: Arc<InMemoryRepository<WorkOrder>>,
    confirmations: Arc<InMemoryRepository<ProductionConfirmation>>,
    lock: Mutex<()>,
}

#[async_trait]
impl ProductionLedger for MemoryProductionLedger {
    async fn confirm(&self, confirmation: &ProductionConfirmation, actor: &UserId) -> AppResult<WorkOrder> {
        let _guard = self.lock.lock().await;
        let mut order = self
            .orders
            .find_by_id(&confirmation.work_order_id)
            .await?
            .ok_or_else(|| AppError::validation("Work order does not exist"))?;

        order.record_confirmation(
            confirmation.confirmed_quantity,
            confirmation.scrap_quantity,
            confirmation.confirmation_date,
        )?;
        order.audit_info.update(Some(actor.clone()));
        self.orders.update(&order).await?;
        self.confirmations.insert(confirmation).await?;
        Ok(order)
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
        let engineering = EngineeringServices::new(
            Arc::new(InMemoryRepository::<BomHeader>::new()),
            Arc::new(InMemoryRepository::<BomItem>::new()),
            materials.cards.clone(),
        );
        let warehouses = WarehouseServices::new(
            Arc::new(InMemoryRepository::<Warehouse>::new()),
            Arc::new(InMemoryRepository::<Location>::new()),
        );

        let orders = Arc::new(InMemoryRepository::<WorkOrder>::new());
        let confirmations = Arc::new(InMemoryRepository::<ProductionConfirmation>::new());
        let ledger = Arc::new(MemoryProductionLedger {
            orders: orders.clone(),
            confirmations: confirmations.clone(),
            lock: Mutex::new(()),
        });
        let shop_floor = ShopFloorServices::new(
            orders,
            Arc::new(InMemoryRepository::<WorkOrderOperation>::new()),
            confirmations,
            Arc::new(InMemoryRepository::<MaterialConsumption>::new()),
            ledger,
            MasterData::new(
                materials.cards.clone(),
                engineering.headers.clone(),
                warehouses.warehouses.clone(),
                warehouses.locations.clone(),
            ),
        );

        let tokens = Arc::new(TokenService::new(SECRET, 900, 3600, "forge-erp", "forge-erp-api"));
        let router = Router::new()
            .merge(mdm_material::router(&materials))
            .merge(mf_eng::router(&engineering))
            .merge(sc_wm::router(&warehouses))
            .merge(mf_sf::router(&shop_floor))
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
                username: "planner".to_string(),
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

    /// 计划状态的工单
    pub async fn work_order(&self, token: &str, number: &str, product: &str, planned: &str) -> String {
        let order = self
            .create(
                token,
                "/api/work-orders",
                json!({ "order_number": number, "product_material_id": product, "planned_quantity": planned }),
            )
            .await;
        assert_eq!(order["status"], "Planned");
        id_of(&order)
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
