//! 通用 CRUD 路由
//!
//! 每个资源实现 [`CrudResource`]，由 [`crud_routes`] 生成统一的九个端点：
//!
//! | 方法与路径 | 操作 | 权限 |
//! |---|---|---|
//! | `GET /` | 分页列表 | `{res}.read` |
//! | `GET /{id}` | 详情 | `{res}.read` |
//! | `GET /deleted` | 已删除列表 | `{res}.read` |
//! | `GET /search?q=` | 搜索 | `{res}.read` |
//! | `POST /` | 创建 | `{res}.create` |
//! | `PUT /{id}` | 更新 | `{res}.update` |
//! | `DELETE /{id}` | 软删除 | `{res}.delete` |
//! | `POST /{id}/restore`（亦接受 `PUT`） | 恢复 | `{res}.delete` |
//! | `DELETE /{id}/permanent` | 物理删除 | `{res}.delete` |

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use erp_auth_core::{permission_code, require_permission};
use erp_common::{PagedResult, SearchParams, UserId};
use erp_crud_core::CrudHandler;
use erp_domain_core::{Entity, Record};
use erp_errors::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::{ApiQuery, AuthClaims, PageQuery, ValidatedJson, parse_id};

/// 实体 ID 类型简写
pub type IdOf<R> = <<R as CrudResource>::Entity as Entity>::Id;

/// 可通过 REST 暴露的资源
#[async_trait]
pub trait CrudResource: Send + Sync + 'static {
    type Entity: Record;
    /// 响应体
    type View: Serialize + From<Self::Entity> + Send;
    /// 创建请求体
    type Create: DeserializeOwned + Validate + Send + 'static;
    /// 更新请求体
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// 路径段与权限前缀，如 `warehouses`
    const RESOURCE: &'static str;

    fn lifecycle(&self) -> &CrudHandler<Self::Entity>;

    /// 由请求体构造并持久化新记录
    async fn create(&self, input: Self::Create, actor: &UserId) -> AppResult<Self::Entity>;

    /// 将请求体应用到已有记录
    async fn update(
        &self,
        id: IdOf<Self>,
        input: Self::Update,
        actor: &UserId,
    ) -> AppResult<Self::Entity>;
}

fn permission<R: CrudResource>(action: &str) -> String {
    permission_code(R::RESOURCE, action)
}

fn view_page<R: CrudResource>(page: PagedResult<R::Entity>) -> PagedResult<R::View> {
    page.map(R::View::from)
}

async fn list<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PagedResult<R::View>>> {
    require_permission!(claims, &permission::<R>("read"));
    let page = resource.lifecycle().list(&query.pagination()).await?;
    Ok(Json(view_page::<R>(page)))
}

async fn get_one<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<R::View>> {
    require_permission!(claims, &permission::<R>("read"));
    let id: IdOf<R> = parse_id(&id)?;
    let entity = resource.lifecycle().get(&id).await?;
    Ok(Json(R::View::from(entity)))
}

async fn list_deleted<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PagedResult<R::View>>> {
    require_permission!(claims, &permission::<R>("read"));
    let page = resource.lifecycle().list_deleted(&query.pagination()).await?;
    Ok(Json(view_page::<R>(page)))
}

async fn search<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<Json<PagedResult<R::View>>> {
    require_permission!(claims, &permission::<R>("read"));
    let page = resource
        .lifecycle()
        .search(params.term(), &params.pagination())
        .await?;
    Ok(Json(view_page::<R>(page)))
}

async fn create<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    ValidatedJson(input): ValidatedJson<R::Create>,
) -> AppResult<impl IntoResponse> {
    require_permission!(claims, &permission::<R>("create"));
    let actor = claims.user_id()?;
    let entity = resource.create(input, &actor).await?;
    Ok((StatusCode::CREATED, Json(R::View::from(entity))))
}

async fn update<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<R::Update>,
) -> AppResult<Json<R::View>> {
    require_permission!(claims, &permission::<R>("update"));
    let id: IdOf<R> = parse_id(&id)?;
    let actor = claims.user_id()?;
    let entity = resource.update(id, input, &actor).await?;
    Ok(Json(R::View::from(entity)))
}

async fn soft_delete<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_permission!(claims, &permission::<R>("delete"));
    let id: IdOf<R> = parse_id(&id)?;
    let actor = claims.user_id()?;
    resource.lifecycle().soft_delete(&id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn restore<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<Json<R::View>> {
    require_permission!(claims, &permission::<R>("delete"));
    let id: IdOf<R> = parse_id(&id)?;
    let actor = claims.user_id()?;
    let entity = resource.lifecycle().restore(&id, &actor).await?;
    Ok(Json(R::View::from(entity)))
}

async fn purge<R: CrudResource>(
    State(resource): State<Arc<R>>,
    AuthClaims(claims): AuthClaims,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_permission!(claims, &permission::<R>("delete"));
    let id: IdOf<R> = parse_id(&id)?;
    resource.lifecycle().purge(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 资源的标准路由（尚未绑定状态，可继续追加自定义端点）
pub fn crud_routes<R: CrudResource>() -> Router<Arc<R>> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/deleted", get(list_deleted::<R>))
        .route("/search", get(search::<R>))
        .route(
            "/{id}",
            get(get_one::<R>).put(update::<R>).delete(soft_delete::<R>),
        )
        .route("/{id}/restore", post(restore::<R>).put(restore::<R>))
        .route("/{id}/permanent", delete(purge::<R>))
}

/// 挂载到 `/api/{RESOURCE}` 的完整资源路由
pub fn crud_router<R: CrudResource>(resource: Arc<R>) -> Router {
    Router::new().nest(
        &format!("/api/{}", R::RESOURCE),
        crud_routes::<R>().with_state(resource),
    )
}

/// 同 [`crud_router`]，并追加绑定同一状态的自定义端点
pub fn crud_router_with<R: CrudResource>(resource: Arc<R>, extra: Router<Arc<R>>) -> Router {
    Router::new().nest(
        &format!("/api/{}", R::RESOURCE),
        crud_routes::<R>().merge(extra).with_state(resource),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware;
    use erp_auth_core::{TokenRevocationList, TokenService, TokenSubject};
    use erp_common::AuditInfo;
    use erp_domain_core::{UniqueKey, entity_id, impl_aggregate_root};
    use erp_ports::InMemoryRepository;
    use serde::Deserialize;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::web::{AuthState, auth_middleware};

    const SECRET: &str = "test-secret-key-at-least-32-chars-long";

    entity_id!(ShelfId);

    #[derive(Clone)]
    struct Shelf {
        id: ShelfId,
        code: String,
        audit_info: AuditInfo,
    }

    impl_aggregate_root!(Shelf, ShelfId);

    impl Record for Shelf {
        const NAME: &'static str = "Shelf";

        fn unique_keys(&self) -> Vec<UniqueKey> {
            vec![UniqueKey::single("code", &self.code)]
        }

        fn search_text(&self) -> Vec<&str> {
            vec![&self.code]
        }
    }

    #[derive(Serialize)]
    struct ShelfView {
        id: ShelfId,
        code: String,
        is_deleted: bool,
    }

    impl From<Shelf> for ShelfView {
        fn from(s: Shelf) -> Self {
            Self {
                id: s.id,
                code: s.code,
                is_deleted: s.audit_info.is_deleted,
            }
        }
    }

    #[derive(Deserialize, Validate)]
    struct ShelfInput {
        #[validate(length(min = 1, max = 10))]
        code: String,
    }

    struct Shelves {
        handler: CrudHandler<Shelf>,
    }

    #[async_trait]
    impl CrudResource for Shelves {
        type Entity = Shelf;
        type View = ShelfView;
        type Create = ShelfInput;
        type Update = ShelfInput;

        const RESOURCE: &'static str = "shelves";

        fn lifecycle(&self) -> &CrudHandler<Shelf> {
            &self.handler
        }

        async fn create(&self, input: ShelfInput, actor: &UserId) -> AppResult<Shelf> {
            self.handler
                .create(Shelf {
                    id: ShelfId::new(),
                    code: input.code.trim().to_string(),
                    audit_info: AuditInfo::created_by(actor),
                })
                .await
        }

        async fn update(&self, id: ShelfId, input: ShelfInput, actor: &UserId) -> AppResult<Shelf> {
            let mut shelf = self.handler.get(&id).await?;
            shelf.code = input.code.trim().to_string();
            shelf.audit_info.update(Some(actor.clone()));
            self.handler.update(shelf).await
        }
    }

    struct TestApp {
        router: Router,
        tokens: Arc<TokenService>,
    }

    impl TestApp {
        fn new() -> Self {
            let tokens = Arc::new(TokenService::new(SECRET, 3600, 3600, "forge-erp", "forge-erp-api"));
            let resource = Arc::new(Shelves {
                handler: CrudHandler::new(Arc::new(InMemoryRepository::new())),
            });
            let router = crud_router(resource).layer(middleware::from_fn_with_state(
                AuthState::new(tokens.clone(), TokenRevocationList::new()),
                auth_middleware,
            ));
            Self { router, tokens }
        }

        fn token(&self, permissions: &[&str]) -> String {
            self.tokens
                .generate_access_token(&TokenSubject {
                    user_id: UserId::new(),
                    username: "tester".to_string(),
                    roles: vec![],
                    permissions: permissions.iter().map(|p| p.to_string()).collect(),
                })
                .unwrap()
        }

        async fn call(&self, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
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
    }

    #[tokio::test]
    async fn test_full_lifecycle_over_http() {
        let app = TestApp::new();
        let admin = app.token(&["shelves.*"]);

        let (status, created) = app
            .call("POST", "/api/shelves", &admin, Some(json!({"code": "S-01"})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = app.call("GET", &format!("/api/shelves/{}", id), &admin, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["code"], "S-01");

        let (status, updated) = app
            .call("PUT", &format!("/api/shelves/{}", id), &admin, Some(json!({"code": "S-02"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["code"], "S-02");

        let (status, _) = app.call("DELETE", &format!("/api/shelves/{}", id), &admin, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.call("GET", &format!("/api/shelves/{}", id), &admin, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, deleted) = app.call("GET", "/api/shelves/deleted", &admin, None).await;
        assert_eq!(deleted["total"], 1);
        assert_eq!(deleted["items"][0]["is_deleted"], true);

        let (status, restored) = app
            .call("POST", &format!("/api/shelves/{}/restore", id), &admin, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restored["is_deleted"], false);

        // 恢复同样接受 PUT
        let (status, _) = app.call("DELETE", &format!("/api/shelves/{}", id), &admin, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, restored) = app
            .call("PUT", &format!("/api/shelves/{}/restore", id), &admin, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restored["code"], "S-02");

        let (status, _) = app
            .call("DELETE", &format!("/api/shelves/{}/permanent", id), &admin, None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .call("POST", &format!("/api/shelves/{}/restore", id), &admin, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_permissions_enforced_per_action() {
        let app = TestApp::new();
        let reader = app.token(&["shelves.read"]);

        let (status, _) = app.call("GET", "/api/shelves", &reader, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, problem) = app
            .call("POST", "/api/shelves", &reader, Some(json!({"code": "S-01"})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(problem["status"], 403);

        let other = app.token(&["racks.*"]);
        let (status, _) = app.call("GET", "/api/shelves", &other, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_bad_requests_are_problem_json() {
        let app = TestApp::new();
        let admin = app.token(&["*"]);

        let (status, _) = app.call("GET", "/api/shelves/not-a-uuid", &admin, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, problem) = app
            .call("POST", "/api/shelves", &admin, Some(json!({"code": ""})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(problem["detail"].as_str().unwrap().contains("code"));

        let (status, _) = app
            .call("POST", "/api/shelves", &admin, Some(json!({"name": "missing code"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.call("GET", "/api/shelves/search?q=", &admin, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.call("GET", "/api/shelves?page=abc", &admin, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_and_search() {
        let app = TestApp::new();
        let admin = app.token(&["*"]);

        for code in ["A-1", "A-2", "B-1"] {
            let (status, _) = app
                .call("POST", "/api/shelves", &admin, Some(json!({ "code": code })))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _) = app
            .call("POST", "/api/shelves", &admin, Some(json!({"code": "A-1"})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, found) = app
            .call("GET", "/api/shelves/search?q=a-&page_size=1", &admin, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["total"], 2);
        assert_eq!(found["total_pages"], 2);
        assert_eq!(found["items"].as_array().unwrap().len(), 1);
    }
}
