//! 认证中间件

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use erp_auth_core::{Claims, TokenRevocationList, TokenService};
use erp_common::UserId;
use erp_errors::{AppError, AppResult};
use tracing::{debug, warn};

/// 认证中间件状态
#[derive(Clone)]
pub struct AuthState {
    pub token_service: Arc<TokenService>,
    pub revocations: TokenRevocationList,
}

impl AuthState {
    pub fn new(token_service: Arc<TokenService>, revocations: TokenRevocationList) -> Self {
        Self {
            token_service,
            revocations,
        }
    }
}

/// 认证 Claims 提取器
///
/// 应在 auth_middleware 之后使用
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    /// 当前操作人
    pub fn actor(&self) -> AppResult<UserId> {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))
    }
}

/// 提取 Bearer token
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT 认证中间件
///
/// 验证访问令牌并将 claims 注入到请求扩展中
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(&request) else {
        warn!(path = %request.uri().path(), "Missing or invalid authorization header");
        return Err(AppError::unauthenticated("Missing bearer token"));
    };

    let claims = state.token_service.validate_access_token(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        e
    })?;

    if state.revocations.is_revoked(&claims.jti).await {
        warn!(user_id = %claims.sub, "Revoked token presented");
        return Err(AppError::unauthorized("Token has been revoked"));
    }

    debug!(user_id = %claims.sub, "Token validated");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware;
    use axum::routing::get;
    use erp_auth_core::TokenSubject;
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-key-at-least-32-chars-long";

    async fn whoami(AuthClaims(claims): AuthClaims) -> String {
        claims.name
    }

    fn state(expires_in: i64) -> AuthState {
        AuthState::new(
            Arc::new(TokenService::new(SECRET, expires_in, 3600, "forge-erp", "forge-erp-api")),
            TokenRevocationList::new(),
        )
    }

    fn app(state: AuthState) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(),
            username: "alice".to_string(),
            roles: vec![],
            permissions: vec![],
        }
    }

    fn request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_passes_claims() {
        let state = state(3600);
        let token = state.token_service.generate_access_token(&subject()).unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"alice");
    }

    #[tokio::test]
    async fn test_missing_and_invalid_tokens_rejected() {
        let response = app(state(3600)).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );

        let response = app(state(3600))
            .oneshot(request(Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let state = state(-3600);
        let token = state.token_service.generate_access_token(&subject()).unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_not_accepted() {
        let state = state(3600);
        let token = state.token_service.generate_refresh_token(&subject()).unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_revoked_token_rejected() {
        let state = state(3600);
        let token = state.token_service.generate_access_token(&subject()).unwrap();
        let claims = state.token_service.validate_token(&token).unwrap();
        state.revocations.revoke(&claims).await;

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
