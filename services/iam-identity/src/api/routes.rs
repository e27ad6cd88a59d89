//! 身份模块路由

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use erp_bootstrap::web::{AuthClaims, ValidatedJson, crud_router};
use erp_errors::AppResult;

use super::views::{CurrentUser, LoginResponse};
use crate::application::commands::{ChangePasswordCommand, LoginCommand, RefreshCommand};
use crate::application::{AuthService, IdentityServices};

async fn login(
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(command): ValidatedJson<LoginCommand>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(auth.login(command).await?))
}

async fn refresh(
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(command): ValidatedJson<RefreshCommand>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(auth.refresh(&command.refresh_token).await?))
}

async fn me(
    State(auth): State<Arc<AuthService>>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<Json<CurrentUser>> {
    Ok(Json(auth.me(&claims).await?))
}

async fn logout(
    State(auth): State<Arc<AuthService>>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<StatusCode> {
    auth.logout(&claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn change_password(
    State(auth): State<Arc<AuthService>>,
    AuthClaims(claims): AuthClaims,
    ValidatedJson(command): ValidatedJson<ChangePasswordCommand>,
) -> AppResult<StatusCode> {
    auth.change_password(&claims, command).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 无需认证的端点：登录与刷新
pub fn public_routes(services: &IdentityServices) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .with_state(Arc::new(services.auth_service()))
}

/// 需要认证的端点：用户、角色、分配的 CRUD 以及当前用户操作
pub fn protected_routes(services: &IdentityServices) -> Router {
    let auth = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/change-password", post(change_password))
        .with_state(Arc::new(services.auth_service()));

    Router::new()
        .merge(crud_router(Arc::new(services.user_resource())))
        .merge(crud_router(Arc::new(services.role_resource())))
        .merge(crud_router(Arc::new(services.user_role_resource())))
        .merge(auth)
}
