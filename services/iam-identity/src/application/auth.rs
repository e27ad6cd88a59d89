//! 认证服务：登录、刷新、当前用户、登出、修改密码

use std::sync::Arc;

use erp_auth_core::{Claims, TokenRevocationList, TokenService};
use erp_crud_core::CrudHandler;
use erp_domain_core::UniqueKey;
use erp_errors::{AppError, AppResult};
use tracing::{info, warn};

use super::access::AccessResolver;
use super::commands::{ChangePasswordCommand, LoginCommand};
use crate::api::views::{CurrentUser, LoginResponse};
use crate::domain::{HashedPassword, User};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    users: CrudHandler<User>,
    access: AccessResolver,
    token_service: Arc<TokenService>,
    revocations: TokenRevocationList,
}

impl AuthService {
    pub fn new(
        users: CrudHandler<User>,
        access: AccessResolver,
        token_service: Arc<TokenService>,
        revocations: TokenRevocationList,
    ) -> Self {
        Self {
            users,
            access,
            token_service,
            revocations,
        }
    }

    /// 按用户名或邮箱查找未删除用户
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let login = login.trim();
        let repo = self.users.repository();
        if let Some(user) = repo
            .find_one_by(&UniqueKey::single("username", login))
            .await?
        {
            return Ok(Some(user));
        }
        if login.contains('@') {
            return repo
                .find_one_by(&UniqueKey::single("email", login.to_lowercase()))
                .await;
        }
        Ok(None)
    }

    pub async fn login(&self, command: LoginCommand) -> AppResult<LoginResponse> {
        let Some(user) = self.find_by_login(&command.login).await? else {
            warn!(login = %command.login.trim(), "Login failed: unknown user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !user.password_hash.verify(&command.password)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active() {
            warn!(user_id = %user.id, status = %user.status, "Login rejected: user not active");
            return Err(AppError::forbidden("User account is not active"));
        }

        // 只改登录时间，不能写回读取时的密码哈希
        let user = self
            .users
            .repository()
            .modify(&user.id, &|u: &mut User| {
                u.record_login();
                Ok(())
            })
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let access = self.access.resolve(&user).await?;
        let tokens = self.token_service.generate_token_pair(&access.subject_for(&user))?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginResponse::new(tokens, user, access))
    }

    /// 用刷新令牌换取新令牌对，旧刷新令牌随即作废
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<LoginResponse> {
        let claims = self.token_service.validate_refresh_token(refresh_token)?;
        if self.revocations.is_revoked(&claims.jti).await {
            warn!(jti = %claims.jti, "Revoked refresh token presented");
            return Err(AppError::unauthorized("Token has been revoked"));
        }

        let user = self
            .users
            .find(&claims.user_id()?)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::unauthorized("User is not active"))?;

        let access = self.access.resolve(&user).await?;
        let tokens = self.token_service.generate_token_pair(&access.subject_for(&user))?;
        self.revocations.revoke(&claims).await;

        info!(user_id = %user.id, "Token refreshed");
        Ok(LoginResponse::new(tokens, user, access))
    }

    /// 当前用户资料（角色与权限实时读取）
    pub async fn me(&self, claims: &Claims) -> AppResult<CurrentUser> {
        let user = self.users.get(&claims.user_id()?).await?;
        let access = self.access.resolve(&user).await?;
        Ok(CurrentUser::new(user, access))
    }

    /// 吊销当前访问令牌
    pub async fn logout(&self, claims: &Claims) -> AppResult<()> {
        self.revocations.revoke(claims).await;
        info!(user_id = %claims.sub, jti = %claims.jti, "User logged out");
        Ok(())
    }

    pub async fn change_password(
        &self,
        claims: &Claims,
        command: ChangePasswordCommand,
    ) -> AppResult<()> {
        let actor = claims.user_id()?;
        let user = self.users.get(&actor).await?;

        if !user.password_hash.verify(&command.current_password)? {
            return Err(AppError::validation("Current password is incorrect"));
        }
        if command.new_password == command.current_password {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }
        if command.new_password != command.confirm_password {
            return Err(AppError::validation("Passwords do not match"));
        }

        let password_hash = HashedPassword::from_plain(&command.new_password)?;
        let verified = user.password_hash;
        self.users
            .modify(&actor, |u| {
                if u.password_hash != verified {
                    return Err(AppError::conflict(
                        "Password was changed concurrently, please retry",
                    ));
                }
                u.change_password(password_hash.clone(), &actor);
                Ok(())
            })
            .await?;

        info!(user_id = %actor, "Password changed");
        Ok(())
    }
}
