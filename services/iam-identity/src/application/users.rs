//! 用户管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_errors::AppResult;

use super::commands::{CreateUser, UpdateUser};
use crate::api::views::UserView;
use crate::domain::{Email, HashedPassword, User, Username};

/// `/api/users`
pub struct UserResource {
    users: CrudHandler<User>,
}

impl UserResource {
    pub fn new(users: CrudHandler<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CrudResource for UserResource {
    type Entity = User;
    type View = UserView;
    type Create = CreateUser;
    type Update = UpdateUser;

    const RESOURCE: &'static str = "users";

    fn lifecycle(&self) -> &CrudHandler<User> {
        &self.users
    }

    async fn create(&self, input: CreateUser, actor: &UserId) -> AppResult<User> {
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let password_hash = HashedPassword::from_plain(&input.password)?;

        let mut user = User::new(username, email, password_hash, Some(actor.clone()));
        user.first_name = normalize_optional(input.first_name);
        user.last_name = normalize_optional(input.last_name);
        user.phone = normalize_optional(input.phone);
        if let Some(status) = input.status {
            user.status = status;
        }

        self.users.create(user).await
    }

    async fn update(&self, id: UserId, input: UpdateUser, actor: &UserId) -> AppResult<User> {
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let first_name = normalize_optional(input.first_name);
        let last_name = normalize_optional(input.last_name);
        let phone = normalize_optional(input.phone);

        // 密码与登录时间不随资料更新，行锁内基于最新记录写回
        self.users
            .modify(&id, |user| {
                user.username = username.clone();
                user.email = email.clone();
                user.first_name = first_name.clone();
                user.last_name = last_name.clone();
                user.phone = phone.clone();
                user.status = input.status;
                user.audit_info.update(Some(actor.clone()));
                Ok(())
            })
            .await
    }
}
