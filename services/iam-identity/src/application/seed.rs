//! 启动时初始化管理员角色与管理员账号

use erp_config::SeedConfig;
use erp_crud_core::CrudHandler;
use erp_domain_core::UniqueKey;
use erp_errors::AppResult;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::domain::{ADMIN_ROLE, Email, HashedPassword, Role, User, UserRole, Username};

/// 初始化结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub role_created: bool,
    pub user_created: bool,
}

pub struct IdentitySeeder {
    users: CrudHandler<User>,
    roles: CrudHandler<Role>,
    user_roles: CrudHandler<UserRole>,
}

impl IdentitySeeder {
    pub fn new(
        users: CrudHandler<User>,
        roles: CrudHandler<Role>,
        user_roles: CrudHandler<UserRole>,
    ) -> Self {
        Self {
            users,
            roles,
            user_roles,
        }
    }

    /// 幂等：已存在（含已删除）的角色或用户不会重复创建
    pub async fn seed(&self, admin: Option<&SeedConfig>) -> AppResult<SeedOutcome> {
        let mut outcome = SeedOutcome::default();
        let role_key = UniqueKey::single("name", ADMIN_ROLE);

        if !self.roles.repository().is_taken(&role_key, None).await? {
            self.roles.create(Role::administrator()).await?;
            outcome.role_created = true;
            info!(role = ADMIN_ROLE, "Administrator role seeded");
        }

        let Some(admin) = admin else {
            return Ok(outcome);
        };

        let username = Username::new(admin.admin_username.as_str())?;
        let user_key = UniqueKey::single("username", &username);
        if self.users.repository().is_taken(&user_key, None).await? {
            return Ok(outcome);
        }

        let user = self.create_admin(username, admin).await?;
        outcome.user_created = true;

        match self.roles.repository().find_one_by(&role_key).await? {
            Some(role) => {
                self.user_roles
                    .create(UserRole::new(user.id.clone(), role.id, None))
                    .await?;
                info!(user_id = %user.id, username = %user.username, "Administrator user seeded");
            }
            None => warn!(
                user_id = %user.id,
                "Administrator role is deleted, user seeded without role"
            ),
        }

        Ok(outcome)
    }

    async fn create_admin(&self, username: Username, admin: &SeedConfig) -> AppResult<User> {
        let email = Email::new(admin.admin_email.as_str())?;
        let password_hash = HashedPassword::from_plain(admin.admin_password.expose_secret())?;
        self.users
            .create(User::new(username, email, password_hash, None))
            .await
    }
}
