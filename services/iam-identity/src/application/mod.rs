//! 应用层

pub mod access;
pub mod auth;
pub mod commands;
pub mod roles;
pub mod seed;
pub mod user_roles;
pub mod users;

use std::sync::Arc;

use erp_auth_core::{TokenRevocationList, TokenService};
use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;

pub use access::{Access, AccessResolver};
pub use auth::AuthService;
pub use roles::RoleResource;
pub use seed::{IdentitySeeder, SeedOutcome};
pub use user_roles::UserRoleResource;
pub use users::UserResource;

use crate::domain::{Role, User, UserRole};

/// 身份模块的全部处理器
#[derive(Clone)]
pub struct IdentityServices {
    pub users: CrudHandler<User>,
    pub roles: CrudHandler<Role>,
    pub user_roles: CrudHandler<UserRole>,
    pub token_service: Arc<TokenService>,
    pub revocations: TokenRevocationList,
}

impl IdentityServices {
    pub fn new(
        users: Arc<dyn CrudRepository<User>>,
        roles: Arc<dyn CrudRepository<Role>>,
        user_roles: Arc<dyn CrudRepository<UserRole>>,
        token_service: Arc<TokenService>,
        revocations: TokenRevocationList,
    ) -> Self {
        Self {
            users: CrudHandler::new(users),
            roles: CrudHandler::new(roles),
            user_roles: CrudHandler::new(user_roles),
            token_service,
            revocations,
        }
    }

    pub fn access_resolver(&self) -> AccessResolver {
        AccessResolver::new(self.roles.clone(), self.user_roles.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.users.clone(),
            self.access_resolver(),
            self.token_service.clone(),
            self.revocations.clone(),
        )
    }

    pub fn seeder(&self) -> IdentitySeeder {
        IdentitySeeder::new(
            self.users.clone(),
            self.roles.clone(),
            self.user_roles.clone(),
        )
    }

    pub fn user_resource(&self) -> UserResource {
        UserResource::new(self.users.clone())
    }

    pub fn role_resource(&self) -> RoleResource {
        RoleResource::new(self.roles.clone())
    }

    pub fn user_role_resource(&self) -> UserRoleResource {
        UserRoleResource::new(
            self.user_roles.clone(),
            self.users.clone(),
            self.roles.clone(),
        )
    }
}
