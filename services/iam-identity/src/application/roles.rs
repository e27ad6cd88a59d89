//! 角色管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};

use super::commands::SaveRole;
use crate::api::views::RoleView;
use crate::domain::{Role, RoleId};

/// `/api/roles`
pub struct RoleResource {
    roles: CrudHandler<Role>,
}

impl RoleResource {
    pub fn new(roles: CrudHandler<Role>) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl CrudResource for RoleResource {
    type Entity = Role;
    type View = RoleView;
    type Create = SaveRole;
    type Update = SaveRole;

    const RESOURCE: &'static str = "roles";

    fn lifecycle(&self) -> &CrudHandler<Role> {
        &self.roles
    }

    async fn create(&self, input: SaveRole, actor: &UserId) -> AppResult<Role> {
        let name = require_text("name", &input.name, 100)?;
        let mut role = Role::new(
            name,
            normalize_optional(input.description),
            input.permissions,
            Some(actor.clone()),
        )?;
        if let Some(status) = input.status {
            role.status = status;
        }

        self.roles.create(role).await
    }

    async fn update(&self, id: RoleId, input: SaveRole, actor: &UserId) -> AppResult<Role> {
        let mut role = self.roles.get(&id).await?;
        let name = require_text("name", &input.name, 100)?;
        if role.is_system && name != role.name {
            return Err(AppError::failed_precondition(format!(
                "System role '{}' cannot be renamed",
                role.name
            )));
        }

        role.name = name;
        role.description = normalize_optional(input.description);
        role.set_permissions(input.permissions)?;
        if let Some(status) = input.status {
            role.status = status;
        }
        role.audit_info.update(Some(actor.clone()));

        self.roles.update(role).await
    }
}
