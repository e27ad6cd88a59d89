//! 用户角色分配

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::UserId;
use erp_crud_core::CrudHandler;
use erp_domain_core::EntityId;
use erp_errors::{AppError, AppResult};

use super::commands::{AssignRole, UpdateAssignment};
use crate::api::views::UserRoleView;
use crate::domain::{Role, RoleId, User, UserRole, UserRoleId};

/// `/api/user-roles`
pub struct UserRoleResource {
    user_roles: CrudHandler<UserRole>,
    users: CrudHandler<User>,
    roles: CrudHandler<Role>,
}

impl UserRoleResource {
    pub fn new(
        user_roles: CrudHandler<UserRole>,
        users: CrudHandler<User>,
        roles: CrudHandler<Role>,
    ) -> Self {
        Self {
            user_roles,
            users,
            roles,
        }
    }
}

#[async_trait]
impl CrudResource for UserRoleResource {
    type Entity = UserRole;
    type View = UserRoleView;
    type Create = AssignRole;
    type Update = UpdateAssignment;

    const RESOURCE: &'static str = "user-roles";

    fn lifecycle(&self) -> &CrudHandler<UserRole> {
        &self.user_roles
    }

    async fn create(&self, input: AssignRole, actor: &UserId) -> AppResult<UserRole> {
        let user_id = UserId::from_uuid(input.user_id);
        let role_id = RoleId::from_uuid(input.role_id);

        let user = self
            .users
            .find(&user_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("User {} does not exist", user_id)))?;
        if !user.is_active() {
            return Err(AppError::validation(format!("User {} is not active", user_id)));
        }

        let role = self
            .roles
            .find(&role_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Role {} does not exist", role_id)))?;
        if !role.is_active() {
            return Err(AppError::validation(format!("Role {} is not active", role_id)));
        }

        let mut assignment = UserRole::new(user_id, role_id, Some(actor.clone()));
        if let Some(status) = input.status {
            assignment.status = status;
        }

        self.user_roles.create(assignment).await
    }

    async fn update(
        &self,
        id: UserRoleId,
        input: UpdateAssignment,
        actor: &UserId,
    ) -> AppResult<UserRole> {
        let mut assignment = self.user_roles.get(&id).await?;
        assignment.status = input.status;
        assignment.audit_info.update(Some(actor.clone()));

        self.user_roles.update(assignment).await
    }
}
