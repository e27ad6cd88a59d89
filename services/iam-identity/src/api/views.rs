//! 响应体

use chrono::{DateTime, Utc};
use erp_auth_core::TokenPair;
use erp_common::{AuditInfo, UserId};
use erp_domain_core::DataStatus;
use serde::Serialize;

use crate::application::Access;
use crate::domain::{Role, RoleId, User, UserRole, UserRoleId};

/// 用户（不含密码哈希）
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
    pub phone: Option<String>,
    pub status: DataStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name(),
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            status: user.status,
            last_login_at: user.last_login_at,
            audit: user.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Role> for RoleView {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
            permissions: role.permissions,
            is_system: role.is_system,
            status: role.status,
            audit: role.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRoleView {
    pub id: UserRoleId,
    pub user_id: UserId,
    pub role_id: RoleId,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<UserRole> for UserRoleView {
    fn from(assignment: UserRole) -> Self {
        Self {
            id: assignment.id,
            user_id: assignment.user_id,
            role_id: assignment.role_id,
            status: assignment.status,
            audit: assignment.audit_info,
        }
    }
}

/// 登录/刷新结果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserView,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl LoginResponse {
    pub fn new(tokens: TokenPair, user: User, access: Access) -> Self {
        Self {
            tokens,
            user: user.into(),
            roles: access.roles,
            permissions: access.permissions,
        }
    }
}

/// 当前用户
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: UserView,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl CurrentUser {
    pub fn new(user: User, access: Access) -> Self {
        Self {
            user: user.into(),
            roles: access.roles,
            permissions: access.permissions,
        }
    }
}
