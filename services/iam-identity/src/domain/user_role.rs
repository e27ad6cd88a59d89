//! 用户-角色关联

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{DataStatus, EntityId, Record, UniqueKey, entity_id, impl_aggregate_root};
use uuid::Uuid;

use super::role::RoleId;

entity_id!(UserRoleId);

#[derive(Debug, Clone)]
pub struct UserRole {
    pub id: UserRoleId,
    pub user_id: UserId,
    pub role_id: RoleId,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(UserRole, UserRoleId);

impl UserRole {
    pub fn new(user_id: UserId, role_id: RoleId, created_by: Option<UserId>) -> Self {
        Self {
            id: UserRoleId::new(),
            user_id,
            role_id,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }
}

impl Record for UserRole {
    const NAME: &'static str = "UserRole";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::pair(
            ("user_id", self.user_id.as_uuid()),
            ("role_id", self.role_id.as_uuid()),
        )]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![
            ("user_id", self.user_id.as_uuid()),
            ("role_id", self.role_id.as_uuid()),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        Vec::new()
    }
}
