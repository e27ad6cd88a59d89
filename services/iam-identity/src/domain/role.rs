//! 角色实体

use erp_auth_core::is_valid_permission_code;
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{DataStatus, Record, UniqueKey, entity_id, impl_aggregate_root};
use erp_errors::{AppError, AppResult};

entity_id!(
    /// 角色 ID
    RoleId
);

/// 内置管理员角色名
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
    /// 权限码，已排序去重
    pub permissions: Vec<String>,
    /// 系统角色不可删除
    pub is_system: bool,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(Role, RoleId);

impl Role {
    pub fn new(
        name: String,
        description: Option<String>,
        permissions: Vec<String>,
        created_by: Option<UserId>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: RoleId::new(),
            name,
            description,
            permissions: normalize_permissions(permissions)?,
            is_system: false,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        })
    }

    /// 拥有全部权限的系统管理员角色
    pub fn administrator() -> Self {
        Self {
            id: RoleId::new(),
            name: ADMIN_ROLE.to_string(),
            description: Some("Built-in administrator role".to_string()),
            permissions: vec![erp_auth_core::WILDCARD.to_string()],
            is_system: true,
            status: DataStatus::Active,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn set_permissions(&mut self, permissions: Vec<String>) -> AppResult<()> {
        self.permissions = normalize_permissions(permissions)?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

/// 校验权限码并排序去重
pub fn normalize_permissions(permissions: Vec<String>) -> AppResult<Vec<String>> {
    let mut normalized = Vec::with_capacity(permissions.len());
    for permission in permissions {
        let permission = permission.trim().to_string();
        if !is_valid_permission_code(&permission) {
            return Err(AppError::validation(format!(
                "Invalid permission code: '{}'",
                permission
            )));
        }
        normalized.push(permission);
    }
    normalized.sort();
    normalized.dedup();
    Ok(normalized)
}

impl Record for Role {
    const NAME: &'static str = "Role";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("name", &self.name)]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.name.as_str()];
        text.extend(self.description.as_deref());
        text
    }

    fn ensure_deletable(&self) -> AppResult<()> {
        if self.is_system {
            return Err(AppError::failed_precondition(format!(
                "System role '{}' cannot be deleted",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_are_normalized() {
        let role = Role::new(
            "Storekeeper".into(),
            None,
            vec![
                "warehouses.read".into(),
                " locations.* ".into(),
                "warehouses.read".into(),
            ],
            None,
        )
        .unwrap();
        assert_eq!(role.permissions, vec!["locations.*", "warehouses.read"]);
    }

    #[test]
    fn test_invalid_permission_rejected() {
        for bad in ["", "ware houses.read", "Warehouses.Read"] {
            assert!(Role::new("R".into(), None, vec![bad.into()], None).is_err());
        }
    }

    #[test]
    fn test_system_role_not_deletable() {
        let admin = Role::administrator();
        assert_eq!(admin.permissions, vec!["*"]);
        assert!(matches!(
            admin.ensure_deletable(),
            Err(AppError::FailedPrecondition(_))
        ));

        let plain = Role::new("Viewer".into(), None, vec![], None).unwrap();
        assert!(plain.ensure_deletable().is_ok());
    }
}
