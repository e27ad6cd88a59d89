//! 角色与权限聚合

use erp_auth_core::TokenSubject;
use erp_crud_core::CrudHandler;
use erp_domain_core::EntityId;
use erp_errors::AppResult;
use serde::Serialize;

use crate::domain::{Role, User, UserRole};

/// 用户的有效角色与权限
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Access {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl Access {
    /// 合并多个角色：角色名与权限分别排序去重
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut access = Self::default();
        for role in roles {
            access.roles.push(role.name.clone());
            access.permissions.extend(role.permissions.iter().cloned());
        }
        access.roles.sort();
        access.roles.dedup();
        access.permissions.sort();
        access.permissions.dedup();
        access
    }

    pub fn subject_for(&self, user: &User) -> TokenSubject {
        TokenSubject {
            user_id: user.id.clone(),
            username: user.username.to_string(),
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

/// 通过用户-角色关联解析用户的有效访问权限
///
/// 仅计入状态为 Active 且未删除的关联和角色。
#[derive(Clone)]
pub struct AccessResolver {
    roles: CrudHandler<Role>,
    user_roles: CrudHandler<UserRole>,
}

impl AccessResolver {
    pub fn new(roles: CrudHandler<Role>, user_roles: CrudHandler<UserRole>) -> Self {
        Self { roles, user_roles }
    }

    pub async fn resolve(&self, user: &User) -> AppResult<Access> {
        let assignments = self
            .user_roles
            .children("user_id", user.id.as_uuid())
            .await?;

        let mut roles = Vec::with_capacity(assignments.len());
        for assignment in assignments.iter().filter(|a| a.status.is_active()) {
            match self.roles.find(&assignment.role_id).await? {
                Some(role) if role.is_active() => roles.push(role),
                _ => {}
            }
        }

        Ok(Access::from_roles(&roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_is_sorted_and_deduplicated() {
        let clerk = Role::new(
            "Clerk".into(),
            None,
            vec!["suppliers.read".into(), "customers.read".into()],
            None,
        )
        .unwrap();
        let buyer = Role::new(
            "Buyer".into(),
            None,
            vec!["purchase-orders.*".into(), "suppliers.read".into()],
            None,
        )
        .unwrap();

        let access = Access::from_roles([&clerk, &buyer]);
        assert_eq!(access.roles, vec!["Buyer", "Clerk"]);
        assert_eq!(
            access.permissions,
            vec!["customers.read", "purchase-orders.*", "suppliers.read"]
        );
    }
}
