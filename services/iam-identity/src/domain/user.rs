//! 用户实体

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{DataStatus, Record, UniqueKey, impl_aggregate_root};

use super::password::HashedPassword;
use super::value_objects::{Email, Username};

/// 用户实体
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub status: DataStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(User, UserId);

impl User {
    pub fn new(
        username: Username,
        email: Email,
        password_hash: HashedPassword,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            first_name: None,
            last_name: None,
            phone: None,
            status: DataStatus::Active,
            last_login_at: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }

    /// 记录登录时间（不视为资料变更）
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    pub fn change_password(&mut self, password_hash: HashedPassword, actor: &UserId) {
        self.password_hash = password_hash;
        self.audit_info.update(Some(actor.clone()));
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.username.to_string(),
        }
    }
}

impl Record for User {
    const NAME: &'static str = "User";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::single("username", &self.username),
            UniqueKey::single("email", &self.email),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.username.as_str(), self.email.as_str()];
        text.extend(self.first_name.as_deref());
        text.extend(self.last_name.as_deref());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            Username::new("jdoe").unwrap(),
            Email::new("jdoe@example.com").unwrap(),
            HashedPassword::from_hash("hash"),
            None,
        )
    }

    #[test]
    fn test_display_name() {
        let mut user = user();
        assert_eq!(user.display_name(), "jdoe");
        user.first_name = Some("John".into());
        assert_eq!(user.display_name(), "John");
        user.last_name = Some("Doe".into());
        assert_eq!(user.display_name(), "John Doe");
    }

    #[test]
    fn test_inactive_when_blocked_or_deleted() {
        let mut user = user();
        assert!(user.is_active());
        user.status = DataStatus::Blocked;
        assert!(!user.is_active());

        let mut deleted = self::user();
        deleted.audit_info.mark_deleted(&UserId::new());
        assert!(!deleted.is_active());
    }

    #[test]
    fn test_search_matches_names() {
        let mut user = user();
        user.last_name = Some("Vandermeer".into());
        assert!(user.matches("MEER"));
        assert!(user.matches("example.com"));
        assert!(!user.matches("nobody"));
    }
}
