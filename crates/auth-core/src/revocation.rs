//! 令牌吊销列表
//!
//! 登出后按 jti 记录，条目在令牌自然过期时一并淘汰。
//! 不设容量上限：淘汰未过期条目会让已登出的令牌重新生效。

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;

use crate::Claims;

struct UntilTokenExpiry;

impl Expiry<String, Duration> for UntilTokenExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        remaining: &Duration,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(*remaining)
    }
}

/// 已吊销令牌（jti）集合
#[derive(Clone)]
pub struct TokenRevocationList {
    revoked: Cache<String, Duration>,
}

impl TokenRevocationList {
    pub fn new() -> Self {
        Self {
            revoked: Cache::builder().expire_after(UntilTokenExpiry).build(),
        }
    }

    /// 吊销令牌，保留到其过期时刻
    pub async fn revoke(&self, claims: &Claims) {
        let remaining = Duration::from_secs(claims.remaining_secs().max(1));
        self.revoked.insert(claims.jti.clone(), remaining).await;
        tracing::debug!(jti = %claims.jti, "Token revoked");
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.get(jti).await.is_some()
    }
}

impl Default for TokenRevocationList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TokenService, TokenSubject};
    use erp_common::UserId;

    #[tokio::test]
    async fn test_revoked_jti_is_reported() {
        let service = TokenService::new(
            "test-secret-key-at-least-32-chars-long",
            3600,
            3600,
            "forge-erp",
            "forge-erp-api",
        );
        let subject = TokenSubject {
            user_id: UserId::new(),
            username: "bob".to_string(),
            roles: vec![],
            permissions: vec![],
        };
        let first = service
            .validate_token(&service.generate_access_token(&subject).unwrap())
            .unwrap();
        let second = service
            .validate_token(&service.generate_access_token(&subject).unwrap())
            .unwrap();

        let list = TokenRevocationList::new();
        list.revoke(&first).await;

        assert!(list.is_revoked(&first.jti).await);
        assert!(!list.is_revoked(&second.jti).await);
    }

    fn claims(jti: String) -> Claims {
        Claims {
            sub: UserId::new().to_string(),
            name: "bob".to_string(),
            iat: 0,
            exp: chrono::Utc::now().timestamp() + 3600,
            jti,
            iss: "forge-erp".to_string(),
            aud: "forge-erp-api".to_string(),
            token_type: crate::ACCESS_TOKEN.to_string(),
            roles: vec![],
            permissions: vec![],
        }
    }

    #[tokio::test]
    async fn test_large_revocation_list_keeps_oldest_entry() {
        let list = TokenRevocationList::new();
        let first = claims("jti-0".to_string());
        list.revoke(&first).await;
        for n in 1..=100_001 {
            list.revoke(&claims(format!("jti-{}", n))).await;
        }
        list.revoked.run_pending_tasks().await;

        assert!(list.is_revoked(&first.jti).await);
        assert!(list.is_revoked("jti-100001").await);
    }
}
