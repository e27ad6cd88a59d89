//! erp-auth-core - 认证核心库
//!
//! 令牌签发与校验、权限匹配、令牌吊销

mod permission;
mod revocation;

pub use permission::*;
pub use revocation::*;

use chrono::{Duration, Utc};
use erp_common::UserId;
use erp_errors::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 访问令牌类型标识
pub const ACCESS_TOKEN: &str = "access";
/// 刷新令牌类型标识
pub const REFRESH_TOKEN: &str = "refresh";

/// 令牌载荷
///
/// 标准字段沿用 RFC 7519 命名；`token_type` 区分访问令牌与刷新令牌，
/// 刷新令牌的 `roles`/`permissions` 恒为空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID
    pub sub: String,
    #[serde(default)]
    pub name: String,
    pub iat: i64,
    pub exp: i64,
    /// 令牌唯一标识，吊销以此为键
    pub jti: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// 签发令牌所需的用户信息
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub username: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl TokenSubject {
    /// 去掉角色与权限，用于刷新令牌
    fn bare(&self) -> Self {
        Self {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }
}

impl Claims {
    fn issue(subject: &TokenSubject, kind: &str, ttl_secs: i64, issuer: &str, audience: &str) -> Self {
        let issued_at = Utc::now();
        Self {
            sub: subject.user_id.0.to_string(),
            name: subject.username.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(ttl_secs)).timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_owned(),
            aud: audience.to_owned(),
            token_type: kind.to_owned(),
            roles: subject.roles.clone(),
            permissions: subject.permissions.clone(),
        }
    }

    pub fn user_id(&self) -> AppResult<UserId> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// 是否拥有权限（支持 `*` 与 `resource.*` 通配）
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| permission_matches(granted, permission))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }

    /// 缺少权限时返回 403
    pub fn ensure_permission(&self, permission: &str) -> AppResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!("Missing permission: {}", permission)))
        }
    }

    /// 缺少角色时返回 403
    pub fn ensure_role(&self, role: &str) -> AppResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!("Missing role: {}", role)))
        }
    }

    /// 剩余有效期（秒），已过期时为 0
    pub fn remaining_secs(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

/// 登录与刷新返回的令牌对
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 访问令牌有效期（秒）
    pub expires_in: i64,
    pub token_type: String,
}

/// HS256 令牌签发与校验
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: i64,
    refresh_ttl: i64,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_token_expires_in: i64,
        refresh_token_expires_in: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let issuer = issuer.into();
        let audience = audience.into();

        // 不留时钟偏差余量，exp 到点即失效
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl: access_token_expires_in,
            refresh_ttl: refresh_token_expires_in,
            issuer,
            audience,
        }
    }

    fn sign(&self, subject: &TokenSubject, kind: &str, ttl_secs: i64) -> AppResult<String> {
        let claims = Claims::issue(subject, kind, ttl_secs, &self.issuer, &self.audience);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign {} token: {}", kind, e)))
    }

    pub fn generate_access_token(&self, subject: &TokenSubject) -> AppResult<String> {
        self.sign(subject, ACCESS_TOKEN, self.access_ttl)
    }

    pub fn generate_refresh_token(&self, subject: &TokenSubject) -> AppResult<String> {
        self.sign(&subject.bare(), REFRESH_TOKEN, self.refresh_ttl)
    }

    pub fn generate_token_pair(&self, subject: &TokenSubject) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(subject)?,
            refresh_token: self.generate_refresh_token(subject)?,
            expires_in: self.access_ttl,
            token_type: "Bearer".to_string(),
        })
    }

    /// 校验签名、issuer、audience 与过期时间，不区分令牌类型
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?;

        match (claims.token_type.is_empty(), claims.jti.is_empty()) {
            (true, _) => Err(AppError::unauthorized("Token type not specified")),
            (_, true) => Err(AppError::unauthorized("Token ID (jti) missing")),
            _ => Ok(claims),
        }
    }

    fn validate_kind(&self, token: &str, kind: &str) -> AppResult<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != kind {
            return Err(AppError::unauthorized(format!("Expected {} token", kind)));
        }
        Ok(claims)
    }

    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        self.validate_kind(token, ACCESS_TOKEN)
    }

    pub fn validate_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.validate_kind(token, REFRESH_TOKEN)
    }
}

/// 要求权限，否则以 403 提前返回
#[macro_export]
macro_rules! require_permission {
    ($claims:expr, $permission:expr) => {
        $claims.ensure_permission($permission)?
    };
}

/// 要求角色，否则以 403 提前返回
#[macro_export]
macro_rules! require_role {
    ($claims:expr, $role:expr) => {
        $claims.ensure_role($role)?
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-chars-long";

    fn service() -> TokenService {
        TokenService::new(SECRET, 3600, 86400, "forge-erp", "forge-erp-api")
    }

    fn subject(permissions: &[&str], roles: &[&str]) -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(),
            username: "alice".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_access_token_roundtrip_keeps_claims() {
        let service = service();
        let subject = subject(&["materials.read"], &["Planner"]);
        let token = service.generate_access_token(&subject).unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), subject.user_id);
        assert_eq!(claims.name, "alice");
        assert!(claims.has_role("Planner"));
        assert!(claims.has_permission("materials.read"));
        assert!(!claims.has_permission("materials.delete"));
    }

    #[test]
    fn test_permission_sets() {
        let service = service();
        let token = service
            .generate_access_token(&subject(&["work-orders.*", "materials.read"], &[]))
            .unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert!(claims.has_all_permissions(&["work-orders.create", "materials.read"]));
        assert!(!claims.has_all_permissions(&["work-orders.create", "materials.update"]));
        assert!(claims.has_any_permission(&["materials.update", "work-orders.delete"]));
        assert!(!claims.has_any_permission(&["users.read", "roles.read"]));
        assert!(!claims.has_any_permission(&[]));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(SECRET, -3600, -3600, "forge-erp", "forge-erp-api");
        let token = service.generate_access_token(&subject(&[], &[])).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = TokenService::new(
            "another-secret-key-at-least-32-chars",
            3600,
            3600,
            "forge-erp",
            "forge-erp-api",
        );
        let token = other.generate_access_token(&subject(&[], &[])).unwrap();
        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = service();
        let reader = service
            .generate_access_token(&subject(&["materials.read"], &[]))
            .unwrap();
        let admin = service.generate_access_token(&subject(&["*"], &["Admin"])).unwrap();

        // 管理员的 header.payload 拼接普通用户的签名
        let (admin_body, _) = admin.rsplit_once('.').unwrap();
        let (_, reader_sig) = reader.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", admin_body, reader_sig);

        assert!(service.validate_token(&forged).is_err());
    }

    #[test]
    fn test_issuer_and_audience_checked() {
        let foreign = TokenService::new(SECRET, 3600, 3600, "someone-else", "forge-erp-api");
        let token = foreign.generate_access_token(&subject(&[], &[])).unwrap();
        assert!(service().validate_token(&token).is_err());

        let foreign = TokenService::new(SECRET, 3600, 3600, "forge-erp", "mobile-app");
        let token = foreign.generate_access_token(&subject(&[], &[])).unwrap();
        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_token_type_enforced() {
        let service = service();
        let pair = service
            .generate_token_pair(&subject(&["*"], &["Admin"]))
            .unwrap();

        assert!(service.validate_access_token(&pair.refresh_token).is_err());
        assert!(service.validate_refresh_token(&pair.access_token).is_err());

        let refresh = service.validate_refresh_token(&pair.refresh_token).unwrap();
        assert!(refresh.permissions.is_empty());
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);
    }

    fn guarded(claims: &Claims) -> AppResult<()> {
        require_permission!(claims, "warehouses.delete");
        require_role!(claims, "Storekeeper");
        Ok(())
    }

    #[test]
    fn test_require_macros() {
        let service = service();
        let token = service
            .generate_access_token(&subject(&["warehouses.*"], &["Storekeeper"]))
            .unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert!(guarded(&claims).is_ok());

        let token = service
            .generate_access_token(&subject(&["warehouses.read"], &["Storekeeper"]))
            .unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert!(matches!(guarded(&claims), Err(AppError::Forbidden(_))));
    }
}
