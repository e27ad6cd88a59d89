//! 密码值对象
//!
//! 密码策略：
//! - 长度 8-128
//! - 小写、大写、数字、特殊字符中至少三类
//! - 不得为常见弱密码

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use erp_errors::AppError;

/// 常见弱密码列表
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "12345678",
    "123456789",
    "qwerty",
    "qwerty123",
    "abc123",
    "letmein",
    "trustno1",
    "iloveyou",
    "sunshine",
    "passw0rd",
    "password1",
    "password123",
    "p@ssw0rd",
    "p@ssword1",
    "welcome1",
    "welcome123",
    "admin123",
    "admin@123",
    "qwer1234",
    "1q2w3e4r",
    "changeme",
    "letmein1",
];

/// 密码策略
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    /// 需要的最小字符类别数（小写、大写、数字、特殊字符）
    pub min_complexity_types: usize,
    pub check_common_passwords: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            min_complexity_types: 3,
            check_common_passwords: true,
        }
    }
}

impl PasswordPolicy {
    /// 校验明文密码
    pub fn validate(&self, password: &str) -> Result<(), PasswordError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(PasswordError::TooShort(self.min_length));
        }
        if length > self.max_length {
            return Err(PasswordError::TooLong(self.max_length));
        }

        if self.check_common_passwords && is_common(password) {
            return Err(PasswordError::CommonPassword);
        }

        let found_types = complexity_types(password);
        if found_types < self.min_complexity_types {
            return Err(PasswordError::TooWeak {
                required_types: self.min_complexity_types,
                found_types,
            });
        }

        Ok(())
    }
}

fn is_common(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|common| *common == lowered)
}

/// 出现的字符类别数：小写、大写、数字、其他
fn complexity_types(password: &str) -> usize {
    let classes: [fn(char) -> bool; 4] = [
        char::is_lowercase,
        char::is_uppercase,
        char::is_numeric,
        |c| !c.is_alphanumeric(),
    ];
    classes
        .iter()
        .filter(|class| password.chars().any(|c| class(c)))
        .count()
}

/// 哈希后的密码（Argon2 PHC 字符串）
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// 按默认策略校验后哈希
    pub fn from_plain(plain_password: &str) -> Result<Self, PasswordError> {
        Self::from_plain_with_policy(plain_password, &PasswordPolicy::default())
    }

    pub fn from_plain_with_policy(
        plain_password: &str,
        policy: &PasswordPolicy,
    ) -> Result<Self, PasswordError> {
        policy.validate(plain_password)?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(Self(password_hash))
    }

    /// 验证明文密码是否匹配
    pub fn verify(&self, plain_password: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(&self.0).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// 从数据库中的哈希字符串恢复
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}

/// 密码错误
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password is too short (minimum {0} characters)")]
    TooShort(usize),

    #[error("Password is too long (maximum {0} characters)")]
    TooLong(usize),

    #[error(
        "Password is too weak (requires {required_types} character types, found {found_types})"
    )]
    TooWeak {
        required_types: usize,
        found_types: usize,
    },

    #[error("Password is a common/weak password")]
    CommonPassword,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::HashingFailed(_) | PasswordError::InvalidHash(_) => {
                AppError::internal(err.to_string())
            }
            _ => AppError::validation(err.to_string()),
        }
    }
}
