//! 用户名与邮箱值对象

use std::fmt;

use erp_errors::AppError;
use serde::{Deserialize, Serialize};

/// 用户名：3-50 个字符，仅字母、数字、下划线、点和连字符，须以字母或数字开头
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_LENGTH: usize = 50;

    pub fn new(username: impl Into<String>) -> Result<Self, UsernameError> {
        let username = username.into().trim().to_string();
        Self::validate(&username)?;
        Ok(Self(username))
    }

    fn validate(username: &str) -> Result<(), UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(UsernameError::InvalidCharacters);
        }

        if !username.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(UsernameError::InvalidStart);
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UsernameError {
    #[error("Username is too short (minimum 3 characters)")]
    TooShort,

    #[error("Username is too long (maximum 50 characters)")]
    TooLong,

    #[error("Username contains invalid characters (only letters, digits, '_', '.' and '-' allowed)")]
    InvalidCharacters,

    #[error("Username must start with a letter or digit")]
    InvalidStart,
}

impl From<UsernameError> for AppError {
    fn from(err: UsernameError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// 邮箱，统一保存为小写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub const MAX_LENGTH: usize = 254;

    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();
        if !Self::is_valid(&email) {
            return Err(EmailError::InvalidFormat(email));
        }
        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        if email.len() > Self::MAX_LENGTH || email.chars().any(char::is_whitespace) {
            return false;
        }
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::validation(err.to_string())
    }
}
