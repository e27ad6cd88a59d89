//! 请求命令

use erp_domain_core::DataStatus;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 创建用户
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub status: Option<DataStatus>,
}

/// 更新用户（不含密码）
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub status: DataStatus,
}

/// 创建或更新角色
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveRole {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub status: Option<DataStatus>,
}

/// 为用户分配角色
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignRole {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub status: Option<DataStatus>,
}

/// 更新分配状态
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAssignment {
    pub status: DataStatus,
}

/// 登录：`login` 可为用户名或邮箱
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginCommand {
    #[validate(length(min = 1, max = 254))]
    pub login: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshCommand {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordCommand {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}
