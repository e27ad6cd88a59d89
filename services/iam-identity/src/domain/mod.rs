//! 身份领域模型

pub mod password;
pub mod role;
pub mod user;
pub mod user_role;
pub mod value_objects;

pub use password::{HashedPassword, PasswordError, PasswordPolicy};
pub use role::{ADMIN_ROLE, Role, RoleId};
pub use user::User;
pub use user_role::{UserRole, UserRoleId};
pub use value_objects::{Email, Username};
