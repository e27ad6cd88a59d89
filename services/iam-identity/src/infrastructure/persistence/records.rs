//! 身份表映射

use chrono::{DateTime, Utc};
use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_common::UserId;
use erp_domain_core::DataStatus;
use erp_errors::AppResult;
use sqlx::postgres::PgArguments;
use sqlx::{FromRow, Postgres};
use sqlx::query::Query;
use uuid::Uuid;

use crate::domain::{Email, HashedPassword, Role, RoleId, User, UserRole, UserRoleId, Username};

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub status: i16,
    pub last_login_at: Option<DateTime<Utc>>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for User {
    type Row = UserRow;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, username, email, password_hash, first_name, last_name, \
         phone, status, last_login_at, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["username", "email", "first_name", "last_name"];
    const ORDER_BY: &'static str = "username ASC";

    fn from_row(row: UserRow) -> AppResult<Self> {
        Ok(Self {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: Email::new(row.email)?,
            password_hash: HashedPassword::from_hash(row.password_hash),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            status: DataStatus::try_from(row.status)?,
            last_login_at: row.last_login_at,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                               phone, status, last_login_at,
                               created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(self.id.0)
        .bind(self.username.to_string())
        .bind(self.email.to_string())
        .bind(self.password_hash.as_str().to_string())
        .bind(self.first_name.clone())
        .bind(self.last_name.clone())
        .bind(self.phone.clone())
        .bind(i16::from(self.status))
        .bind(self.last_login_at);
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, first_name = $5, last_name = $6,
                phone = $7, status = $8, last_login_at = $9, updated_at = $10, updated_by = $11
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.username.to_string())
        .bind(self.email.to_string())
        .bind(self.password_hash.as_str().to_string())
        .bind(self.first_name.clone())
        .bind(self.last_name.clone())
        .bind(self.phone.clone())
        .bind(i16::from(self.status))
        .bind(self.last_login_at);
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for Role {
    type Row = RoleRow;

    const TABLE: &'static str = "roles";
    const COLUMNS: &'static str = "id, name, description, permissions, is_system, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "description"];
    const ORDER_BY: &'static str = "name ASC";

    fn from_row(row: RoleRow) -> AppResult<Self> {
        Ok(Self {
            id: RoleId(row.id),
            name: row.name,
            description: row.description,
            permissions: row.permissions,
            is_system: row.is_system,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO roles (id, name, description, permissions, is_system, status,
                               created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(self.id.0)
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.permissions.clone())
        .bind(self.is_system)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, description = $3, permissions = $4, is_system = $5, status = $6,
                updated_at = $7, updated_by = $8
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.permissions.clone())
        .bind(self.is_system)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct UserRoleRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for UserRole {
    type Row = UserRoleRow;

    const TABLE: &'static str = "user_roles";
    const COLUMNS: &'static str = "id, user_id, role_id, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &[];
    const ORDER_BY: &'static str = "created_at ASC";

    fn from_row(row: UserRoleRow) -> AppResult<Self> {
        Ok(Self {
            id: UserRoleId(row.id),
            user_id: UserId(row.user_id),
            role_id: RoleId(row.role_id),
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO user_roles (id, user_id, role_id, status,
                                    created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(self.id.0)
        .bind(self.user_id.0)
        .bind(self.role_id.0)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE user_roles
            SET status = $2, updated_at = $3, updated_by = $4
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}
