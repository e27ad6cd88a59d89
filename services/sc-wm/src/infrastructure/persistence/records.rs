//! 仓库表映射

use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_domain_core::{DataStatus, Decimal};
use erp_errors::AppResult;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{Location, LocationId, Warehouse, WarehouseId};

#[derive(Debug, FromRow)]
pub struct WarehouseRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for Warehouse {
    type Row = WarehouseRow;

    const TABLE: &'static str = "warehouses";
    const COLUMNS: &'static str = "id, code, name, address, description, capacity, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "address", "description"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: WarehouseRow) -> AppResult<Self> {
        Ok(Self {
            id: WarehouseId(row.id),
            code: row.code,
            name: row.name,
            address: row.address,
            description: row.description,
            capacity: row.capacity,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO warehouses (id, code, name, address, description, capacity, status,
                                    created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.address.clone())
        .bind(self.description.clone())
        .bind(self.capacity)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE warehouses
            SET code = $2, name = $3, address = $4, description = $5, capacity = $6, status = $7,
                updated_at = $8, updated_by = $9
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.address.clone())
        .bind(self.description.clone())
        .bind(self.capacity)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct LocationRow {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for Location {
    type Row = LocationRow;

    const TABLE: &'static str = "locations";
    const COLUMNS: &'static str = "id, warehouse_id, code, name, description, capacity, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "description"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: LocationRow) -> AppResult<Self> {
        Ok(Self {
            id: LocationId(row.id),
            warehouse_id: WarehouseId(row.warehouse_id),
            code: row.code,
            name: row.name,
            description: row.description,
            capacity: row.capacity,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO locations (id, warehouse_id, code, name, description, capacity, status,
                                   created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(self.id.0)
        .bind(self.warehouse_id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.capacity)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE locations
            SET code = $2, name = $3, description = $4, capacity = $5, status = $6,
                updated_at = $7, updated_by = $8
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.capacity)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}
