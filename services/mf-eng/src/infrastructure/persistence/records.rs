//! BOM 表映射

use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_domain_core::{DataStatus, Decimal};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{BomHeader, BomHeaderId, BomItem, BomItemId};

#[derive(Debug, FromRow)]
pub struct BomHeaderRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub product_material_id: Uuid,
    pub version: String,
    pub base_quantity: Decimal,
    pub description: Option<String>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for BomHeader {
    type Row = BomHeaderRow;

    const TABLE: &'static str = "bom_headers";
    const COLUMNS: &'static str = "id, code, name, product_material_id, version, base_quantity, \
         description, status, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "version", "description"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: BomHeaderRow) -> AppResult<Self> {
        Ok(Self {
            id: BomHeaderId(row.id),
            code: row.code,
            name: row.name,
            product_material_id: MaterialCardId(row.product_material_id),
            version: row.version,
            base_quantity: row.base_quantity,
            description: row.description,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO bom_headers (id, code, name, product_material_id, version, base_quantity,
                                     description, status,
                                     created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.product_material_id.0)
        .bind(self.version.clone())
        .bind(self.base_quantity)
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE bom_headers
            SET code = $2, name = $3, product_material_id = $4, version = $5, base_quantity = $6,
                description = $7, status = $8, updated_at = $9, updated_by = $10
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.product_material_id.0)
        .bind(self.version.clone())
        .bind(self.base_quantity)
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct BomItemRow {
    pub id: Uuid,
    pub bom_header_id: Uuid,
    pub component_material_id: Uuid,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub scrap_rate: Decimal,
    pub sequence: i32,
    pub notes: Option<String>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for BomItem {
    type Row = BomItemRow;

    const TABLE: &'static str = "bom_items";
    const COLUMNS: &'static str = "id, bom_header_id, component_material_id, quantity, unit_of_measure, \
         scrap_rate, sequence, notes, status, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["unit_of_measure", "notes"];
    const ORDER_BY: &'static str = "bom_header_id ASC, sequence ASC";

    fn from_row(row: BomItemRow) -> AppResult<Self> {
        Ok(Self {
            id: BomItemId(row.id),
            bom_header_id: BomHeaderId(row.bom_header_id),
            component_material_id: MaterialCardId(row.component_material_id),
            quantity: row.quantity,
            unit_of_measure: row.unit_of_measure,
            scrap_rate: row.scrap_rate,
            sequence: row.sequence,
            notes: row.notes,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO bom_items (id, bom_header_id, component_material_id, quantity,
                                   unit_of_measure, scrap_rate, sequence, notes, status,
                                   created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(self.id.0)
        .bind(self.bom_header_id.0)
        .bind(self.component_material_id.0)
        .bind(self.quantity)
        .bind(self.unit_of_measure.clone())
        .bind(self.scrap_rate)
        .bind(self.sequence)
        .bind(self.notes.clone())
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE bom_items
            SET quantity = $2, unit_of_measure = $3, scrap_rate = $4, sequence = $5, notes = $6,
                status = $7, updated_at = $8, updated_by = $9
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.quantity)
        .bind(self.unit_of_measure.clone())
        .bind(self.scrap_rate)
        .bind(self.sequence)
        .bind(self.notes.clone())
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}
