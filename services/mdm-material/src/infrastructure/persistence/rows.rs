//! 数据库行结构

use erp_adapter_postgres::AuditRow;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct MaterialCategoryRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

#[derive(Debug, FromRow)]
pub struct MaterialCardRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub material_type: i16,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub min_stock_level: Decimal,
    pub max_stock_level: Option<Decimal>,
    pub barcode: Option<String>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}
