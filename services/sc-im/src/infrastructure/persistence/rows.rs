//! 数据库行结构

use chrono::{DateTime, Utc};
use erp_adapter_postgres::AuditRow;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct StockEntryRow {
    pub id: Uuid,
    pub material_id: Uuid,
    pub warehouse_id: Uuid,
    pub location_id: Uuid,
    pub quantity: Decimal,
    pub reserved_quantity: Decimal,
    pub unit_cost: Decimal,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

#[derive(Debug, FromRow)]
pub struct MaterialMovementRow {
    pub id: Uuid,
    pub movement_number: String,
    pub material_id: Uuid,
    pub movement_type: i16,
    pub quantity: Decimal,
    pub source_warehouse_id: Option<Uuid>,
    pub source_location_id: Option<Uuid>,
    pub target_warehouse_id: Option<Uuid>,
    pub target_location_id: Option<Uuid>,
    pub movement_date: DateTime<Utc>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}
