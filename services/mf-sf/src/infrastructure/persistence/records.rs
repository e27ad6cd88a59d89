//! 车间执行表映射

use chrono::{DateTime, Utc};
use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_domain_core::Decimal;
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;
use mf_eng::domain::BomHeaderId;
use sc_wm::domain::{LocationId, WarehouseId};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{
    MaterialConsumption, MaterialConsumptionId, OperationStatus, ProductionConfirmation,
    ProductionConfirmationId, WorkOrder, WorkOrderId, WorkOrderOperation, WorkOrderOperationId,
    WorkOrderStatus,
};

#[derive(Debug, FromRow)]
pub struct WorkOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub product_material_id: Uuid,
    pub bom_header_id: Option<Uuid>,
    pub planned_quantity: Decimal,
    pub produced_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub priority: i16,
    pub status: i16,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for WorkOrder {
    type Row = WorkOrderRow;

    const TABLE: &'static str = "work_orders";
    const COLUMNS: &'static str = "id, order_number, product_material_id, bom_header_id, \
         planned_quantity, produced_quantity, scrap_quantity, planned_start, planned_end, \
         actual_start, actual_end, priority, status, notes, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["order_number", "notes"];
    const ORDER_BY: &'static str = "priority ASC, order_number ASC";

    fn from_row(row: WorkOrderRow) -> AppResult<Self> {
        Ok(Self {
            id: WorkOrderId(row.id),
            order_number: row.order_number,
            product_material_id: MaterialCardId(row.product_material_id),
            bom_header_id: row.bom_header_id.map(BomHeaderId),
            planned_quantity: row.planned_quantity,
            produced_quantity: row.produced_quantity,
            scrap_quantity: row.scrap_quantity,
            planned_start: row.planned_start,
            planned_end: row.planned_end,
            actual_start: row.actual_start,
            actual_end: row.actual_end,
            priority: row.priority,
            status: WorkOrderStatus::try_from(row.status)?,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO work_orders (id, order_number, product_material_id, bom_header_id,
                                     planned_quantity, produced_quantity, scrap_quantity,
                                     planned_start, planned_end, actual_start, actual_end,
                                     priority, status, notes,
                                     created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19)
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.product_material_id.0)
        .bind(self.bom_header_id.map(|id| id.0))
        .bind(self.planned_quantity)
        .bind(self.produced_quantity)
        .bind(self.scrap_quantity)
        .bind(self.planned_start)
        .bind(self.planned_end)
        .bind(self.actual_start)
        .bind(self.actual_end)
        .bind(self.priority)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE work_orders
            SET order_number = $2, product_material_id = $3, bom_header_id = $4,
                planned_quantity = $5, produced_quantity = $6, scrap_quantity = $7,
                planned_start = $8, planned_end = $9, actual_start = $10, actual_end = $11,
                priority = $12, status = $13, notes = $14, updated_at = $15, updated_by = $16
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.product_material_id.0)
        .bind(self.bom_header_id.map(|id| id.0))
        .bind(self.planned_quantity)
        .bind(self.produced_quantity)
        .bind(self.scrap_quantity)
        .bind(self.planned_start)
        .bind(self.planned_end)
        .bind(self.actual_start)
        .bind(self.actual_end)
        .bind(self.priority)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct OperationRow {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub sequence: i32,
    pub name: String,
    pub work_center: Option<String>,
    pub planned_minutes: i32,
    pub actual_minutes: i32,
    pub status: i16,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for WorkOrderOperation {
    type Row = OperationRow;

    const TABLE: &'static str = "work_order_operations";
    const COLUMNS: &'static str = "id, work_order_id, sequence, name, work_center, planned_minutes, \
         actual_minutes, status, notes, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "work_center", "notes"];
    const ORDER_BY: &'static str = "work_order_id ASC, sequence ASC";

    fn from_row(row: OperationRow) -> AppResult<Self> {
        Ok(Self {
            id: WorkOrderOperationId(row.id),
            work_order_id: WorkOrderId(row.work_order_id),
            sequence: row.sequence,
            name: row.name,
            work_center: row.work_center,
            planned_minutes: row.planned_minutes,
            actual_minutes: row.actual_minutes,
            status: OperationStatus::try_from(row.status)?,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO work_order_operations (id, work_order_id, sequence, name, work_center,
                                               planned_minutes, actual_minutes, status, notes,
                                               created_at, created_by, updated_at, updated_by,
                                               is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(self.id.0)
        .bind(self.work_order_id.0)
        .bind(self.sequence)
        .bind(self.name.clone())
        .bind(self.work_center.clone())
        .bind(self.planned_minutes)
        .bind(self.actual_minutes)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE work_order_operations
            SET sequence = $2, name = $3, work_center = $4, planned_minutes = $5,
                actual_minutes = $6, status = $7, notes = $8, updated_at = $9, updated_by = $10
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.sequence)
        .bind(self.name.clone())
        .bind(self.work_center.clone())
        .bind(self.planned_minutes)
        .bind(self.actual_minutes)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct ConfirmationRow {
    pub id: Uuid,
    pub confirmation_number: String,
    pub work_order_id: Uuid,
    pub operation_id: Option<Uuid>,
    pub confirmed_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub confirmation_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for ProductionConfirmation {
    type Row = ConfirmationRow;

    const TABLE: &'static str = "production_confirmations";
    const COLUMNS: &'static str = "id, confirmation_number, work_order_id, operation_id, \
         confirmed_quantity, scrap_quantity, confirmation_date, notes, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["confirmation_number", "notes"];
    const ORDER_BY: &'static str = "confirmation_date DESC";

    fn from_row(row: ConfirmationRow) -> AppResult<Self> {
        Ok(Self {
            id: ProductionConfirmationId(row.id),
            confirmation_number: row.confirmation_number,
            work_order_id: WorkOrderId(row.work_order_id),
            operation_id: row.operation_id.map(WorkOrderOperationId),
            confirmed_quantity: row.confirmed_quantity,
            scrap_quantity: row.scrap_quantity,
            confirmation_date: row.confirmation_date,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO production_confirmations (id, confirmation_number, work_order_id,
                                                  operation_id, confirmed_quantity, scrap_quantity,
                                                  confirmation_date, notes,
                                                  created_at, created_by, updated_at, updated_by,
                                                  is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(self.id.0)
        .bind(self.confirmation_number.clone())
        .bind(self.work_order_id.0)
        .bind(self.operation_id.map(|id| id.0))
        .bind(self.confirmed_quantity)
        .bind(self.scrap_quantity)
        .bind(self.confirmation_date)
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    /// 仅说明可改
    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE production_confirmations
            SET notes = $2, updated_at = $3, updated_by = $4
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct ConsumptionRow {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub material_id: Uuid,
    pub warehouse_id: Uuid,
    pub location_id: Option<Uuid>,
    pub quantity: Decimal,
    pub consumption_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for MaterialConsumption {
    type Row = ConsumptionRow;

    const TABLE: &'static str = "material_consumptions";
    const COLUMNS: &'static str = "id, work_order_id, material_id, warehouse_id, location_id, \
         quantity, consumption_date, notes, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["notes"];
    const ORDER_BY: &'static str = "consumption_date DESC";

    fn from_row(row: ConsumptionRow) -> AppResult<Self> {
        Ok(Self {
            id: MaterialConsumptionId(row.id),
            work_order_id: WorkOrderId(row.work_order_id),
            material_id: MaterialCardId(row.material_id),
            warehouse_id: WarehouseId(row.warehouse_id),
            location_id: row.location_id.map(LocationId),
            quantity: row.quantity,
            consumption_date: row.consumption_date,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO material_consumptions (id, work_order_id, material_id, warehouse_id,
                                               location_id, quantity, consumption_date, notes,
                                               created_at, created_by, updated_at, updated_by,
                                               is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(self.id.0)
        .bind(self.work_order_id.0)
        .bind(self.material_id.0)
        .bind(self.warehouse_id.0)
        .bind(self.location_id.map(|id| id.0))
        .bind(self.quantity)
        .bind(self.consumption_date)
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE material_consumptions
            SET quantity = $2, consumption_date = $3, notes = $4, updated_at = $5, updated_by = $6
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.quantity)
        .bind(self.consumption_date)
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}
