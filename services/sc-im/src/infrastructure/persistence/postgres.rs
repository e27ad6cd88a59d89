//! 表映射与写入语句

use erp_adapter_postgres::{PgRecord, bind_audit, bind_touch};
use erp_domain_core::DataStatus;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use sc_wm::domain::{LocationId, WarehouseId};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use uuid::Uuid;

use super::rows::{MaterialMovementRow, StockEntryRow};
use crate::domain::{
    MaterialMovement, MaterialMovementId, MovementType, StockEntry, StockEntryId, StockPoint,
};

fn stock_point(warehouse_id: Option<Uuid>, location_id: Option<Uuid>) -> AppResult<Option<StockPoint>> {
    match (warehouse_id, location_id) {
        (Some(warehouse_id), Some(location_id)) => Ok(Some(StockPoint::new(
            WarehouseId(warehouse_id),
            LocationId(location_id),
        ))),
        (None, None) => Ok(None),
        _ => Err(AppError::internal(
            "Movement endpoint has a warehouse without a location",
        )),
    }
}

impl PgRecord for StockEntry {
    type Row = StockEntryRow;

    const TABLE: &'static str = "stock_entries";
    const COLUMNS: &'static str = "id, material_id, warehouse_id, location_id, quantity, \
         reserved_quantity, unit_cost, status, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &[];
    const ORDER_BY: &'static str = "created_at ASC";

    fn from_row(row: StockEntryRow) -> AppResult<Self> {
        Ok(Self {
            id: StockEntryId(row.id),
            material_id: MaterialCardId(row.material_id),
            point: StockPoint::new(WarehouseId(row.warehouse_id), LocationId(row.location_id)),
            quantity: row.quantity,
            reserved_quantity: row.reserved_quantity,
            unit_cost: row.unit_cost,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO stock_entries (id, material_id, warehouse_id, location_id, quantity,
                                       reserved_quantity, unit_cost, status,
                                       created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(self.id.0)
        .bind(self.material_id.0)
        .bind(self.point.warehouse_id.0)
        .bind(self.point.location_id.0)
        .bind(self.quantity)
        .bind(self.reserved_quantity)
        .bind(self.unit_cost)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE stock_entries
            SET quantity = $2, reserved_quantity = $3, unit_cost = $4, status = $5,
                updated_at = $6, updated_by = $7
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.quantity)
        .bind(self.reserved_quantity)
        .bind(self.unit_cost)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

impl PgRecord for MaterialMovement {
    type Row = MaterialMovementRow;

    const TABLE: &'static str = "material_movements";
    const COLUMNS: &'static str = "id, movement_number, material_id, movement_type, quantity, \
         source_warehouse_id, source_location_id, target_warehouse_id, target_location_id, \
         movement_date, reference, description, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["movement_number", "reference", "description"];
    const ORDER_BY: &'static str = "movement_date DESC, movement_number ASC";

    fn from_row(row: MaterialMovementRow) -> AppResult<Self> {
        Ok(Self {
            id: MaterialMovementId(row.id),
            movement_number: row.movement_number,
            material_id: MaterialCardId(row.material_id),
            movement_type: MovementType::try_from(row.movement_type)?,
            quantity: row.quantity,
            source: stock_point(row.source_warehouse_id, row.source_location_id)?,
            target: stock_point(row.target_warehouse_id, row.target_location_id)?,
            movement_date: row.movement_date,
            reference: row.reference,
            description: row.description,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO material_movements (id, movement_number, material_id, movement_type, quantity,
                                            source_warehouse_id, source_location_id,
                                            target_warehouse_id, target_location_id,
                                            movement_date, reference, description, status,
                                            created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(self.id.0)
        .bind(self.movement_number.clone())
        .bind(self.material_id.0)
        .bind(i16::from(self.movement_type))
        .bind(self.quantity)
        .bind(self.source.map(|p| p.warehouse_id.0))
        .bind(self.source.map(|p| p.location_id.0))
        .bind(self.target.map(|p| p.warehouse_id.0))
        .bind(self.target.map(|p| p.location_id.0))
        .bind(self.movement_date)
        .bind(self.reference.clone())
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE material_movements
            SET movement_date = $2, reference = $3, description = $4, status = $5,
                updated_at = $6, updated_by = $7
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.movement_date)
        .bind(self.reference.clone())
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}
