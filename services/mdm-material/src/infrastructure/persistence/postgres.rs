//! 表映射与写入语句

use erp_adapter_postgres::{PgRecord, bind_audit, bind_touch};
use erp_domain_core::DataStatus;
use erp_errors::AppResult;
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;

use super::rows::{MaterialCardRow, MaterialCategoryRow};
use crate::domain::{
    MaterialCard, MaterialCardId, MaterialCategory, MaterialCategoryId, MaterialType, StockLevels,
};

impl PgRecord for MaterialCategory {
    type Row = MaterialCategoryRow;

    const TABLE: &'static str = "material_categories";
    const COLUMNS: &'static str = "id, code, name, description, parent_id, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "description"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: MaterialCategoryRow) -> AppResult<Self> {
        Ok(Self {
            id: MaterialCategoryId(row.id),
            code: row.code,
            name: row.name,
            description: row.description,
            parent_id: row.parent_id.map(MaterialCategoryId),
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO material_categories (id, code, name, description, parent_id, status,
                                             created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.parent_id.map(|p| p.0))
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE material_categories
            SET code = $2, name = $3, description = $4, parent_id = $5, status = $6,
                updated_at = $7, updated_by = $8
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.parent_id.map(|p| p.0))
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

impl PgRecord for MaterialCard {
    type Row = MaterialCardRow;

    const TABLE: &'static str = "material_cards";
    const COLUMNS: &'static str = "id, code, name, description, category_id, material_type, \
         unit_of_measure, unit_price, min_stock_level, max_stock_level, barcode, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "description", "barcode"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: MaterialCardRow) -> AppResult<Self> {
        Ok(Self {
            id: MaterialCardId(row.id),
            code: row.code,
            name: row.name,
            description: row.description,
            category_id: row.category_id.map(MaterialCategoryId),
            material_type: MaterialType::try_from(row.material_type)?,
            unit_of_measure: row.unit_of_measure,
            unit_price: row.unit_price,
            // 数据库约束已保证上下限关系
            stock_levels: StockLevels {
                min: row.min_stock_level,
                max: row.max_stock_level,
            },
            barcode: row.barcode,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO material_cards (id, code, name, description, category_id, material_type,
                                        unit_of_measure, unit_price, min_stock_level, max_stock_level,
                                        barcode, status,
                                        created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.category_id.map(|c| c.0))
        .bind(i16::from(self.material_type))
        .bind(self.unit_of_measure.clone())
        .bind(self.unit_price)
        .bind(self.stock_levels.min)
        .bind(self.stock_levels.max)
        .bind(self.barcode.clone())
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE material_cards
            SET code = $2, name = $3, description = $4, category_id = $5, material_type = $6,
                unit_of_measure = $7, unit_price = $8, min_stock_level = $9, max_stock_level = $10,
                barcode = $11, status = $12, updated_at = $13, updated_by = $14
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(self.category_id.map(|c| c.0))
        .bind(i16::from(self.material_type))
        .bind(self.unit_of_measure.clone())
        .bind(self.unit_price)
        .bind(self.stock_levels.min)
        .bind(self.stock_levels.max)
        .bind(self.barcode.clone())
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}
