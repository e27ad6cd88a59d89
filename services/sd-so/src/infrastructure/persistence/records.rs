//! 销售表映射

use chrono::NaiveDate;
use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_domain_core::{DataStatus, Decimal};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{Customer, CustomerId, CustomerOrder, CustomerOrderId, CustomerOrderStatus};

#[derive(Debug, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Decimal,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for Customer {
    type Row = CustomerRow;

    const TABLE: &'static str = "customers";
    const COLUMNS: &'static str = "id, code, name, tax_number, contact_person, email, phone, address, \
         credit_limit, status, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] =
        &["code", "name", "tax_number", "contact_person", "email"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: CustomerRow) -> AppResult<Self> {
        Ok(Self {
            id: CustomerId(row.id),
            code: row.code,
            name: row.name,
            tax_number: row.tax_number,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            address: row.address,
            credit_limit: row.credit_limit,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO customers (id, code, name, tax_number, contact_person, email, phone, address,
                                   credit_limit, status,
                                   created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.tax_number.clone())
        .bind(self.contact_person.clone())
        .bind(self.email.clone())
        .bind(self.phone.clone())
        .bind(self.address.clone())
        .bind(self.credit_limit)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE customers
            SET code = $2, name = $3, tax_number = $4, contact_person = $5, email = $6, phone = $7,
                address = $8, credit_limit = $9, status = $10, updated_at = $11, updated_by = $12
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.tax_number.clone())
        .bind(self.contact_person.clone())
        .bind(self.email.clone())
        .bind(self.phone.clone())
        .bind(self.address.clone())
        .bind(self.credit_limit)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct CustomerOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    pub status: i16,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for CustomerOrder {
    type Row = CustomerOrderRow;

    const TABLE: &'static str = "customer_orders";
    const COLUMNS: &'static str = "id, order_number, customer_id, material_id, quantity, unit_price, \
         total_amount, order_date, delivery_date, status, notes, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["order_number", "notes"];
    const ORDER_BY: &'static str = "order_date DESC, order_number ASC";

    fn from_row(row: CustomerOrderRow) -> AppResult<Self> {
        Ok(Self {
            id: CustomerOrderId(row.id),
            order_number: row.order_number,
            customer_id: CustomerId(row.customer_id),
            material_id: MaterialCardId(row.material_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_amount: row.total_amount,
            order_date: row.order_date,
            delivery_date: row.delivery_date,
            status: CustomerOrderStatus::try_from(row.status)?,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO customer_orders (id, order_number, customer_id, material_id, quantity,
                                         unit_price, total_amount, order_date, delivery_date,
                                         status, notes,
                                         created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.customer_id.0)
        .bind(self.material_id.0)
        .bind(self.quantity)
        .bind(self.unit_price)
        .bind(self.total_amount)
        .bind(self.order_date)
        .bind(self.delivery_date)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE customer_orders
            SET order_number = $2, customer_id = $3, material_id = $4, quantity = $5,
                unit_price = $6, total_amount = $7, order_date = $8, delivery_date = $9,
                status = $10, notes = $11, updated_at = $12, updated_by = $13
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.customer_id.0)
        .bind(self.material_id.0)
        .bind(self.quantity)
        .bind(self.unit_price)
        .bind(self.total_amount)
        .bind(self.order_date)
        .bind(self.delivery_date)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}
