//! 采购表映射

use chrono::NaiveDate;
use erp_adapter_postgres::{AuditRow, PgRecord, bind_audit, bind_touch};
use erp_domain_core::{DataStatus, Decimal};
use erp_errors::AppResult;
use mdm_material::domain::MaterialCardId;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{
    PurchaseOrder, PurchaseOrderId, PurchaseOrderStatus, Supplier, SupplierContact, SupplierId,
    SupplierType, SupplierTypeId,
};

#[derive(Debug, FromRow)]
pub struct SupplierTypeRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for SupplierType {
    type Row = SupplierTypeRow;

    const TABLE: &'static str = "supplier_types";
    const COLUMNS: &'static str =
        "id, code, name, description, status, created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "description"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: SupplierTypeRow) -> AppResult<Self> {
        Ok(Self {
            id: SupplierTypeId(row.id),
            code: row.code,
            name: row.name,
            description: row.description,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO supplier_types (id, code, name, description, status,
                                        created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE supplier_types
            SET code = $2, name = $3, description = $4, status = $5, updated_at = $6, updated_by = $7
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.description.clone())
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct SupplierRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub supplier_type_id: Option<Uuid>,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_terms_days: i32,
    pub status: i16,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for Supplier {
    type Row = SupplierRow;

    const TABLE: &'static str = "suppliers";
    const COLUMNS: &'static str = "id, code, name, supplier_type_id, tax_number, contact_person, \
         email, phone, address, payment_terms_days, status, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] =
        &["code", "name", "tax_number", "contact_person", "email"];
    const ORDER_BY: &'static str = "code ASC";

    fn from_row(row: SupplierRow) -> AppResult<Self> {
        Ok(Self {
            id: SupplierId(row.id),
            code: row.code,
            name: row.name,
            supplier_type_id: row.supplier_type_id.map(SupplierTypeId),
            tax_number: row.tax_number,
            contact: SupplierContact {
                contact_person: row.contact_person,
                email: row.email,
                phone: row.phone,
                address: row.address,
            },
            payment_terms_days: row.payment_terms_days,
            status: DataStatus::try_from(row.status)?,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO suppliers (id, code, name, supplier_type_id, tax_number, contact_person,
                                   email, phone, address, payment_terms_days, status,
                                   created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.supplier_type_id.map(|t| t.0))
        .bind(self.tax_number.clone())
        .bind(self.contact.contact_person.clone())
        .bind(self.contact.email.clone())
        .bind(self.contact.phone.clone())
        .bind(self.contact.address.clone())
        .bind(self.payment_terms_days)
        .bind(i16::from(self.status));
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE suppliers
            SET code = $2, name = $3, supplier_type_id = $4, tax_number = $5, contact_person = $6,
                email = $7, phone = $8, address = $9, payment_terms_days = $10, status = $11,
                updated_at = $12, updated_by = $13
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.code.clone())
        .bind(self.name.clone())
        .bind(self.supplier_type_id.map(|t| t.0))
        .bind(self.tax_number.clone())
        .bind(self.contact.contact_person.clone())
        .bind(self.contact.email.clone())
        .bind(self.contact.phone.clone())
        .bind(self.contact.address.clone())
        .bind(self.payment_terms_days)
        .bind(i16::from(self.status));
        bind_touch(query, &self.audit_info)
    }
}

#[derive(Debug, FromRow)]
pub struct PurchaseOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub supplier_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub status: i16,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditRow,
}

impl PgRecord for PurchaseOrder {
    type Row = PurchaseOrderRow;

    const TABLE: &'static str = "purchase_orders";
    const COLUMNS: &'static str = "id, order_number, supplier_id, material_id, quantity, unit_price, \
         total_amount, order_date, expected_delivery_date, status, notes, \
         created_at, created_by, updated_at, updated_by, is_deleted";
    const SEARCH_COLUMNS: &'static [&'static str] = &["order_number", "notes"];
    const ORDER_BY: &'static str = "order_date DESC, order_number ASC";

    fn from_row(row: PurchaseOrderRow) -> AppResult<Self> {
        Ok(Self {
            id: PurchaseOrderId(row.id),
            order_number: row.order_number,
            supplier_id: SupplierId(row.supplier_id),
            material_id: MaterialCardId(row.material_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_amount: row.total_amount,
            order_date: row.order_date,
            expected_delivery_date: row.expected_delivery_date,
            status: PurchaseOrderStatus::try_from(row.status)?,
            notes: row.notes,
            audit_info: row.audit.into(),
        })
    }

    fn insert_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            INSERT INTO purchase_orders (id, order_number, supplier_id, material_id, quantity,
                                         unit_price, total_amount, order_date, expected_delivery_date,
                                         status, notes,
                                         created_at, created_by, updated_at, updated_by, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.supplier_id.0)
        .bind(self.material_id.0)
        .bind(self.quantity)
        .bind(self.unit_price)
        .bind(self.total_amount)
        .bind(self.order_date)
        .bind(self.expected_delivery_date)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_audit(query, &self.audit_info)
    }

    fn update_query(&self) -> Query<'static, Postgres, PgArguments> {
        let query = sqlx::query(
            r#"
            UPDATE purchase_orders
            SET order_number = $2, supplier_id = $3, material_id = $4, quantity = $5,
                unit_price = $6, total_amount = $7, order_date = $8, expected_delivery_date = $9,
                status = $10, notes = $11, updated_at = $12, updated_by = $13
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(self.id.0)
        .bind(self.order_number.clone())
        .bind(self.supplier_id.0)
        .bind(self.material_id.0)
        .bind(self.quantity)
        .bind(self.unit_price)
        .bind(self.total_amount)
        .bind(self.order_date)
        .bind(self.expected_delivery_date)
        .bind(i16::from(self.status))
        .bind(self.notes.clone());
        bind_touch(query, &self.audit_info)
    }
}
