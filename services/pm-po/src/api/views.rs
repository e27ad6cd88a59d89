//! 响应体

use chrono::NaiveDate;
use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Serialize;

use crate::domain::{
    PurchaseOrder, PurchaseOrderId, PurchaseOrderStatus, Supplier, SupplierId, SupplierType,
    SupplierTypeId,
};

#[derive(Debug, Clone, Serialize)]
pub struct SupplierTypeView {
    pub id: SupplierTypeId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<SupplierType> for SupplierTypeView {
    fn from(supplier_type: SupplierType) -> Self {
        Self {
            id: supplier_type.id,
            code: supplier_type.code,
            name: supplier_type.name,
            description: supplier_type.description,
            status: supplier_type.status,
            audit: supplier_type.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierView {
    pub id: SupplierId,
    pub code: String,
    pub name: String,
    pub supplier_type_id: Option<SupplierTypeId>,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_terms_days: i32,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Supplier> for SupplierView {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            code: supplier.code,
            name: supplier.name,
            supplier_type_id: supplier.supplier_type_id,
            tax_number: supplier.tax_number,
            contact_person: supplier.contact.contact_person,
            email: supplier.contact.email,
            phone: supplier.contact.phone,
            address: supplier.contact.address,
            payment_terms_days: supplier.payment_terms_days,
            status: supplier.status,
            audit: supplier.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderView {
    pub id: PurchaseOrderId,
    pub order_number: String,
    pub supplier_id: SupplierId,
    pub material_id: MaterialCardId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<PurchaseOrder> for PurchaseOrderView {
    fn from(order: PurchaseOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            supplier_id: order.supplier_id,
            material_id: order.material_id,
            quantity: order.quantity,
            unit_price: order.unit_price,
            total_amount: order.total_amount,
            order_date: order.order_date,
            expected_delivery_date: order.expected_delivery_date,
            status: order.status,
            notes: order.notes,
            audit: order.audit_info,
        }
    }
}
