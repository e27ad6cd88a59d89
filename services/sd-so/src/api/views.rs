//! 响应体

use chrono::NaiveDate;
use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Serialize;

use crate::domain::{Customer, CustomerId, CustomerOrder, CustomerOrderId, CustomerOrderStatus};

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub code: String,
    pub name: String,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Decimal,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            code: customer.code,
            name: customer.name,
            tax_number: customer.tax_number,
            contact_person: customer.contact_person,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            credit_limit: customer.credit_limit,
            status: customer.status,
            audit: customer.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerOrderView {
    pub id: CustomerOrderId,
    pub order_number: String,
    pub customer_id: CustomerId,
    pub material_id: MaterialCardId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    pub status: CustomerOrderStatus,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<CustomerOrder> for CustomerOrderView {
    fn from(order: CustomerOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            customer_id: order.customer_id,
            material_id: order.material_id,
            quantity: order.quantity,
            unit_price: order.unit_price,
            total_amount: order.total_amount,
            order_date: order.order_date,
            delivery_date: order.delivery_date,
            status: order.status,
            notes: order.notes,
            audit: order.audit_info,
        }
    }
}
