//! 请求命令（创建与更新共用）

use chrono::NaiveDate;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{CustomerId, CustomerOrderStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveCustomer {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 50))]
    pub tax_number: Option<String>,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    pub credit_limit: Decimal,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveCustomerOrder {
    #[validate(length(min = 1, max = 50))]
    pub order_number: String,
    pub customer_id: CustomerId,
    pub material_id: MaterialCardId,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_price: Decimal,
    pub order_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub status: Option<CustomerOrderStatus>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
