//! 请求命令（创建与更新共用）

use chrono::NaiveDate;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{DEFAULT_PAYMENT_TERMS_DAYS, PurchaseOrderStatus, SupplierId, SupplierTypeId};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveSupplierType {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<DataStatus>,
}

fn default_payment_terms() -> i32 {
    DEFAULT_PAYMENT_TERMS_DAYS
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveSupplier {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub supplier_type_id: Option<SupplierTypeId>,
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
    #[serde(default = "default_payment_terms")]
    #[validate(range(min = 0, max = 3650))]
    pub payment_terms_days: i32,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePurchaseOrder {
    #[validate(length(min = 1, max = 50))]
    pub order_number: String,
    pub supplier_id: SupplierId,
    pub material_id: MaterialCardId,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_price: Decimal,
    /// 缺省为当天
    pub order_date: Option<NaiveDate>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub status: Option<PurchaseOrderStatus>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
