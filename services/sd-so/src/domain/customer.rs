//! 客户主数据

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, Record, UniqueKey, ensure_non_negative, entity_id, impl_aggregate_root,
};
use erp_errors::AppResult;

entity_id!(
    /// 客户 ID
    CustomerId
);

#[derive(Debug, Clone)]
pub struct Customer {
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
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(Customer, CustomerId);

impl Customer {
    pub fn new(code: String, name: String, created_by: Option<UserId>) -> Self {
        Self {
            id: CustomerId::new(),
            code,
            name,
            tax_number: None,
            contact_person: None,
            email: None,
            phone: None,
            address: None,
            credit_limit: Decimal::ZERO,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_credit_limit(&mut self, credit_limit: Decimal) -> AppResult<()> {
        ensure_non_negative("credit_limit", credit_limit)?;
        self.credit_limit = credit_limit;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

impl Record for Customer {
    const NAME: &'static str = "Customer";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.tax_number.as_deref());
        text.extend(self.contact_person.as_deref());
        text.extend(self.email.as_deref());
        text
    }
}
