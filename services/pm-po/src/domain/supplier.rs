//! 供应商类型与供应商

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, EntityId, Record, UniqueKey, entity_id, impl_aggregate_root,
};
use erp_errors::{AppError, AppResult};
use uuid::Uuid;

entity_id!(SupplierTypeId);
entity_id!(SupplierId);

/// 默认付款期（天）
pub const DEFAULT_PAYMENT_TERMS_DAYS: i32 = 30;

#[derive(Debug, Clone)]
pub struct SupplierType {
    pub id: SupplierTypeId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(SupplierType, SupplierTypeId);

impl SupplierType {
    pub fn new(code: String, name: String, created_by: Option<UserId>) -> Self {
        Self {
            id: SupplierTypeId::new(),
            code,
            name,
            description: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }
}

impl Record for SupplierType {
    const NAME: &'static str = "SupplierType";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.description.as_deref());
        text
    }
}

/// 联系方式
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierContact {
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Supplier {
    pub id: SupplierId,
    pub code: String,
    pub name: String,
    pub supplier_type_id: Option<SupplierTypeId>,
    pub tax_number: Option<String>,
    pub contact: SupplierContact,
    pub payment_terms_days: i32,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(Supplier, SupplierId);

impl Supplier {
    pub fn new(code: String, name: String, created_by: Option<UserId>) -> Self {
        Self {
            id: SupplierId::new(),
            code,
            name,
            supplier_type_id: None,
            tax_number: None,
            contact: SupplierContact::default(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_payment_terms(&mut self, days: i32) -> AppResult<()> {
        if days < 0 {
            return Err(AppError::validation(
                "payment_terms_days must not be negative",
            ));
        }
        self.payment_terms_days = days;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

impl Record for Supplier {
    const NAME: &'static str = "Supplier";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        self.supplier_type_id
            .iter()
            .map(|t| ("supplier_type_id", t.as_uuid()))
            .collect()
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.tax_number.as_deref());
        text.extend(self.contact.contact_person.as_deref());
        text.extend(self.contact.email.as_deref());
        text
    }
}
