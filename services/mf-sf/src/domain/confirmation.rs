//! 报工记录

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    Decimal, EntityId, Record, UniqueKey, ensure_non_negative, ensure_positive, entity_id,
    impl_aggregate_root,
};
use erp_errors::AppResult;
use uuid::Uuid;

use super::operation::WorkOrderOperationId;
use super::work_order::WorkOrderId;

entity_id!(ProductionConfirmationId);

#[derive(Debug, Clone)]
pub struct ProductionConfirmation {
    pub id: ProductionConfirmationId,
    pub confirmation_number: String,
    pub work_order_id: WorkOrderId,
    pub operation_id: Option<WorkOrderOperationId>,
    pub confirmed_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub confirmation_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(ProductionConfirmation, ProductionConfirmationId);

impl ProductionConfirmation {
    pub fn new(
        confirmation_number: String,
        work_order_id: WorkOrderId,
        confirmed_quantity: Decimal,
        scrap_quantity: Decimal,
        confirmation_date: DateTime<Utc>,
        created_by: Option<UserId>,
    ) -> AppResult<Self> {
        ensure_positive("confirmed_quantity", confirmed_quantity)?;
        ensure_non_negative("scrap_quantity", scrap_quantity)?;
        Ok(Self {
            id: ProductionConfirmationId::new(),
            confirmation_number,
            work_order_id,
            operation_id: None,
            confirmed_quantity,
            scrap_quantity,
            confirmation_date,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        })
    }
}

impl Record for ProductionConfirmation {
    const NAME: &'static str = "ProductionConfirmation";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("confirmation_number", &self.confirmation_number)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        let mut refs = vec![("work_order_id", self.work_order_id.as_uuid())];
        if let Some(operation) = self.operation_id {
            refs.push(("operation_id", operation.as_uuid()));
        }
        refs
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.confirmation_number.as_str()];
        text.extend(self.notes.as_deref());
        text
    }
}
