//! 采购订单

use std::fmt;

use chrono::NaiveDate;
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    Decimal, EntityId, Record, UniqueKey, checked_product, ensure_non_negative, ensure_positive,
    entity_id, impl_aggregate_root, smallint_enum,
};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::supplier::SupplierId;

entity_id!(PurchaseOrderId);

/// 采购订单状态，只能向前推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Approved,
    Ordered,
    Received,
    Cancelled,
}

smallint_enum!(PurchaseOrderStatus {
    Draft = 1,
    Approved = 2,
    Ordered = 3,
    Received = 4,
    Cancelled = 5,
});

impl PurchaseOrderStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Received | Self::Cancelled)
    }

    pub const fn valid_transitions(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Approved, Self::Cancelled],
            Self::Approved => &[Self::Ordered, Self::Cancelled],
            Self::Ordered => &[Self::Received, Self::Cancelled],
            Self::Received | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "Draft",
            Self::Approved => "Approved",
            Self::Ordered => "Ordered",
            Self::Received => "Received",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub order_number: String,
    pub supplier_id: SupplierId,
    pub material_id: MaterialCardId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// quantity × unit_price
    pub total_amount: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub notes: Option<String>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(PurchaseOrder, PurchaseOrderId);

impl PurchaseOrder {
    pub fn new(
        order_number: String,
        supplier_id: SupplierId,
        material_id: MaterialCardId,
        order_date: NaiveDate,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: PurchaseOrderId::new(),
            order_number,
            supplier_id,
            material_id,
            quantity: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            order_date,
            expected_delivery_date: None,
            status: PurchaseOrderStatus::Draft,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    /// 设置数量与单价并重算总额
    pub fn set_pricing(&mut self, quantity: Decimal, unit_price: Decimal) -> AppResult<()> {
        ensure_positive("quantity", quantity)?;
        ensure_non_negative("unit_price", unit_price)?;
        self.total_amount = checked_product("total_amount", quantity, unit_price)?;
        self.quantity = quantity;
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn set_schedule(
        &mut self,
        order_date: NaiveDate,
        expected_delivery_date: Option<NaiveDate>,
    ) -> AppResult<()> {
        if let Some(expected) = expected_delivery_date {
            if expected < order_date {
                return Err(AppError::validation(format!(
                    "expected_delivery_date ({}) must not be before order_date ({})",
                    expected, order_date
                )));
            }
        }
        self.order_date = order_date;
        self.expected_delivery_date = expected_delivery_date;
        Ok(())
    }

    /// 已收货或已取消的订单不再接受修改
    pub fn ensure_open(&self) -> AppResult<()> {
        if self.status.is_terminal() {
            return Err(AppError::failed_precondition(format!(
                "Purchase order {} is {} and can no longer be changed",
                self.order_number, self.status
            )));
        }
        Ok(())
    }

    /// 推进状态；保持原状态视为无变化
    pub fn transition_to(&mut self, target: PurchaseOrderStatus) -> AppResult<()> {
        if target == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(target) {
            return Err(AppError::failed_precondition(format!(
                "Purchase order {} cannot move from {} to {}",
                self.order_number, self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }
}

impl Record for PurchaseOrder {
    const NAME: &'static str = "PurchaseOrder";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("order_number", &self.order_number)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![
            ("supplier_id", self.supplier_id.as_uuid()),
            ("material_id", self.material_id.as_uuid()),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.order_number.as_str()];
        text.extend(self.notes.as_deref());
        text
    }
}
