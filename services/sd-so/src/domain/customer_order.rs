//! 客户订单

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

use super::customer::CustomerId;

entity_id!(CustomerOrderId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CustomerOrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

smallint_enum!(CustomerOrderStatus {
    Pending = 1,
    Confirmed = 2,
    Shipped = 3,
    Delivered = 4,
    Cancelled = 5,
});

impl CustomerOrderStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// 发货后不可取消
    pub const fn valid_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for CustomerOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct CustomerOrder {
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
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(CustomerOrder, CustomerOrderId);

impl CustomerOrder {
    pub fn new(
        order_number: String,
        customer_id: CustomerId,
        material_id: MaterialCardId,
        order_date: NaiveDate,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: CustomerOrderId::new(),
            order_number,
            customer_id,
            material_id,
            quantity: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            order_date,
            delivery_date: None,
            status: CustomerOrderStatus::Pending,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_pricing(&mut self, quantity: Decimal, unit_price: Decimal) -> AppResult<()> {
        ensure_positive("quantity", quantity)?;
        ensure_non_negative("unit_price", unit_price)?;
        self.total_amount = checked_product("total_amount", quantity, unit_price)?;
        self.quantity = quantity;
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn set_schedule(&mut self, order_date: NaiveDate, delivery_date: Option<NaiveDate>) -> AppResult<()> {
        match delivery_date {
            Some(delivery) if delivery < order_date => Err(AppError::validation(format!(
                "delivery_date ({}) must not be before order_date ({})",
                delivery, order_date
            ))),
            _ => {
                self.order_date = order_date;
                self.delivery_date = delivery_date;
                Ok(())
            }
        }
    }

    pub fn ensure_open(&self) -> AppResult<()> {
        if self.status.is_terminal() {
            return Err(AppError::failed_precondition(format!(
                "Customer order {} is {} and can no longer be changed",
                self.order_number, self.status
            )));
        }
        Ok(())
    }

    pub fn transition_to(&mut self, target: CustomerOrderStatus) -> AppResult<()> {
        if target != self.status && !self.status.can_transition_to(target) {
            return Err(AppError::failed_precondition(format!(
                "Customer order {} cannot move from {} to {}",
                self.order_number, self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }
}

impl Record for CustomerOrder {
    const NAME: &'static str = "CustomerOrder";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("order_number", &self.order_number)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![
            ("customer_id", self.customer_id.as_uuid()),
            ("material_id", self.material_id.as_uuid()),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.order_number.as_str()];
        text.extend(self.notes.as_deref());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_not_after_shipping() {
        assert!(CustomerOrderStatus::Confirmed.can_transition_to(CustomerOrderStatus::Cancelled));
        assert!(!CustomerOrderStatus::Shipped.can_transition_to(CustomerOrderStatus::Cancelled));
        assert!(!CustomerOrderStatus::Pending.can_transition_to(CustomerOrderStatus::Shipped));
        assert!(CustomerOrderStatus::Delivered.valid_transitions().is_empty());
    }

    #[test]
    fn test_pricing_overflow_rejected() {
        let mut order = CustomerOrder::new(
            "SO-2".into(),
            CustomerId::new(),
            MaterialCardId::new(),
            NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            None,
        );
        let big = Decimal::new(10_000_000_000, 0);
        let err = order.set_pricing(big, big).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(order.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_order_rules() {
        let order_date = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let mut order = CustomerOrder::new(
            "SO-1".into(),
            CustomerId::new(),
            MaterialCardId::new(),
            order_date,
            None,
        );
        order.set_pricing(Decimal::new(4, 0), Decimal::new(2599, 2)).unwrap();
        assert_eq!(order.total_amount.to_string(), "103.96");

        assert!(order.set_schedule(order_date, order_date.pred_opt()).is_err());
        assert!(order.set_schedule(order_date, order_date.succ_opt()).is_ok());

        order.transition_to(CustomerOrderStatus::Confirmed).unwrap();
        order.transition_to(CustomerOrderStatus::Shipped).unwrap();
        let err = order.transition_to(CustomerOrderStatus::Cancelled).unwrap_err();
        assert_eq!(err.status_code(), 412);
        order.transition_to(CustomerOrderStatus::Delivered).unwrap();
        assert!(order.ensure_open().is_err());
    }
}
