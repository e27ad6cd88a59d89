//! 生产工单

use std::fmt;

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    Decimal, EntityId, Record, UniqueKey, checked_sum, ensure_non_negative, ensure_positive,
    entity_id, impl_aggregate_root, smallint_enum,
};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use mf_eng::domain::BomHeaderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

entity_id!(
    /// 工单 ID
    WorkOrderId
);

pub const DEFAULT_PRIORITY: i16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    #[default]
    Planned,
    Released,
    InProgress,
    Completed,
    Cancelled,
}

smallint_enum!(WorkOrderStatus {
    Planned = 1,
    Released = 2,
    InProgress = 3,
    Completed = 4,
    Cancelled = 5,
});

impl WorkOrderStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub const fn valid_transitions(self) -> &'static [Self] {
        match self {
            Self::Planned => &[Self::Released, Self::Cancelled],
            Self::Released => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// 可以接收报工
    pub const fn accepts_confirmations(self) -> bool {
        matches!(self, Self::Released | Self::InProgress)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planned => "Planned",
            Self::Released => "Released",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub order_number: String,
    pub product_material_id: MaterialCardId,
    pub bom_header_id: Option<BomHeaderId>,
    pub planned_quantity: Decimal,
    /// 由报工累计
    pub produced_quantity: Decimal,
    pub scrap_quantity: Decimal,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    /// 1 最高，5 最低
    pub priority: i16,
    pub status: WorkOrderStatus,
    pub notes: Option<String>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(WorkOrder, WorkOrderId);

impl WorkOrder {
    pub fn new(order_number: String, product_material_id: MaterialCardId, created_by: Option<UserId>) -> Self {
        Self {
            id: WorkOrderId::new(),
            order_number,
            product_material_id,
            bom_header_id: None,
            planned_quantity: Decimal::ONE,
            produced_quantity: Decimal::ZERO,
            scrap_quantity: Decimal::ZERO,
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            priority: DEFAULT_PRIORITY,
            status: WorkOrderStatus::Planned,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_planned_quantity(&mut self, planned_quantity: Decimal) -> AppResult<()> {
        ensure_positive("planned_quantity", planned_quantity)?;
        self.planned_quantity = planned_quantity;
        Ok(())
    }

    pub fn set_schedule(
        &mut self,
        planned_start: Option<DateTime<Utc>>,
        planned_end: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        if let (Some(start), Some(end)) = (planned_start, planned_end) {
            if end < start {
                return Err(AppError::validation(format!(
                    "planned_end ({}) must not be before planned_start ({})",
                    end, start
                )));
            }
        }
        self.planned_start = planned_start;
        self.planned_end = planned_end;
        Ok(())
    }

    pub fn set_priority(&mut self, priority: i16) -> AppResult<()> {
        if !(1..=5).contains(&priority) {
            return Err(AppError::validation("priority must be between 1 and 5"));
        }
        self.priority = priority;
        Ok(())
    }

    pub fn ensure_open(&self) -> AppResult<()> {
        if self.status.is_terminal() {
            return Err(AppError::failed_precondition(format!(
                "Work order {} is {} and can no longer be changed",
                self.order_number, self.status
            )));
        }
        Ok(())
    }

    /// 状态推进，进入执行与完成时记录实际时间
    pub fn transition_to(&mut self, target: WorkOrderStatus, at: DateTime<Utc>) -> AppResult<()> {
        if target == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(target) {
            return Err(AppError::failed_precondition(format!(
                "Work order {} cannot move from {} to {}",
                self.order_number, self.status, target
            )));
        }
        match target {
            WorkOrderStatus::InProgress => {
                self.actual_start.get_or_insert(at);
            }
            WorkOrderStatus::Completed => {
                self.actual_start.get_or_insert(at);
                self.actual_end = Some(at);
            }
            _ => {}
        }
        self.status = target;
        Ok(())
    }

    /// 累计一次报工
    ///
    /// 首次报工使工单进入执行，产出达到计划数量时完工。
    pub fn record_confirmation(
        &mut self,
        confirmed_quantity: Decimal,
        scrap_quantity: Decimal,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.status.accepts_confirmations() {
            return Err(AppError::failed_precondition(format!(
                "Work order {} is {} and does not accept confirmations",
                self.order_number, self.status
            )));
        }
        ensure_positive("confirmed_quantity", confirmed_quantity)?;
        ensure_non_negative("scrap_quantity", scrap_quantity)?;

        let produced = checked_sum("produced_quantity", self.produced_quantity, confirmed_quantity)?;
        let scrapped = checked_sum("scrap_quantity", self.scrap_quantity, scrap_quantity)?;
        self.produced_quantity = produced;
        self.scrap_quantity = scrapped;
        self.transition_to(WorkOrderStatus::InProgress, at)?;
        if self.produced_quantity >= self.planned_quantity {
            self.transition_to(WorkOrderStatus::Completed, at)?;
        }
        Ok(())
    }
}

impl Record for WorkOrder {
    const NAME: &'static str = "WorkOrder";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("order_number", &self.order_number)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        let mut refs = vec![("product_material_id", self.product_material_id.as_uuid())];
        if let Some(bom) = self.bom_header_id {
            refs.push(("bom_header_id", bom.as_uuid()));
        }
        refs
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.order_number.as_str()];
        text.extend(self.notes.as_deref());
        text
    }
}
