//! 工单工序

use std::fmt;

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{EntityId, Record, UniqueKey, entity_id, impl_aggregate_root, smallint_enum};
use erp_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::work_order::WorkOrderId;

entity_id!(WorkOrderOperationId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

smallint_enum!(OperationStatus {
    Pending = 1,
    InProgress = 2,
    Completed = 3,
});

impl OperationStatus {
    /// 工序只能向前推进，允许跳过执行中
    pub fn can_transition_to(self, target: Self) -> bool {
        i16::from(target) > i16::from(self)
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct WorkOrderOperation {
    pub id: WorkOrderOperationId,
    pub work_order_id: WorkOrderId,
    pub sequence: i32,
    pub name: String,
    pub work_center: Option<String>,
    pub planned_minutes: i32,
    pub actual_minutes: i32,
    pub status: OperationStatus,
    pub notes: Option<String>,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(WorkOrderOperation, WorkOrderOperationId);

impl WorkOrderOperation {
    pub fn new(work_order_id: WorkOrderId, sequence: i32, name: String, created_by: Option<UserId>) -> AppResult<Self> {
        let mut operation = Self {
            id: WorkOrderOperationId::new(),
            work_order_id,
            sequence: 0,
            name,
            work_center: None,
            planned_minutes: 0,
            actual_minutes: 0,
            status: OperationStatus::Pending,
            notes: None,
            audit_info: AuditInfo::new(created_by),
        };
        operation.set_sequence(sequence)?;
        Ok(operation)
    }

    pub fn set_sequence(&mut self, sequence: i32) -> AppResult<()> {
        if sequence < 0 {
            return Err(AppError::validation("sequence must not be negative"));
        }
        self.sequence = sequence;
        Ok(())
    }

    pub fn set_minutes(&mut self, planned_minutes: i32, actual_minutes: i32) -> AppResult<()> {
        if planned_minutes < 0 || actual_minutes < 0 {
            return Err(AppError::validation("planned_minutes and actual_minutes must not be negative"));
        }
        self.planned_minutes = planned_minutes;
        self.actual_minutes = actual_minutes;
        Ok(())
    }

    pub fn transition_to(&mut self, target: OperationStatus) -> AppResult<()> {
        if target != self.status && !self.status.can_transition_to(target) {
            return Err(AppError::failed_precondition(format!(
                "Operation {} cannot move from {} to {}",
                self.sequence, self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }
}

impl Record for WorkOrderOperation {
    const NAME: &'static str = "WorkOrderOperation";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::pair(
            ("work_order_id", self.work_order_id.as_uuid()),
            ("sequence", self.sequence),
        )]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![("work_order_id", self.work_order_id.as_uuid())]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.name.as_str()];
        text.extend(self.work_center.as_deref());
        text.extend(self.notes.as_deref());
        text
    }
}
