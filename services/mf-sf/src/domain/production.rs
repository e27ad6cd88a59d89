//! 报工过账端口

use async_trait::async_trait;
use erp_common::UserId;
use erp_errors::AppResult;

use super::confirmation::ProductionConfirmation;
use super::work_order::WorkOrder;

/// 在一个事务内保存报工并累计到工单
///
/// 实现须锁定工单行；工单不处于可报工状态时整体回滚并返回前置条件错误。
#[async_trait]
pub trait ProductionLedger: Send + Sync {
    async fn confirm(&self, confirmation: &ProductionConfirmation, actor: &UserId) -> AppResult<WorkOrder>;
}
