//! 库存过账端口

use async_trait::async_trait;
use erp_common::UserId;
use erp_errors::AppResult;

use super::movement::MaterialMovement;

/// 在一个事务内保存移动记录并更新受影响的库存台账
///
/// 实现须锁定涉及的台账行，缺失时仅为增加方向创建台账；任一减少使数量
/// 为负或低于预留量时整体回滚并返回冲突错误。
#[async_trait]
pub trait StockLedger: Send + Sync {
    async fn post(&self, movement: &MaterialMovement, actor: &UserId) -> AppResult<()>;
}
