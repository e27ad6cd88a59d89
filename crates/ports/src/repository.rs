//! Repository trait 定义

use async_trait::async_trait;
use erp_common::{PagedResult, Pagination, UserId};
use erp_domain_core::{Entity, Record, UniqueKey};
use erp_errors::AppResult;
use uuid::Uuid;

/// 带软删除的通用 CRUD Repository
///
/// 除 `find_deleted*`、`is_taken`、`purge` 外，查询只返回未删除的记录。
#[async_trait]
pub trait CrudRepository<T: Record>: Send + Sync {
    /// 根据 ID 查找未删除记录
    async fn find_by_id(&self, id: &<T as Entity>::Id) -> AppResult<Option<T>>;

    /// 根据 ID 查找已删除记录
    async fn find_deleted_by_id(&self, id: &<T as Entity>::Id) -> AppResult<Option<T>>;

    /// 分页查询未删除记录
    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<T>>;

    /// 分页查询已删除记录
    async fn find_deleted(&self, pagination: &Pagination) -> AppResult<PagedResult<T>>;

    /// 模糊搜索未删除记录
    async fn search(&self, term: &str, pagination: &Pagination) -> AppResult<PagedResult<T>>;

    /// 按外键列查询子记录
    async fn find_by_reference(&self, column: &'static str, parent: Uuid) -> AppResult<Vec<T>>;

    /// 按唯一键查找未删除记录
    async fn find_one_by(&self, key: &UniqueKey) -> AppResult<Option<T>>;

    /// 唯一键是否已被其他记录（含已删除）占用
    async fn is_taken(&self, key: &UniqueKey, exclude: Option<&<T as Entity>::Id>)
    -> AppResult<bool>;

    /// 插入
    async fn insert(&self, entity: &T) -> AppResult<()>;

    /// 更新
    async fn update(&self, entity: &T) -> AppResult<()>;

    /// 锁定未删除记录，修改后写回；修改失败时不写入，记录不存在时返回 None
    ///
    /// 与台账过账等并发写入互斥，修改基于最新行。
    async fn modify(
        &self,
        id: &<T as Entity>::Id,
        change: &(dyn for<'a> Fn(&'a mut T) -> AppResult<()> + Send + Sync),
    ) -> AppResult<Option<T>>;

    /// 软删除，返回是否命中
    async fn soft_delete(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<bool>;

    /// 撤销软删除，返回是否命中
    async fn restore(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<bool>;

    /// 物理删除，返回是否命中
    async fn purge(&self, id: &<T as Entity>::Id) -> AppResult<bool>;
}
