//! 通用 CRUD Handler

use std::sync::Arc;

use erp_common::{PagedResult, Pagination, UserId};
use erp_domain_core::{Entity, Record};
use erp_errors::{AppError, AppResult};
use erp_ports::CrudRepository;
use tracing::info;
use uuid::Uuid;

/// 通用 CRUD Handler
///
/// 负责存在性、唯一性和可删除性检查；字段级校验与业务规则由各服务在
/// 构造实体时完成。
pub struct CrudHandler<T: Record> {
    repo: Arc<dyn CrudRepository<T>>,
}

impl<T: Record> Clone for CrudHandler<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<T: Record> CrudHandler<T> {
    pub fn new(repo: Arc<dyn CrudRepository<T>>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn CrudRepository<T>> {
        &self.repo
    }

    // ========== 查询 ==========

    /// 分页查询未删除记录
    pub async fn list(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        self.repo.find_all(&pagination.clone().normalized()).await
    }

    /// 查询未删除记录，不存在或已删除时返回 404
    pub async fn get(&self, id: &<T as Entity>::Id) -> AppResult<T> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    /// 查询未删除记录，不存在时返回 None
    pub async fn find(&self, id: &<T as Entity>::Id) -> AppResult<Option<T>> {
        self.repo.find_by_id(id).await
    }

    /// 分页查询已删除记录
    pub async fn list_deleted(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        self.repo.find_deleted(&pagination.clone().normalized()).await
    }

    /// 模糊搜索，搜索词为空时返回 400
    pub async fn search(&self, term: &str, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }
        self.repo
            .search(term, &pagination.clone().normalized())
            .await
    }

    /// 查询父记录下的子记录
    pub async fn children(&self, column: &'static str, parent: Uuid) -> AppResult<Vec<T>> {
        self.repo.find_by_reference(column, parent).await
    }

    // ========== 变更 ==========

    /// 创建记录
    pub async fn create(&self, entity: T) -> AppResult<T> {
        self.ensure_unique(&entity, None).await?;
        self.repo.insert(&entity).await?;

        info!(record = T::NAME, id = %entity.id(), "Record created");
        Ok(entity)
    }

    /// 更新记录（记录须存在且未删除）
    pub async fn update(&self, entity: T) -> AppResult<T> {
        let id = entity.id().clone();
        if self.repo.find_by_id(&id).await?.is_none() {
            return Err(not_found::<T>(&id));
        }
        self.ensure_unique(&entity, Some(&id)).await?;
        self.repo.update(&entity).await?;

        info!(record = T::NAME, id = %id, "Record updated");
        Ok(entity)
    }

    /// 在行锁内基于最新记录修改并写回
    ///
    /// 唯一键先在未加锁的快照上试算检查，并发冲突由数据库唯一约束兜底。
    pub async fn modify<F>(&self, id: &<T as Entity>::Id, change: F) -> AppResult<T>
    where
        F: Fn(&mut T) -> AppResult<()> + Send + Sync,
    {
        let mut preview = self.get(id).await?;
        change(&mut preview)?;
        self.ensure_unique(&preview, Some(id)).await?;

        let entity = self
            .repo
            .modify(id, &change)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;

        info!(record = T::NAME, id = %id, "Record updated");
        Ok(entity)
    }

    /// 软删除
    pub async fn soft_delete(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<()> {
        let entity = self.get(id).await?;
        entity.ensure_deletable()?;

        if !self.repo.soft_delete(id, actor).await? {
            return Err(not_found::<T>(id));
        }

        info!(record = T::NAME, id = %id, actor = %actor, "Record soft-deleted");
        Ok(())
    }

    /// 恢复已软删除的记录
    pub async fn restore(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<T> {
        let entity = self
            .repo
            .find_deleted_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Deleted {} {} not found", T::NAME, id)))?;

        // 删除期间唯一键可能已被修改后的其他记录占用
        self.ensure_unique(&entity, Some(id)).await?;

        if !self.repo.restore(id, actor).await? {
            return Err(not_found::<T>(id));
        }

        info!(record = T::NAME, id = %id, actor = %actor, "Record restored");
        self.get(id).await
    }

    /// 物理删除（已删除或未删除的记录均可）
    pub async fn purge(&self, id: &<T as Entity>::Id) -> AppResult<()> {
        let entity = match self.repo.find_by_id(id).await? {
            Some(entity) => entity,
            None => self
                .repo
                .find_deleted_by_id(id)
                .await?
                .ok_or_else(|| not_found::<T>(id))?,
        };
        entity.ensure_deletable()?;

        if !self.repo.purge(id).await? {
            return Err(not_found::<T>(id));
        }

        info!(record = T::NAME, id = %id, "Record permanently deleted");
        Ok(())
    }

    async fn ensure_unique(
        &self,
        entity: &T,
        exclude: Option<&<T as Entity>::Id>,
    ) -> AppResult<()> {
        for key in entity.unique_keys() {
            if self.repo.is_taken(&key, exclude).await? {
                return Err(AppError::conflict(format!(
                    "{} with {} already exists",
                    T::NAME,
                    key.describe()
                )));
            }
        }
        Ok(())
    }
}

fn not_found<T: Record>(id: &<T as Entity>::Id) -> AppError {
    AppError::not_found(format!("{} {} not found", T::NAME, id))
}
