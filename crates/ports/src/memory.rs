//! 内存 Repository 实现（测试用）

use std::collections::BTreeMap;

use async_trait::async_trait;
use erp_common::{PagedResult, Pagination, UserId};
use erp_domain_core::{Entity, EntityId, Record, UniqueKey};
use erp_errors::{AppError, AppResult};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::CrudRepository;

/// 基于 BTreeMap 的内存仓储，按 ID（UUID v7，时间有序）排序
pub struct InMemoryRepository<T> {
    records: RwLock<BTreeMap<Uuid, T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// 预置记录
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.id().as_uuid(), r))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// 全部记录（含已删除）
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    async fn page_where(
        &self,
        pagination: &Pagination,
        predicate: impl Fn(&T) -> bool,
    ) -> PagedResult<T> {
        let pagination = pagination.clone().normalized();
        let records = self.records.read().await;
        let matching: Vec<&T> = records.values().filter(|r| predicate(r)).collect();
        let items = matching
            .iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .map(|r| (*r).clone())
            .collect();
        PagedResult::new(items, matching.len() as u64, &pagination)
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool, actor: &UserId) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) if record.is_deleted() != deleted => {
                let audit = record.audit_info_mut();
                if deleted {
                    audit.mark_deleted(actor);
                } else {
                    audit.restore(actor);
                }
                true
            }
            _ => false,
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> CrudRepository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: &<T as Entity>::Id) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records
            .get(&id.as_uuid())
            .filter(|r| !r.is_deleted())
            .cloned())
    }

    async fn find_deleted_by_id(&self, id: &<T as Entity>::Id) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records
            .get(&id.as_uuid())
            .filter(|r| r.is_deleted())
            .cloned())
    }

    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        Ok(self.page_where(pagination, |r| !r.is_deleted()).await)
    }

    async fn find_deleted(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        Ok(self.page_where(pagination, |r| r.is_deleted()).await)
    }

    async fn search(&self, term: &str, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        Ok(self
            .page_where(pagination, |r| !r.is_deleted() && r.matches(term))
            .await)
    }

    async fn find_by_reference(&self, column: &'static str, parent: Uuid) -> AppResult<Vec<T>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| !r.is_deleted() && r.references_parent(column, parent))
            .cloned()
            .collect())
    }

    async fn find_one_by(&self, key: &UniqueKey) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| !r.is_deleted() && r.has_key(key))
            .cloned())
    }

    async fn is_taken(
        &self,
        key: &UniqueKey,
        exclude: Option<&<T as Entity>::Id>,
    ) -> AppResult<bool> {
        let excluded = exclude.map(|id| id.as_uuid());
        let records = self.records.read().await;
        Ok(records
            .iter()
            .any(|(id, r)| Some(*id) != excluded && r.has_key(key)))
    }

    async fn insert(&self, entity: &T) -> AppResult<()> {
        let mut records = self.records.write().await;
        let id = entity.id().as_uuid();
        if records.contains_key(&id) {
            return Err(AppError::conflict(format!("{} {} already exists", T::NAME, id)));
        }
        records.insert(id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &T) -> AppResult<()> {
        let mut records = self.records.write().await;
        match records.get_mut(&entity.id().as_uuid()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "{} {} not found",
                T::NAME,
                entity.id()
            ))),
        }
    }

    async fn modify(
        &self,
        id: &<T as Entity>::Id,
        change: &(dyn for<'a> Fn(&'a mut T) -> AppResult<()> + Send + Sync),
    ) -> AppResult<Option<T>> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id.as_uuid()).filter(|r| !r.is_deleted()) else {
            return Ok(None);
        };
        let mut changed = record.clone();
        change(&mut changed)?;
        *record = changed.clone();
        Ok(Some(changed))
    }

    async fn soft_delete(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<bool> {
        Ok(self.set_deleted(id.as_uuid(), true, actor).await)
    }

    async fn restore(&self, id: &<T as Entity>::Id, actor: &UserId) -> AppResult<bool> {
        Ok(self.set_deleted(id.as_uuid(), false, actor).await)
    }

    async fn purge(&self, id: &<T as Entity>::Id) -> AppResult<bool> {
        Ok(self.records.write().await.remove(&id.as_uuid()).is_some())
    }
}
