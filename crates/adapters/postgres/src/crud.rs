//! 通用 PostgreSQL CRUD 仓储
//!
//! 每张业务表实现 [`PgRecord`] 描述表名、列和写入语句，
//! [`PgCrudRepository`] 据此实现 [`CrudRepository`] 的全部操作。

use std::marker::PhantomData;

use async_trait::async_trait;
use erp_common::{PagedResult, Pagination, UserId};
use erp_domain_core::{Entity, EntityId, Record, UniqueKey};
use erp_errors::{AppError, AppResult};
use erp_ports::CrudRepository;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{TransactionManager, map_db_error};

/// PostgreSQL 表映射
pub trait PgRecord: Record {
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// 表名
    const TABLE: &'static str;
    /// SELECT 列清单（含审计列）
    const COLUMNS: &'static str;
    /// 参与 ILIKE 搜索的列
    const SEARCH_COLUMNS: &'static [&'static str];
    /// 默认排序
    const ORDER_BY: &'static str;

    fn from_row(row: Self::Row) -> AppResult<Self>;

    /// 完整 INSERT 语句（含绑定参数）
    fn insert_query(&self) -> Query<'static, Postgres, PgArguments>;

    /// 按 id 更新业务字段与更新痕迹
    fn update_query(&self) -> Query<'static, Postgres, PgArguments>;
}

/// 校验 SQL 标识符（只允许小写字母、数字、下划线）
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn ensure_identifier(name: &str) -> AppResult<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(AppError::internal(format!("Invalid SQL identifier: {}", name)))
    }
}

/// 转义 LIKE 通配符并包裹为包含匹配
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// 搜索条件：`(a ILIKE $n ESCAPE '\' OR b ILIKE $n ESCAPE '\')`
pub fn search_clause(columns: &[&str], param: usize) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|c| format!("{} ILIKE ${} ESCAPE '\\'", c, param))
        .collect();
    format!("({})", parts.join(" OR "))
}

/// 唯一键条件：列值按文本比较，参数从 `$start` 开始编号
pub fn key_clause(key: &UniqueKey, start: usize) -> String {
    key.fields
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{}::text = ${}", column, start + i))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// OFFSET 参数，超出 BIGINT 时取最大值（结果为空页）
fn sql_offset(pagination: &Pagination) -> i64 {
    i64::try_from(pagination.offset()).unwrap_or(i64::MAX)
}

/// 基于 [`PgRecord`] 的通用仓储
pub struct PgCrudRepository<E> {
    pool: PgPool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for PgCrudRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: PgRecord> PgCrudRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_with_flag(&self, id: Uuid, deleted: bool) -> AppResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND is_deleted = $2",
            E::COLUMNS,
            E::TABLE
        );
        let row = sqlx::query_as::<_, E::Row>(&sql)
            .bind(id)
            .bind(deleted)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        row.map(E::from_row).transpose()
    }

    async fn page_by_flag(&self, deleted: bool, pagination: &Pagination) -> AppResult<PagedResult<E>> {
        let pagination = pagination.clone().normalized();

        let count_sql = format!("SELECT COUNT(*) FROM {} WHERE is_deleted = $1", E::TABLE);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(deleted)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            E::COLUMNS,
            E::TABLE,
            E::ORDER_BY
        );
        let rows = sqlx::query_as::<_, E::Row>(&sql)
            .bind(deleted)
            .bind(pagination.limit() as i64)
            .bind(sql_offset(&pagination))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(E::from_row)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PagedResult::new(items, total.max(0) as u64, &pagination))
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool, actor: &UserId) -> AppResult<bool> {
        let sql = format!(
            "UPDATE {} SET is_deleted = $2, updated_at = NOW(), updated_by = $3 \
             WHERE id = $1 AND is_deleted = $4",
            E::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(deleted)
            .bind(actor.0)
            .bind(!deleted)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl<E: PgRecord> CrudRepository<E> for PgCrudRepository<E> {
    async fn find_by_id(&self, id: &<E as Entity>::Id) -> AppResult<Option<E>> {
        self.find_with_flag(id.as_uuid(), false).await
    }

    async fn find_deleted_by_id(&self, id: &<E as Entity>::Id) -> AppResult<Option<E>> {
        self.find_with_flag(id.as_uuid(), true).await
    }

    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<E>> {
        self.page_by_flag(false, pagination).await
    }

    async fn find_deleted(&self, pagination: &Pagination) -> AppResult<PagedResult<E>> {
        self.page_by_flag(true, pagination).await
    }

    async fn search(&self, term: &str, pagination: &Pagination) -> AppResult<PagedResult<E>> {
        for column in E::SEARCH_COLUMNS {
            ensure_identifier(column)?;
        }
        let pagination = pagination.clone().normalized();
        // 无文本列的关联表不参与搜索
        if E::SEARCH_COLUMNS.is_empty() {
            return Ok(PagedResult::new(Vec::new(), 0, &pagination));
        }
        let pattern = like_pattern(term);
        let clause = search_clause(E::SEARCH_COLUMNS, 1);

        let count_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE is_deleted = FALSE AND {}",
            E::TABLE,
            clause
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE AND {} ORDER BY {} LIMIT $2 OFFSET $3",
            E::COLUMNS,
            E::TABLE,
            clause,
            E::ORDER_BY
        );
        let rows = sqlx::query_as::<_, E::Row>(&sql)
            .bind(&pattern)
            .bind(pagination.limit() as i64)
            .bind(sql_offset(&pagination))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(E::from_row)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PagedResult::new(items, total.max(0) as u64, &pagination))
    }

    async fn find_by_reference(&self, column: &'static str, parent: Uuid) -> AppResult<Vec<E>> {
        ensure_identifier(column)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE AND {} = $1 ORDER BY {}",
            E::COLUMNS,
            E::TABLE,
            column,
            E::ORDER_BY
        );
        let rows = sqlx::query_as::<_, E::Row>(&sql)
            .bind(parent)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(E::from_row).collect()
    }

    async fn find_one_by(&self, key: &UniqueKey) -> AppResult<Option<E>> {
        for column in key.columns() {
            ensure_identifier(column)?;
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE AND {} LIMIT 1",
            E::COLUMNS,
            E::TABLE,
            key_clause(key, 1)
        );
        let mut query = sqlx::query_as::<_, E::Row>(&sql);
        for (_, value) in &key.fields {
            query = query.bind(value);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        row.map(E::from_row).transpose()
    }

    async fn is_taken(
        &self,
        key: &UniqueKey,
        exclude: Option<&<E as Entity>::Id>,
    ) -> AppResult<bool> {
        for column in key.columns() {
            ensure_identifier(column)?;
        }
        let exclude_param = key.fields.len() + 1;
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} AND (${p}::uuid IS NULL OR id <> ${p}))",
            E::TABLE,
            key_clause(key, 1),
            p = exclude_param
        );

        let mut query = sqlx::query_scalar::<_, bool>(&sql);
        for (_, value) in &key.fields {
            query = query.bind(value);
        }
        query
            .bind(exclude.map(|id| id.as_uuid()))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn insert(&self, entity: &E) -> AppResult<()> {
        entity
            .insert_query()
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        let result = entity
            .update_query()
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} {} not found",
                E::NAME,
                entity.id()
            )));
        }
        Ok(())
    }

    async fn modify(
        &self,
        id: &<E as Entity>::Id,
        change: &(dyn for<'a> Fn(&'a mut E) -> AppResult<()> + Send + Sync),
    ) -> AppResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
            E::COLUMNS,
            E::TABLE
        );

        // 出错时 tx 随 drop 回滚
        let mut tx = TransactionManager::new(self.pool.clone()).begin().await?;
        let row = sqlx::query_as::<_, E::Row>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut entity = E::from_row(row)?;
        change(&mut entity)?;
        entity
            .update_query()
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        TransactionManager::commit(tx).await?;
        Ok(Some(entity))
    }

    async fn soft_delete(&self, id: &<E as Entity>::Id, actor: &UserId) -> AppResult<bool> {
        self.set_deleted(id.as_uuid(), true, actor).await
    }

    async fn restore(&self, id: &<E as Entity>::Id, actor: &UserId) -> AppResult<bool> {
        self.set_deleted(id.as_uuid(), false, actor).await
    }

    async fn purge(&self, id: &<E as Entity>::Id) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
