//! 记录契约
//!
//! 所有可 CRUD 的聚合根都实现 [`Record`]，通用仓储与处理器依赖它完成
//! 唯一性校验、父子关联查询、模糊搜索和删除前检查。

use erp_errors::AppResult;
use uuid::Uuid;

use crate::AggregateRoot;

/// 唯一键：一组列名与取值，任意两条记录（含已删除记录）不得相同
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    pub fields: Vec<(&'static str, String)>,
}

impl UniqueKey {
    pub fn single(column: &'static str, value: impl ToString) -> Self {
        Self {
            fields: vec![(column, value.to_string())],
        }
    }

    pub fn pair(
        first: (&'static str, impl ToString),
        second: (&'static str, impl ToString),
    ) -> Self {
        Self {
            fields: vec![
                (first.0, first.1.to_string()),
                (second.0, second.1.to_string()),
            ],
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(column, _)| *column).collect()
    }

    /// 用于冲突提示，如 `code=WH-01`
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(|(column, value)| format!("{}={}", column, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 可持久化的业务记录
pub trait Record: AggregateRoot + Clone + Send + Sync + 'static {
    /// 记录名称（用于错误信息）
    const NAME: &'static str;

    /// 唯一键列表
    fn unique_keys(&self) -> Vec<UniqueKey>;

    /// 指向父记录的外键
    fn references(&self) -> Vec<(&'static str, Uuid)> {
        Vec::new()
    }

    /// 参与搜索的文本字段
    fn search_text(&self) -> Vec<&str>;

    /// 删除前检查（软删除与物理删除共用）
    fn ensure_deletable(&self) -> AppResult<()> {
        Ok(())
    }

    /// 是否匹配搜索词（大小写不敏感的包含匹配）
    fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.search_text()
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }

    /// 是否拥有与给定键相同的唯一键
    fn has_key(&self, key: &UniqueKey) -> bool {
        self.unique_keys().iter().any(|own| own == key)
    }

    /// 某外键列是否指向给定父记录
    fn references_parent(&self, column: &str, parent: Uuid) -> bool {
        self.references()
            .iter()
            .any(|(col, id)| *col == column && *id == parent)
    }
}
