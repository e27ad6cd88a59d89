//! 请求提取器
//!
//! 提取失败统一转换为 AppError（problem+json），而不是 axum 默认的纯文本拒绝

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use erp_common::Pagination;
use erp_domain_core::EntityId;
use erp_errors::{AppError, AppResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// 反序列化并校验的 JSON 请求体
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// 查询串参数
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// 分页查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}

/// 解析路径中的实体 ID，非 UUID 返回 400
pub fn parse_id<I: EntityId>(raw: &str) -> AppResult<I> {
    Uuid::parse_str(raw.trim())
        .map(I::from_uuid)
        .map_err(|_| AppError::validation(format!("Invalid id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use erp_common::UserId;

    #[test]
    fn test_parse_id() {
        let id = Uuid::now_v7();
        let parsed: UserId = parse_id(&id.to_string()).unwrap();
        assert_eq!(parsed.0, id);
        assert!(matches!(
            parse_id::<UserId>("42"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_page_query_defaults_and_clamps() {
        let p = PageQuery::default().pagination();
        assert_eq!((p.page, p.page_size), (1, 20));

        let p = PageQuery {
            page: Some(0),
            page_size: Some(500),
        }
        .pagination();
        assert_eq!((p.page, p.page_size), (1, 100));
    }
}
