use erp_domain_core::{DataStatus, Decimal};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveWarehouse {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: Option<DataStatus>,
}

/// 库位的所属仓库创建后不可变更
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLocation {
    pub warehouse_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLocation {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub capacity: Option<Decimal>,
    pub status: DataStatus,
}
