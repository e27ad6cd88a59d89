//! 物料主数据卡片

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, EntityId, Record, UniqueKey, ensure_non_negative, entity_id,
    impl_aggregate_root,
};
use erp_errors::{AppError, AppResult};
use uuid::Uuid;

use super::category::MaterialCategoryId;
use super::enums::MaterialType;

entity_id!(
    /// 物料 ID
    MaterialCardId
);

/// 库存上下限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockLevels {
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl StockLevels {
    /// 下限非负，上限（若有）不小于下限
    pub fn new(min: Decimal, max: Option<Decimal>) -> AppResult<Self> {
        ensure_non_negative("min_stock_level", min)?;
        if let Some(max) = max {
            if max < min {
                return Err(AppError::validation(format!(
                    "max_stock_level ({}) must not be less than min_stock_level ({})",
                    max, min
                )));
            }
        }
        Ok(Self { min, max })
    }
}

#[derive(Debug, Clone)]
pub struct MaterialCard {
    pub id: MaterialCardId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<MaterialCategoryId>,
    pub material_type: MaterialType,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub stock_levels: StockLevels,
    /// 条码，设置时全局唯一
    pub barcode: Option<String>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(MaterialCard, MaterialCardId);

impl MaterialCard {
    pub fn new(
        code: String,
        name: String,
        material_type: MaterialType,
        unit_of_measure: String,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: MaterialCardId::new(),
            code,
            name,
            description: None,
            category_id: None,
            material_type,
            unit_of_measure,
            unit_price: Decimal::ZERO,
            stock_levels: StockLevels::default(),
            barcode: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) -> AppResult<()> {
        ensure_non_negative("unit_price", unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

impl Record for MaterialCard {
    const NAME: &'static str = "MaterialCard";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        let mut keys = vec![UniqueKey::single("code", &self.code)];
        if let Some(barcode) = &self.barcode {
            keys.push(UniqueKey::single("barcode", barcode));
        }
        keys
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        self.category_id
            .iter()
            .map(|category| ("category_id", category.as_uuid()))
            .collect()
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str()];
        text.extend(self.description.as_deref());
        text.extend(self.barcode.as_deref());
        text
    }
}
