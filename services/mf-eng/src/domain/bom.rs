//! 物料清单（BOM）

use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, EntityId, Record, UniqueKey, checked_product, checked_sum, ensure_between,
    ensure_positive, entity_id, impl_aggregate_root,
};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use uuid::Uuid;

entity_id!(
    /// BOM 表头 ID
    BomHeaderId
);
entity_id!(
    /// BOM 行 ID
    BomItemId
);

#[derive(Debug, Clone)]
pub struct BomHeader {
    pub id: BomHeaderId,
    pub code: String,
    pub name: String,
    /// 产出物料
    pub product_material_id: MaterialCardId,
    pub version: String,
    /// 用量基准：行数量对应的产出数量
    pub base_quantity: Decimal,
    pub description: Option<String>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(BomHeader, BomHeaderId);

impl BomHeader {
    pub fn new(
        code: String,
        name: String,
        product_material_id: MaterialCardId,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: BomHeaderId::new(),
            code,
            name,
            product_material_id,
            version: "1".to_string(),
            base_quantity: Decimal::ONE,
            description: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn set_base_quantity(&mut self, base_quantity: Decimal) -> AppResult<()> {
        ensure_positive("base_quantity", base_quantity)?;
        self.base_quantity = base_quantity;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() && !self.audit_info.is_deleted
    }
}

impl Record for BomHeader {
    const NAME: &'static str = "BomHeader";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("code", &self.code)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![("product_material_id", self.product_material_id.as_uuid())]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.code.as_str(), self.name.as_str(), self.version.as_str()];
        text.extend(self.description.as_deref());
        text
    }
}

#[derive(Debug, Clone)]
pub struct BomItem {
    pub id: BomItemId,
    pub bom_header_id: BomHeaderId,
    pub component_material_id: MaterialCardId,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    /// 损耗率（百分比）
    pub scrap_rate: Decimal,
    pub sequence: i32,
    pub notes: Option<String>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(BomItem, BomItemId);

impl BomItem {
    /// 组件不能是表头的产出物料
    pub fn new(
        header: &BomHeader,
        component_material_id: MaterialCardId,
        unit_of_measure: String,
        created_by: Option<UserId>,
    ) -> AppResult<Self> {
        if component_material_id == header.product_material_id {
            return Err(AppError::validation(format!(
                "BOM {} cannot list its own product as a component",
                header.code
            )));
        }
        Ok(Self {
            id: BomItemId::new(),
            bom_header_id: header.id,
            component_material_id,
            quantity: Decimal::ONE,
            unit_of_measure,
            scrap_rate: Decimal::ZERO,
            sequence: 0,
            notes: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        })
    }

    pub fn set_usage(&mut self, quantity: Decimal, scrap_rate: Decimal, sequence: i32) -> AppResult<()> {
        ensure_positive("quantity", quantity)?;
        ensure_between("scrap_rate", scrap_rate, Decimal::ZERO, Decimal::ONE_HUNDRED)?;
        if sequence < 0 {
            return Err(AppError::validation("sequence must not be negative"));
        }
        gross(quantity, scrap_rate)?;
        self.quantity = quantity;
        self.scrap_rate = scrap_rate;
        self.sequence = sequence;
        Ok(())
    }

    /// 含损耗的毛需求量
    pub fn gross_quantity(&self) -> AppResult<Decimal> {
        gross(self.quantity, self.scrap_rate)
    }
}

fn gross(quantity: Decimal, scrap_rate: Decimal) -> AppResult<Decimal> {
    let scrap = checked_product("gross_quantity", quantity, scrap_rate)? / Decimal::ONE_HUNDRED;
    checked_sum("gross_quantity", quantity, scrap)
}

impl Record for BomItem {
    const NAME: &'static str = "BomItem";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::pair(
            ("bom_header_id", self.bom_header_id.as_uuid()),
            ("component_material_id", self.component_material_id.as_uuid()),
        )]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![
            ("bom_header_id", self.bom_header_id.as_uuid()),
            ("component_material_id", self.component_material_id.as_uuid()),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.unit_of_measure.as_str()];
        text.extend(self.notes.as_deref());
        text
    }
}
