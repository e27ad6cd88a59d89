//! 响应体

use erp_common::AuditInfo;
use erp_domain_core::{DataStatus, Decimal};
use mdm_material::domain::MaterialCardId;
use serde::Serialize;

use crate::domain::{BomHeader, BomHeaderId, BomItem, BomItemId};

#[derive(Debug, Clone, Serialize)]
pub struct BomHeaderView {
    pub id: BomHeaderId,
    pub code: String,
    pub name: String,
    pub product_material_id: MaterialCardId,
    pub version: String,
    pub base_quantity: Decimal,
    pub description: Option<String>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<BomHeader> for BomHeaderView {
    fn from(header: BomHeader) -> Self {
        Self {
            id: header.id,
            code: header.code,
            name: header.name,
            product_material_id: header.product_material_id,
            version: header.version,
            base_quantity: header.base_quantity,
            description: header.description,
            status: header.status,
            audit: header.audit_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BomItemView {
    pub id: BomItemId,
    pub bom_header_id: BomHeaderId,
    pub component_material_id: MaterialCardId,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub scrap_rate: Decimal,
    /// 含损耗的需求量；用量经 `set_usage` 校验，超限时为空
    pub gross_quantity: Option<Decimal>,
    pub sequence: i32,
    pub notes: Option<String>,
    pub status: DataStatus,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<BomItem> for BomItemView {
    fn from(item: BomItem) -> Self {
        Self {
            gross_quantity: item.gross_quantity().ok(),
            id: item.id,
            bom_header_id: item.bom_header_id,
            component_material_id: item.component_material_id,
            quantity: item.quantity,
            unit_of_measure: item.unit_of_measure,
            scrap_rate: item.scrap_rate,
            sequence: item.sequence,
            notes: item.notes,
            status: item.status,
            audit: item.audit_info,
        }
    }
}
