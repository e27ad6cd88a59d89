//! 物料移动

use std::fmt;

use chrono::{DateTime, Utc};
use erp_common::{AuditInfo, UserId};
use erp_domain_core::{
    DataStatus, Decimal, EntityId, Record, UniqueKey, ensure_positive, entity_id,
    impl_aggregate_root, smallint_enum,
};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stock_entry::StockPoint;

entity_id!(MaterialMovementId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// 入库（只有目标）
    Receipt,
    /// 出库（只有来源）
    Issue,
    /// 调拨（来源与目标不同）
    Transfer,
    /// 盘点调整（目标为增加，来源为减少）
    Adjustment,
}

smallint_enum!(MovementType {
    Receipt = 1,
    Issue = 2,
    Transfer = 3,
    Adjustment = 4,
});

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Receipt => "Receipt",
            Self::Issue => "Issue",
            Self::Transfer => "Transfer",
            Self::Adjustment => "Adjustment",
        };
        f.write_str(s)
    }
}

impl MovementType {
    /// 校验来源与目标是否符合类型要求
    pub fn check_endpoints(
        self,
        source: Option<StockPoint>,
        target: Option<StockPoint>,
    ) -> AppResult<()> {
        let valid = match self {
            Self::Receipt => source.is_none() && target.is_some(),
            Self::Issue => source.is_some() && target.is_none(),
            Self::Transfer => match (source, target) {
                (Some(source), Some(target)) => {
                    if source == target {
                        return Err(AppError::validation(
                            "Transfer source and target must differ",
                        ));
                    }
                    true
                }
                _ => false,
            },
            Self::Adjustment => source.is_some() != target.is_some(),
        };

        if valid {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "{} requires {}",
                self,
                match self {
                    Self::Receipt => "a target and no source",
                    Self::Issue => "a source and no target",
                    Self::Transfer => "both a source and a target",
                    Self::Adjustment => "exactly one of source or target",
                }
            )))
        }
    }
}

/// 一笔库存增减
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub point: StockPoint,
    pub delta: Decimal,
}

#[derive(Debug, Clone)]
pub struct MaterialMovement {
    pub id: MaterialMovementId,
    pub movement_number: String,
    pub material_id: MaterialCardId,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub source: Option<StockPoint>,
    pub target: Option<StockPoint>,
    pub movement_date: DateTime<Utc>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub status: DataStatus,
    pub audit_info: AuditInfo,
}

impl_aggregate_root!(MaterialMovement, MaterialMovementId);

impl MaterialMovement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        movement_number: String,
        material_id: MaterialCardId,
        movement_type: MovementType,
        quantity: Decimal,
        source: Option<StockPoint>,
        target: Option<StockPoint>,
        movement_date: DateTime<Utc>,
        created_by: Option<UserId>,
    ) -> AppResult<Self> {
        ensure_positive("quantity", quantity)?;
        movement_type.check_endpoints(source, target)?;

        Ok(Self {
            id: MaterialMovementId::new(),
            movement_number,
            material_id,
            movement_type,
            quantity,
            source,
            target,
            movement_date,
            reference: None,
            description: None,
            status: DataStatus::Active,
            audit_info: AuditInfo::new(created_by),
        })
    }

    /// 过账分录，按库存地点排序（即加锁顺序）
    pub fn postings(&self) -> Vec<Posting> {
        let mut postings: Vec<Posting> = self
            .source
            .map(|point| Posting {
                point,
                delta: -self.quantity,
            })
            .into_iter()
            .chain(self.target.map(|point| Posting {
                point,
                delta: self.quantity,
            }))
            .collect();
        postings.sort_by_key(|p| p.point);
        postings
    }
}

impl Record for MaterialMovement {
    const NAME: &'static str = "MaterialMovement";

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::single("movement_number", &self.movement_number)]
    }

    fn references(&self) -> Vec<(&'static str, Uuid)> {
        vec![("material_id", self.material_id.as_uuid())]
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.movement_number.as_str()];
        text.extend(self.reference.as_deref());
        text.extend(self.description.as_deref());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_wm::domain::{LocationId, WarehouseId};

    fn point() -> StockPoint {
        StockPoint::new(WarehouseId::new(), LocationId::new())
    }

    fn movement(
        movement_type: MovementType,
        source: Option<StockPoint>,
        target: Option<StockPoint>,
    ) -> AppResult<MaterialMovement> {
        MaterialMovement::new(
            "MV-1".to_string(),
            MaterialCardId::new(),
            movement_type,
            Decimal::new(5, 0),
            source,
            target,
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_endpoint_rules() {
        let (a, b) = (point(), point());

        assert!(movement(MovementType::Receipt, None, Some(a)).is_ok());
        assert!(movement(MovementType::Receipt, Some(a), Some(b)).is_err());
        assert!(movement(MovementType::Issue, Some(a), None).is_ok());
        assert!(movement(MovementType::Issue, None, Some(a)).is_err());
        assert!(movement(MovementType::Transfer, Some(a), Some(b)).is_ok());
        assert!(movement(MovementType::Transfer, Some(a), Some(a)).is_err());
        assert!(movement(MovementType::Transfer, Some(a), None).is_err());
        assert!(movement(MovementType::Adjustment, None, Some(a)).is_ok());
        assert!(movement(MovementType::Adjustment, Some(a), None).is_ok());
        assert!(movement(MovementType::Adjustment, Some(a), Some(b)).is_err());
        assert!(movement(MovementType::Adjustment, None, None).is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let result = MaterialMovement::new(
            "MV-2".to_string(),
            MaterialCardId::new(),
            MovementType::Receipt,
            Decimal::ZERO,
            None,
            Some(point()),
            Utc::now(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_transfer_postings_are_balanced_and_ordered() {
        let (a, b) = (point(), point());
        let transfer = movement(MovementType::Transfer, Some(b), Some(a)).unwrap();
        let postings = transfer.postings();

        assert_eq!(postings.len(), 2);
        assert!(postings[0].point < postings[1].point);
        let net: Decimal = postings.iter().map(|p| p.delta).sum();
        assert_eq!(net, Decimal::ZERO);
    }
}
