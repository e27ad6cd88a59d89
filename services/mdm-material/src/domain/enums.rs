//! 物料类型

use std::fmt;

use erp_domain_core::smallint_enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialType {
    /// 原材料
    #[default]
    RawMaterial,
    /// 半成品
    SemiFinished,
    /// 成品
    FinishedGood,
    /// 耗材
    Consumable,
    /// 服务（不入库）
    Service,
}

smallint_enum!(MaterialType {
    RawMaterial = 1,
    SemiFinished = 2,
    FinishedGood = 3,
    Consumable = 4,
    Service = 5,
});

impl MaterialType {
    /// 是否需要库存管理
    pub fn is_stocked(self) -> bool {
        self != Self::Service
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RawMaterial => "RawMaterial",
            Self::SemiFinished => "SemiFinished",
            Self::FinishedGood => "FinishedGood",
            Self::Consumable => "Consumable",
            Self::Service => "Service",
        };
        f.write_str(s)
    }
}
