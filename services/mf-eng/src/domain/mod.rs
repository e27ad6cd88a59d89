//! 工程领域模型

mod bom;

pub use bom::{BomHeader, BomHeaderId, BomItem, BomItemId};
