//! 物料领域模型

mod category;
mod enums;
mod material_card;

pub use category::{MaterialCategory, MaterialCategoryId};
pub use enums::MaterialType;
pub use material_card::{MaterialCard, MaterialCardId, StockLevels};
