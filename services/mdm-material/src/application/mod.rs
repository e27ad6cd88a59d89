//! 应用层

pub mod cards;
pub mod categories;
pub mod commands;

use std::sync::Arc;

use erp_crud_core::CrudHandler;
use erp_ports::CrudRepository;

pub use cards::MaterialCardResource;
pub use categories::CategoryResource;

use crate::domain::{MaterialCard, MaterialCategory};

/// 物料模块的处理器集合
#[derive(Clone)]
pub struct MaterialServices {
    pub categories: CrudHandler<MaterialCategory>,
    pub cards: CrudHandler<MaterialCard>,
}

impl MaterialServices {
    pub fn new(
        categories: Arc<dyn CrudRepository<MaterialCategory>>,
        cards: Arc<dyn CrudRepository<MaterialCard>>,
    ) -> Self {
        Self {
            categories: CrudHandler::new(categories),
            cards: CrudHandler::new(cards),
        }
    }

    pub fn category_resource(&self) -> CategoryResource {
        CategoryResource::new(self.categories.clone())
    }

    pub fn card_resource(&self) -> MaterialCardResource {
        MaterialCardResource::new(self.cards.clone(), self.categories.clone())
    }
}
