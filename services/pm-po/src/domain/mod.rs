//! 采购领域模型

mod purchase_order;
mod supplier;

pub use purchase_order::{PurchaseOrder, PurchaseOrderId, PurchaseOrderStatus};
pub use supplier::{
    DEFAULT_PAYMENT_TERMS_DAYS, Supplier, SupplierContact, SupplierId, SupplierType, SupplierTypeId,
};
