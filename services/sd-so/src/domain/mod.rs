//! 销售领域模型

mod customer;
mod customer_order;

pub use customer::{Customer, CustomerId};
pub use customer_order::{CustomerOrder, CustomerOrderId, CustomerOrderStatus};
