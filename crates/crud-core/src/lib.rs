//! erp-crud-core - 通用 CRUD 编排
//!
//! 所有带软删除的业务记录共用的查询/创建/更新/删除/恢复流程

mod handler;

pub use handler::*;
