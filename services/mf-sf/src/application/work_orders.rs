//! 工单管理

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::{AppError, AppResult};
use mdm_material::domain::MaterialCardId;
use mf_eng::domain::BomHeaderId;
use tracing::info;

use super::commands::SaveWorkOrder;
use super::master_data::MasterData;
use crate::api::views::WorkOrderView;
use crate::domain::{WorkOrder, WorkOrderId, WorkOrderOperation, WorkOrderStatus};

/// `/api/work-orders`
pub struct WorkOrderResource {
    orders: CrudHandler<WorkOrder>,
    operations: CrudHandler<WorkOrderOperation>,
    master: MasterData,
}

impl WorkOrderResource {
    pub fn new(
        orders: CrudHandler<WorkOrder>,
        operations: CrudHandler<WorkOrderOperation>,
        master: MasterData,
    ) -> Self {
        Self {
            orders,
            operations,
            master,
        }
    }

    /// 工单下未删除的工序，按序号排序
    pub async fn operations_of(&self, id: &WorkOrderId) -> AppResult<Vec<WorkOrderOperation>> {
        let order = self.orders.get(id).await?;
        let mut operations = self
            .operations
            .children("work_order_id", order.id.as_uuid())
            .await?;
        operations.sort_by_key(|operation| operation.sequence);
        Ok(operations)
    }

    /// 产品与 BOM 一并校验
    async fn resolve_product(
        &self,
        input: &SaveWorkOrder,
    ) -> AppResult<(MaterialCardId, Option<BomHeaderId>)> {
        let product = self.master.material(&input.product_material_id).await?;
        let bom = match &input.bom_header_id {
            Some(id) => Some(self.master.bom_for(id, &product).await?.id),
            None => None,
        };
        Ok((product.id, bom))
    }

    fn apply(order: &mut WorkOrder, input: &SaveWorkOrder) -> AppResult<()> {
        order.order_number = require_text("order_number", &input.order_number, 50)?;
        order.set_planned_quantity(input.planned_quantity)?;
        order.set_schedule(input.planned_start, input.planned_end)?;
        order.set_priority(input.priority)?;
        order.notes = normalize_optional(input.notes.clone());
        if let Some(status) = input.status {
            order.transition_to(status, Utc::now())?;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for WorkOrderResource {
    type Entity = WorkOrder;
    type View = WorkOrderView;
    type Create = SaveWorkOrder;
    type Update = SaveWorkOrder;

    const RESOURCE: &'static str = "work-orders";

    fn lifecycle(&self) -> &CrudHandler<WorkOrder> {
        &self.orders
    }

    async fn create(&self, input: SaveWorkOrder, actor: &UserId) -> AppResult<WorkOrder> {
        let (product_id, bom_id) = self.resolve_product(&input).await?;
        let mut order = WorkOrder::new(String::new(), product_id, Some(actor.clone()));
        order.bom_header_id = bom_id;
        Self::apply(&mut order, &input)?;

        let order = self.orders.create(order).await?;
        info!(order = %order.order_number, planned = %order.planned_quantity, "Work order created");
        Ok(order)
    }

    async fn update(&self, id: WorkOrderId, input: SaveWorkOrder, actor: &UserId) -> AppResult<WorkOrder> {
        let current = self.orders.get(&id).await?;
        current.ensure_open()?;

        let requested = (input.product_material_id, input.bom_header_id);
        let product = if requested != (current.product_material_id, current.bom_header_id) {
            Some(self.resolve_product(&input).await?)
        } else {
            None
        };

        // 产量、报废与实际时间由报工过账维护，须在行锁内基于最新值修改
        let order = self
            .orders
            .modify(&id, |order| {
                order.ensure_open()?;
                if let Some(product) = product {
                    if product != (order.product_material_id, order.bom_header_id) {
                        if order.status != WorkOrderStatus::Planned {
                            return Err(AppError::failed_precondition(format!(
                                "Work order {} is {}; product and BOM are fixed once released",
                                order.order_number, order.status
                            )));
                        }
                        (order.product_material_id, order.bom_header_id) = product;
                    }
                }
                Self::apply(order, &input)?;
                order.audit_info.update(Some(actor.clone()));
                Ok(())
            })
            .await?;

        info!(order = %order.order_number, status = %order.status, produced = %order.produced_quantity, "Work order updated");
        Ok(order)
    }
}
