//! 采购订单管理

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::{MaterialCard, MaterialCardId};
use tracing::info;

use super::commands::SavePurchaseOrder;
use crate::api::views::PurchaseOrderView;
use crate::domain::{PurchaseOrder, PurchaseOrderId, Supplier, SupplierId};

/// `/api/purchase-orders`
pub struct PurchaseOrderResource {
    orders: CrudHandler<PurchaseOrder>,
    suppliers: CrudHandler<Supplier>,
    materials: CrudHandler<MaterialCard>,
}

impl PurchaseOrderResource {
    pub fn new(
        orders: CrudHandler<PurchaseOrder>,
        suppliers: CrudHandler<Supplier>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            orders,
            suppliers,
            materials,
        }
    }

    /// 新指定的供应商须存在且启用；沿用原供应商时只要求存在
    async fn resolve_supplier(&self, id: SupplierId, current: Option<SupplierId>) -> AppResult<SupplierId> {
        let supplier = self
            .suppliers
            .find(&id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Supplier {} does not exist", id)))?;
        if current != Some(id) && !supplier.is_active() {
            return Err(AppError::validation(format!(
                "Supplier {} is not active",
                supplier.code
            )));
        }
        Ok(id)
    }

    async fn resolve_material(&self, id: MaterialCardId) -> AppResult<MaterialCardId> {
        match self.materials.find(&id).await? {
            Some(_) => Ok(id),
            None => Err(AppError::validation(format!("Material {} does not exist", id))),
        }
    }

    async fn apply(&self, order: &mut PurchaseOrder, input: SavePurchaseOrder) -> AppResult<()> {
        order.material_id = self.resolve_material(input.material_id).await?;
        order.set_pricing(input.quantity, input.unit_price)?;
        let order_date = input.order_date.unwrap_or(order.order_date);
        order.set_schedule(order_date, input.expected_delivery_date)?;
        order.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            order.transition_to(status)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for PurchaseOrderResource {
    type Entity = PurchaseOrder;
    type View = PurchaseOrderView;
    type Create = SavePurchaseOrder;
    type Update = SavePurchaseOrder;

    const RESOURCE: &'static str = "purchase-orders";

    fn lifecycle(&self) -> &CrudHandler<PurchaseOrder> {
        &self.orders
    }

    async fn create(&self, input: SavePurchaseOrder, actor: &UserId) -> AppResult<PurchaseOrder> {
        let supplier_id = self.resolve_supplier(input.supplier_id, None).await?;
        let mut order = PurchaseOrder::new(
            require_text("order_number", &input.order_number, 50)?,
            supplier_id,
            input.material_id,
            Utc::now().date_naive(),
            Some(actor.clone()),
        );
        self.apply(&mut order, input).await?;

        let order = self.orders.create(order).await?;
        info!(order = %order.order_number, total = %order.total_amount, "Purchase order created");
        Ok(order)
    }

    async fn update(
        &self,
        id: PurchaseOrderId,
        input: SavePurchaseOrder,
        actor: &UserId,
    ) -> AppResult<PurchaseOrder> {
        let mut order = self.orders.get(&id).await?;
        order.ensure_open()?;

        let previous = order.status;
        order.order_number = require_text("order_number", &input.order_number, 50)?;
        order.supplier_id = self
            .resolve_supplier(input.supplier_id, Some(order.supplier_id))
            .await?;
        self.apply(&mut order, input).await?;
        order.audit_info.update(Some(actor.clone()));

        let order = self.orders.update(order).await?;
        if order.status != previous {
            info!(order = %order.order_number, from = %previous, to = %order.status, "Purchase order status changed");
        }
        Ok(order)
    }
}
