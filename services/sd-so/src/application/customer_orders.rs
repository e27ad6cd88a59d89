//! 客户订单管理

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};
use mdm_material::domain::{MaterialCard, MaterialCardId};
use tracing::info;

use super::commands::SaveCustomerOrder;
use crate::api::views::CustomerOrderView;
use crate::domain::{Customer, CustomerId, CustomerOrder, CustomerOrderId};

/// `/api/customer-orders`
pub struct CustomerOrderResource {
    orders: CrudHandler<CustomerOrder>,
    customers: CrudHandler<Customer>,
    materials: CrudHandler<MaterialCard>,
}

impl CustomerOrderResource {
    pub fn new(
        orders: CrudHandler<CustomerOrder>,
        customers: CrudHandler<Customer>,
        materials: CrudHandler<MaterialCard>,
    ) -> Self {
        Self {
            orders,
            customers,
            materials,
        }
    }

    async fn resolve_customer(&self, id: CustomerId, current: Option<CustomerId>) -> AppResult<CustomerId> {
        let customer = self
            .customers
            .find(&id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Customer {} does not exist", id)))?;
        if current != Some(id) && !customer.is_active() {
            return Err(AppError::validation(format!(
                "Customer {} is not active",
                customer.code
            )));
        }
        Ok(id)
    }

    async fn resolve_material(&self, id: MaterialCardId) -> AppResult<MaterialCardId> {
        self.materials
            .find(&id)
            .await?
            .map(|material| material.id)
            .ok_or_else(|| AppError::validation(format!("Material {} does not exist", id)))
    }

    async fn apply(&self, order: &mut CustomerOrder, input: SaveCustomerOrder) -> AppResult<()> {
        order.order_number = require_text("order_number", &input.order_number, 50)?;
        order.material_id = self.resolve_material(input.material_id).await?;
        order.set_pricing(input.quantity, input.unit_price)?;
        order.set_schedule(input.order_date.unwrap_or(order.order_date), input.delivery_date)?;
        order.notes = normalize_optional(input.notes);
        if let Some(status) = input.status {
            order.transition_to(status)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for CustomerOrderResource {
    type Entity = CustomerOrder;
    type View = CustomerOrderView;
    type Create = SaveCustomerOrder;
    type Update = SaveCustomerOrder;

    const RESOURCE: &'static str = "customer-orders";

    fn lifecycle(&self) -> &CrudHandler<CustomerOrder> {
        &self.orders
    }

    async fn create(&self, input: SaveCustomerOrder, actor: &UserId) -> AppResult<CustomerOrder> {
        let customer_id = self.resolve_customer(input.customer_id, None).await?;
        let mut order = CustomerOrder::new(
            String::new(),
            customer_id,
            input.material_id,
            Utc::now().date_naive(),
            Some(actor.clone()),
        );
        self.apply(&mut order, input).await?;

        let order = self.orders.create(order).await?;
        info!(order = %order.order_number, total = %order.total_amount, "Customer order created");
        Ok(order)
    }

    async fn update(
        &self,
        id: CustomerOrderId,
        input: SaveCustomerOrder,
        actor: &UserId,
    ) -> AppResult<CustomerOrder> {
        let mut order = self.orders.get(&id).await?;
        order.ensure_open()?;

        order.customer_id = self
            .resolve_customer(input.customer_id, Some(order.customer_id))
            .await?;
        self.apply(&mut order, input).await?;
        order.audit_info.update(Some(actor.clone()));

        self.orders.update(order).await
    }
}
