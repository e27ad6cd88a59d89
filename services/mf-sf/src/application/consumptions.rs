//! 工单领料

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_errors::{AppError, AppResult};

use super::commands::{CreateConsumption, UpdateConsumption};
use super::master_data::MasterData;
use crate::api::views::ConsumptionView;
use crate::domain::{MaterialConsumption, MaterialConsumptionId, WorkOrder};

/// `/api/material-consumptions`
pub struct ConsumptionResource {
    consumptions: CrudHandler<MaterialConsumption>,
    orders: CrudHandler<WorkOrder>,
    master: MasterData,
}

impl ConsumptionResource {
    pub fn new(
        consumptions: CrudHandler<MaterialConsumption>,
        orders: CrudHandler<WorkOrder>,
        master: MasterData,
    ) -> Self {
        Self {
            consumptions,
            orders,
            master,
        }
    }
}

#[async_trait]
impl CrudResource for ConsumptionResource {
    type Entity = MaterialConsumption;
    type View = ConsumptionView;
    type Create = CreateConsumption;
    type Update = UpdateConsumption;

    const RESOURCE: &'static str = "material-consumptions";

    fn lifecycle(&self) -> &CrudHandler<MaterialConsumption> {
        &self.consumptions
    }

    async fn create(&self, input: CreateConsumption, actor: &UserId) -> AppResult<MaterialConsumption> {
        let order = self.orders.find(&input.work_order_id).await?.ok_or_else(|| {
            AppError::validation(format!("Work order {} does not exist", input.work_order_id))
        })?;
        let material = self.master.material(&input.material_id).await?;
        self.master
            .storage(&input.warehouse_id, input.location_id.as_ref())
            .await?;

        let mut consumption = MaterialConsumption::new(
            order.id,
            material.id,
            input.warehouse_id,
            input.consumption_date.unwrap_or_else(Utc::now),
            Some(actor.clone()),
        );
        consumption.location_id = input.location_id;
        consumption.set_quantity(input.quantity)?;
        consumption.notes = normalize_optional(input.notes);

        self.consumptions.create(consumption).await
    }

    async fn update(
        &self,
        id: MaterialConsumptionId,
        input: UpdateConsumption,
        actor: &UserId,
    ) -> AppResult<MaterialConsumption> {
        let mut consumption = self.consumptions.get(&id).await?;
        consumption.set_quantity(input.quantity)?;
        if let Some(consumption_date) = input.consumption_date {
            consumption.consumption_date = consumption_date;
        }
        consumption.notes = normalize_optional(input.notes);
        consumption.audit_info.update(Some(actor.clone()));

        self.consumptions.update(consumption).await
    }
}
