//! 物料移动：创建即过账

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{Record, require_text};
use erp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::{CreateMovement, UpdateMovement};
use super::master_data::MasterData;
use crate::api::views::MaterialMovementView;
use crate::domain::{MaterialMovement, MaterialMovementId, StockLedger};

/// `/api/material-movements`
pub struct MovementResource {
    movements: CrudHandler<MaterialMovement>,
    ledger: Arc<dyn StockLedger>,
    master: MasterData,
}

impl MovementResource {
    pub fn new(
        movements: CrudHandler<MaterialMovement>,
        ledger: Arc<dyn StockLedger>,
        master: MasterData,
    ) -> Self {
        Self {
            movements,
            ledger,
            master,
        }
    }

    async fn ensure_unique(&self, movement: &MaterialMovement) -> AppResult<()> {
        for key in movement.unique_keys() {
            if self.movements.repository().is_taken(&key, None).await? {
                return Err(AppError::conflict(format!(
                    "{} with {} already exists",
                    MaterialMovement::NAME,
                    key.describe()
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for MovementResource {
    type Entity = MaterialMovement;
    type View = MaterialMovementView;
    type Create = CreateMovement;
    type Update = UpdateMovement;

    const RESOURCE: &'static str = "material-movements";

    fn lifecycle(&self) -> &CrudHandler<MaterialMovement> {
        &self.movements
    }

    async fn create(&self, input: CreateMovement, actor: &UserId) -> AppResult<MaterialMovement> {
        let material = self.master.stocked_material(&input.material_id).await?;
        let source = self
            .master
            .endpoint("source", input.source_warehouse_id, input.source_location_id)
            .await?;
        let target = self
            .master
            .endpoint("target", input.target_warehouse_id, input.target_location_id)
            .await?;

        let mut movement = MaterialMovement::new(
            require_text("movement_number", &input.movement_number, 50)?,
            material.id,
            input.movement_type,
            input.quantity,
            source,
            target,
            input.movement_date.unwrap_or_else(Utc::now),
            Some(actor.clone()),
        )?;
        movement.reference = normalize_optional(input.reference);
        movement.description = normalize_optional(input.description);

        self.ensure_unique(&movement).await?;
        self.ledger.post(&movement, actor).await?;

        info!(
            movement = %movement.movement_number,
            movement_type = %movement.movement_type,
            material = %material.code,
            quantity = %movement.quantity,
            "Material movement posted"
        );
        Ok(movement)
    }

    async fn update(
        &self,
        id: MaterialMovementId,
        input: UpdateMovement,
        actor: &UserId,
    ) -> AppResult<MaterialMovement> {
        let mut movement = self.movements.get(&id).await?;
        if let Some(movement_date) = input.movement_date {
            movement.movement_date = movement_date;
        }
        movement.reference = normalize_optional(input.reference);
        movement.description = normalize_optional(input.description);
        movement.audit_info.update(Some(actor.clone()));

        self.movements.update(movement).await
    }
}
