//! 库位管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::{EntityId, require_text};
use erp_errors::{AppError, AppResult};

use super::commands::{CreateLocation, UpdateLocation};
use crate::api::views::LocationView;
use crate::domain::{Location, LocationId, Warehouse, WarehouseId};

/// `/api/locations`
pub struct LocationResource {
    locations: CrudHandler<Location>,
    warehouses: CrudHandler<Warehouse>,
}

impl LocationResource {
    pub fn new(locations: CrudHandler<Location>, warehouses: CrudHandler<Warehouse>) -> Self {
        Self {
            locations,
            warehouses,
        }
    }
}

#[async_trait]
impl CrudResource for LocationResource {
    type Entity = Location;
    type View = LocationView;
    type Create = CreateLocation;
    type Update = UpdateLocation;

    const RESOURCE: &'static str = "locations";

    fn lifecycle(&self) -> &CrudHandler<Location> {
        &self.locations
    }

    async fn create(&self, input: CreateLocation, actor: &UserId) -> AppResult<Location> {
        let warehouse_id = WarehouseId::from_uuid(input.warehouse_id);
        let warehouse = self.warehouses.find(&warehouse_id).await?.ok_or_else(|| {
            AppError::validation(format!("Warehouse {} does not exist", warehouse_id))
        })?;
        if !warehouse.is_active() {
            return Err(AppError::validation(format!(
                "Warehouse {} is not active",
                warehouse.code
            )));
        }

        let mut location = Location::new(
            warehouse_id,
            require_text("code", &input.code, 50)?,
            require_text("name", &input.name, 200)?,
            Some(actor.clone()),
        );
        location.description = normalize_optional(input.description);
        location.set_capacity(input.capacity)?;
        if let Some(status) = input.status {
            location.status = status;
        }

        self.locations.create(location).await
    }

    async fn update(
        &self,
        id: LocationId,
        input: UpdateLocation,
        actor: &UserId,
    ) -> AppResult<Location> {
        let mut location = self.locations.get(&id).await?;
        location.code = require_text("code", &input.code, 50)?;
        location.name = require_text("name", &input.name, 200)?;
        location.description = normalize_optional(input.description);
        location.set_capacity(input.capacity)?;
        location.status = input.status;
        location.audit_info.update(Some(actor.clone()));

        self.locations.update(location).await
    }
}
