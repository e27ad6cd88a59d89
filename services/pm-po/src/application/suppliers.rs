//! 供应商管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::{AppError, AppResult};

use super::commands::SaveSupplier;
use crate::api::views::SupplierView;
use crate::domain::{Supplier, SupplierContact, SupplierId, SupplierType, SupplierTypeId};

/// `/api/suppliers`
pub struct SupplierResource {
    suppliers: CrudHandler<Supplier>,
    types: CrudHandler<SupplierType>,
}

impl SupplierResource {
    pub fn new(suppliers: CrudHandler<Supplier>, types: CrudHandler<SupplierType>) -> Self {
        Self { suppliers, types }
    }

    async fn resolve_type(&self, id: Option<SupplierTypeId>) -> AppResult<Option<SupplierTypeId>> {
        let Some(id) = id else {
            return Ok(None);
        };
        if self.types.find(&id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Supplier type {} does not exist",
                id
            )));
        }
        Ok(Some(id))
    }

    async fn apply(&self, supplier: &mut Supplier, input: SaveSupplier) -> AppResult<()> {
        supplier.name = require_text("name", &input.name, 200)?;
        supplier.supplier_type_id = self.resolve_type(input.supplier_type_id).await?;
        supplier.tax_number = normalize_optional(input.tax_number);
        supplier.contact = SupplierContact {
            contact_person: normalize_optional(input.contact_person),
            email: normalize_optional(input.email).map(|e| e.to_lowercase()),
            phone: normalize_optional(input.phone),
            address: normalize_optional(input.address),
        };
        supplier.set_payment_terms(input.payment_terms_days)?;
        if let Some(status) = input.status {
            supplier.status = status;
        }
        Ok(())
    }
}

#[async_trait]
impl CrudResource for SupplierResource {
    type Entity = Supplier;
    type View = SupplierView;
    type Create = SaveSupplier;
    type Update = SaveSupplier;

    const RESOURCE: &'static str = "suppliers";

    fn lifecycle(&self) -> &CrudHandler<Supplier> {
        &self.suppliers
    }

    async fn create(&self, input: SaveSupplier, actor: &UserId) -> AppResult<Supplier> {
        let mut supplier = Supplier::new(
            require_text("code", &input.code, 50)?,
            String::new(),
            Some(actor.clone()),
        );
        self.apply(&mut supplier, input).await?;

        self.suppliers.create(supplier).await
    }

    async fn update(&self, id: SupplierId, input: SaveSupplier, actor: &UserId) -> AppResult<Supplier> {
        let mut supplier = self.suppliers.get(&id).await?;
        supplier.code = require_text("code", &input.code, 50)?;
        self.apply(&mut supplier, input).await?;
        supplier.audit_info.update(Some(actor.clone()));

        self.suppliers.update(supplier).await
    }
}
