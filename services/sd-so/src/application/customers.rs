//! 客户管理

use async_trait::async_trait;
use erp_bootstrap::web::CrudResource;
use erp_common::{UserId, normalize_optional};
use erp_crud_core::CrudHandler;
use erp_domain_core::require_text;
use erp_errors::AppResult;

use super::commands::SaveCustomer;
use crate::api::views::CustomerView;
use crate::domain::{Customer, CustomerId};

/// `/api/customers`
pub struct CustomerResource {
    customers: CrudHandler<Customer>,
}

impl CustomerResource {
    pub fn new(customers: CrudHandler<Customer>) -> Self {
        Self { customers }
    }
}

fn apply(customer: &mut Customer, input: SaveCustomer) -> AppResult<()> {
    customer.code = require_text("code", &input.code, 50)?;
    customer.name = require_text("name", &input.name, 200)?;
    customer.tax_number = normalize_optional(input.tax_number);
    customer.contact_person = normalize_optional(input.contact_person);
    customer.email = normalize_optional(input.email).map(|e| e.to_lowercase());
    customer.phone = normalize_optional(input.phone);
    customer.address = normalize_optional(input.address);
    customer.set_credit_limit(input.credit_limit)?;
    if let Some(status) = input.status {
        customer.status = status;
    }
    Ok(())
}

#[async_trait]
impl CrudResource for CustomerResource {
    type Entity = Customer;
    type View = CustomerView;
    type Create = SaveCustomer;
    type Update = SaveCustomer;

    const RESOURCE: &'static str = "customers";

    fn lifecycle(&self) -> &CrudHandler<Customer> {
        &self.customers
    }

    async fn create(&self, input: SaveCustomer, actor: &UserId) -> AppResult<Customer> {
        let mut customer = Customer::new(String::new(), String::new(), Some(actor.clone()));
        apply(&mut customer, input)?;

        self.customers.create(customer).await
    }

    async fn update(&self, id: CustomerId, input: SaveCustomer, actor: &UserId) -> AppResult<Customer> {
        let mut customer = self.customers.get(&id).await?;
        apply(&mut customer, input)?;
        customer.audit_info.update(Some(actor.clone()));

        self.customers.update(customer).await
    }
}
