use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, UpdateCustomerRequest};
use crate::modules::customers::repositories::CustomerRepository;

/// Business logic for customer registration and maintenance
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Persist a new customer. A duplicate CPF surfaces as a conflict
    /// from the storage layer's unique index.
    pub async fn save(&self, customer: Customer) -> Result<Customer> {
        let saved = self.repository.save(customer).await?;
        tracing::info!(customer_id = ?saved.id, "Customer registered");
        Ok(saved)
    }

    /// Look up a customer, failing when the id is unknown. The message
    /// text is part of the API contract.
    pub async fn find_by_id(&self, id: i64) -> Result<Customer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::business(format!("Id {} not found", id)))
    }

    /// Apply a partial update to an existing customer. Not-found errors
    /// from the lookup propagate untouched.
    pub async fn update(&self, id: i64, request: UpdateCustomerRequest) -> Result<Customer> {
        let mut customer = self.find_by_id(id).await?;
        request.apply_to(&mut customer);
        self.repository.save(customer).await
    }

    /// Delete a customer, failing when the id is unknown
    pub async fn delete(&self, id: i64) -> Result<()> {
        let customer = self.find_by_id(id).await?;
        self.repository
            .delete_by_id(customer.id.unwrap_or(id))
            .await?;
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}
