use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::Credit;
use crate::modules::credits::repositories::CreditRepository;
use crate::modules::customers::services::CustomerService;

/// Business logic for credit applications
pub struct CreditService {
    credit_repository: Arc<dyn CreditRepository>,
    customer_service: Arc<CustomerService>,
}

impl CreditService {
    pub fn new(
        credit_repository: Arc<dyn CreditRepository>,
        customer_service: Arc<CustomerService>,
    ) -> Self {
        Self {
            credit_repository,
            customer_service,
        }
    }

    /// Persist a new credit application.
    ///
    /// The first installment date is validated before anything else, then
    /// the owning customer is resolved (exactly one read). Persistence is
    /// never attempted when either check fails.
    pub async fn save(&self, credit: Credit) -> Result<Credit> {
        self.valid_day_first_installment(credit.day_first_installment)?;
        self.customer_service.find_by_id(credit.customer_id).await?;

        let saved = self.credit_repository.save(credit).await?;
        tracing::info!(
            credit_code = %saved.credit_code,
            customer_id = saved.customer_id,
            "Credit application saved"
        );

        Ok(saved)
    }

    /// A first installment date is acceptable up to three months from the
    /// current date, boundary inclusive. The window is anchored to the
    /// clock at validation time, not to a stored creation timestamp.
    pub fn valid_day_first_installment(&self, day_first_installment: NaiveDate) -> Result<bool> {
        let latest_allowed = Utc::now()
            .date_naive()
            .checked_add_months(Months::new(3))
            .ok_or_else(|| AppError::internal("First installment window out of range"))?;

        if day_first_installment <= latest_allowed {
            Ok(true)
        } else {
            Err(AppError::business("Invalid Date"))
        }
    }

    /// All credits owned by a customer. An unknown customer simply owns
    /// nothing, so this never fails on existence.
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>> {
        self.credit_repository
            .find_all_by_customer_id(customer_id)
            .await
    }

    /// Resolve a credit by its external code on behalf of a customer.
    ///
    /// A missing code and a code owned by another customer are distinct
    /// error paths: the latter is an authorization problem, not absence.
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<Credit> {
        let credit = self
            .credit_repository
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| {
                AppError::business(format!("Creditcode {} not found", credit_code))
            })?;

        if credit.customer_id != customer_id {
            return Err(AppError::business("Contact admin"));
        }

        Ok(credit)
    }
}
