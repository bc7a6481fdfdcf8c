use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

/// Lifecycle status of a credit application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    /// Application received, analysis pending
    InProgress,
    Approved,
    Reject,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for CreditStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "APPROVED" => Ok(Self::Approved),
            "REJECT" => Ok(Self::Reject),
            _ => Err(format!("Invalid credit status: {}", value)),
        }
    }
}

/// A credit application owned by exactly one customer
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    /// Generated by the database on first save
    pub id: Option<i64>,
    /// External-facing identifier, generated at creation and unique
    /// independently of the surrogate id
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: i64,
}

impl Credit {
    /// Build a new application with a fresh credit code and initial
    /// IN_PROGRESS status
    ///
    /// # Arguments
    /// * `credit_value` - Requested amount, must be positive
    /// * `day_first_installment` - Requested first installment date
    /// * `number_of_installments` - Between 1 and 48
    /// * `customer_id` - Owning customer
    pub fn new(
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer_id: i64,
    ) -> Result<Self> {
        if credit_value <= Decimal::ZERO {
            return Err(AppError::validation("Credit value must be positive"));
        }

        if !(1..=48).contains(&number_of_installments) {
            return Err(AppError::validation(format!(
                "Number of installments must be between 1 and 48, got {}",
                number_of_installments
            )));
        }

        Ok(Self {
            id: None,
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: CreditStatus::InProgress,
            customer_id,
        })
    }
}

/// Application payload for POST /api/credits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreateCreditRequest {
    pub fn into_entity(self) -> Result<Credit> {
        Credit::new(
            self.credit_value,
            self.day_first_installment,
            self.number_of_installments,
            self.customer_id,
        )
    }
}

/// Detail view for a single credit, joined with its owner's contact and
/// income data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditResponse {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub email_customer: String,
    pub income_customer: Decimal,
}

impl CreditResponse {
    pub fn new(credit: &Credit, customer: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer: customer.email.clone(),
            income_customer: customer.income,
        }
    }
}

/// Compact list view for GET /api/credits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditListItemResponse {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<&Credit> for CreditListItemResponse {
    fn from(credit: &Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}
