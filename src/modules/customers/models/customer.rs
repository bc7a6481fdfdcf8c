use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Embedded postal address, flattened into the customers table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// A registered customer who can apply for credit
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Generated by the database on first save
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Brazilian taxpayer id, unique across all customers
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub password: String,
    pub address: Address,
}

/// Registration payload for POST /api/customers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl CreateCustomerRequest {
    /// Field-level validation, applied before any service call
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() {
            return Err(AppError::validation("First name must not be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(AppError::validation("Last name must not be empty"));
        }
        if self.cpf.len() != 11 || !self.cpf.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation("CPF must be an 11-digit number"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AppError::validation("Email must be a valid address"));
        }
        if self.income < Decimal::ZERO {
            return Err(AppError::validation("Income must not be negative"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }
        if self.zip_code.trim().is_empty() {
            return Err(AppError::validation("Zip code must not be empty"));
        }
        if self.street.trim().is_empty() {
            return Err(AppError::validation("Street must not be empty"));
        }

        Ok(())
    }

    pub fn into_entity(self) -> Customer {
        Customer {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            income: self.income,
            password: self.password,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
        }
    }
}

/// Partial-update payload for PATCH /api/customers. Only the provided
/// fields are applied; cpf, email and password are never updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub income: Option<Decimal>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> Result<()> {
        if matches!(&self.first_name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("First name must not be empty"));
        }
        if matches!(&self.last_name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("Last name must not be empty"));
        }
        if matches!(self.income, Some(income) if income < Decimal::ZERO) {
            return Err(AppError::validation("Income must not be negative"));
        }
        if matches!(&self.zip_code, Some(zip) if zip.trim().is_empty()) {
            return Err(AppError::validation("Zip code must not be empty"));
        }
        if matches!(&self.street, Some(street) if street.trim().is_empty()) {
            return Err(AppError::validation("Street must not be empty"));
        }

        Ok(())
    }

    /// Apply the provided fields onto an existing customer
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(first_name) = self.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            customer.last_name = last_name;
        }
        if let Some(income) = self.income {
            customer.income = income;
        }
        if let Some(zip_code) = self.zip_code {
            customer.address.zip_code = zip_code;
        }
        if let Some(street) = self.street {
            customer.address.street = street;
        }
    }
}

/// Customer view returned by the API. The password never leaves the
/// service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}
