// MySQL persistence for customers.
//
// CPF uniqueness is guaranteed by the unique index on customers.cpf; a
// violated insert surfaces as AppError::Conflict so concurrent
// registrations never need an application-level pre-check.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Address, Customer};

/// Storage seam for customers; the service layer depends only on this
/// trait, never on a concrete database.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer (id absent) or persist changes to an
    /// existing one (id present)
    async fn save(&self, customer: Customer) -> Result<Customer>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// MySQL-backed customer repository
pub struct MySqlCustomerRepository {
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut customer: Customer) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                first_name, last_name, cpf, email, income, password, zip_code, street
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(customer.income)
        .bind(&customer.password)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "CPF {} is already registered",
                        customer.cpf
                    ));
                }
            }
            AppError::Database(e)
        })?;

        customer.id = Some(result.last_insert_id() as i64);
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<Customer> {
        let id = customer
            .id
            .ok_or_else(|| AppError::internal("Cannot update a customer without an id"))?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, income = ?, zip_code = ?, street = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::business(format!("Id {} not found", id)));
        }

        Ok(customer)
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn save(&self, customer: Customer) -> Result<Customer> {
        match customer.id {
            None => self.insert(customer).await,
            Some(_) => self.update(customer).await,
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, cpf, email, income, password, zip_code, street
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row.map(Customer::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}

/// Row shape of the customers table
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    income: Decimal,
    password: String,
    zip_code: String,
    street: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            cpf: row.cpf,
            email: row.email,
            income: row.income,
            password: row.password,
            address: Address {
                zip_code: row.zip_code,
                street: row.street,
            },
        }
    }
}
