// MySQL persistence for credit applications.
//
// credit_code carries a unique index; a collision on insert surfaces as
// AppError::Conflict, mirroring the CPF handling on customers.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::{Credit, CreditStatus};

/// Storage seam for credit applications
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Insert a new credit application
    async fn save(&self, credit: Credit) -> Result<Credit>;

    /// All credits owned by a customer, possibly empty
    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>>;
}

/// MySQL-backed credit repository
pub struct MySqlCreditRepository {
    pool: MySqlPool,
}

impl MySqlCreditRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for MySqlCreditRepository {
    async fn save(&self, mut credit: Credit) -> Result<Credit> {
        let result = sqlx::query(
            r#"
            INSERT INTO credits (
                credit_code, credit_value, day_first_installment,
                number_of_installments, status, customer_id
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(credit.credit_code.to_string())
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status.as_str())
        .bind(credit.customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Credit code {} already exists",
                        credit.credit_code
                    ));
                }
            }
            AppError::Database(e)
        })?;

        credit.id = Some(result.last_insert_id() as i64);
        Ok(credit)
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>> {
        let rows = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        rows.into_iter().map(Credit::try_from).collect()
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>> {
        let row = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE credit_code = ?
            "#,
        )
        .bind(credit_code.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }
}

/// Row shape of the credits table
#[derive(sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: String,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
    customer_id: i64,
}

impl TryFrom<CreditRow> for Credit {
    type Error = AppError;

    fn try_from(row: CreditRow) -> Result<Self> {
        let credit_code = Uuid::parse_str(&row.credit_code)
            .map_err(|_| AppError::internal(format!("Invalid credit code: {}", row.credit_code)))?;
        let status = CreditStatus::try_from(row.status).map_err(AppError::internal)?;

        Ok(Credit {
            id: Some(row.id),
            credit_code,
            credit_value: row.credit_value,
            day_first_installment: row.day_first_installment,
            number_of_installments: row.number_of_installments,
            status,
            customer_id: row.customer_id,
        })
    }
}
