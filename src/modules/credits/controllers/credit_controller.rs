use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::AppError;
use crate::modules::credits::models::{
    CreateCreditRequest, CreditListItemResponse, CreditResponse,
};
use crate::modules::credits::services::CreditService;
use crate::modules::customers::services::CustomerService;

/// Query parameters identifying the requesting customer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

/// Submit a credit application
/// POST /api/credits
pub async fn create_credit(
    credit_service: web::Data<Arc<CreditService>>,
    customer_service: web::Data<Arc<CustomerService>>,
    request: web::Json<CreateCreditRequest>,
) -> Result<HttpResponse, AppError> {
    let credit = request.into_inner().into_entity()?;
    let credit = credit_service.save(credit).await?;
    let customer = customer_service.find_by_id(credit.customer_id).await?;

    Ok(HttpResponse::Created().body(format!(
        "Credit {} - Customer {} saved!",
        credit.credit_code, customer.email
    )))
}

/// List a customer's credit applications
/// GET /api/credits?customerId={id}
pub async fn list_credits(
    credit_service: web::Data<Arc<CreditService>>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let credits = credit_service.find_all_by_customer(query.customer_id).await?;

    let response: Vec<CreditListItemResponse> =
        credits.iter().map(CreditListItemResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Fetch a single credit by its external code, on behalf of its owner
/// GET /api/credits/{creditCode}?customerId={id}
pub async fn find_credit(
    credit_service: web::Data<Arc<CreditService>>,
    customer_service: web::Data<Arc<CustomerService>>,
    path: web::Path<Uuid>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let credit = credit_service
        .find_by_credit_code(query.customer_id, path.into_inner())
        .await?;
    let customer = customer_service.find_by_id(credit.customer_id).await?;

    Ok(HttpResponse::Ok().json(CreditResponse::new(&credit, &customer)))
}

/// Configure credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/credits")
            .route("", web::post().to(create_credit))
            .route("", web::get().to(list_credits))
            .route("/{creditCode}", web::get().to(find_credit)),
    );
}
