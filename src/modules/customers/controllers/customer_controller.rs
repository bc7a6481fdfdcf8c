use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::modules::customers::models::{
    CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest,
};
use crate::modules::customers::services::CustomerService;

/// Query parameters for PATCH /customers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerQuery {
    pub customer_id: i64,
}

/// Register a new customer
/// POST /api/customers
pub async fn create_customer(
    service: web::Data<Arc<CustomerService>>,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let customer = service.save(request.into_entity()).await?;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// Get customer by id
/// GET /api/customers/{id}
pub async fn find_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// Partially update a customer
/// PATCH /api/customers?customerId={id}
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    query: web::Query<UpdateCustomerQuery>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let customer = service.update(query.customer_id, request).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// Delete a customer
/// DELETE /api/customers/{id}
pub async fn delete_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::patch().to(update_customer))
            .route("/{id}", web::get().to(find_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
