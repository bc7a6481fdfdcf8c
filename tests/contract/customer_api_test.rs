// Contract tests for the customer endpoints: response shapes, status
// codes, and the error body format (title, timestamp, status, exception,
// details) the API promises to clients.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use credisys::modules::customers::controllers::customer_controller;
use credisys::modules::customers::services::CustomerService;
use helpers::InMemoryCustomerRepository;

fn customer_service() -> Arc<CustomerService> {
    Arc::new(CustomerService::new(Arc::new(
        InMemoryCustomerRepository::new(),
    )))
}

macro_rules! customer_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service.clone()))
                .service(web::scope("/api").configure(customer_controller::configure)),
        )
        .await
    };
}

fn registration_payload() -> Value {
    json!({
        "firstName": "Mislene",
        "lastName": "Silva",
        "cpf": "75480224093",
        "email": "mislene@email.com",
        "income": 2000.0,
        "password": "54321",
        "zipCode": "000000",
        "street": "Rua da Mislene, 123"
    })
}

#[actix_web::test]
async fn create_customer_returns_201_with_echoed_fields() {
    let service = customer_service();
    let app = customer_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(registration_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["firstName"], "Mislene");
    assert_eq!(body["lastName"], "Silva");
    assert_eq!(body["cpf"], "75480224093");
    assert_eq!(body["email"], "mislene@email.com");
    assert_eq!(body["income"], json!(2000.0));
    assert_eq!(body["zipCode"], "000000");
    assert_eq!(body["street"], "Rua da Mislene, 123");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn duplicate_cpf_returns_409_conflict_body() {
    let service = customer_service();
    let app = customer_app!(service);

    let first = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(registration_payload())
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status().as_u16(), 201);

    let second = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(registration_payload())
        .to_request();
    let resp = test::call_service(&app, second).await;

    assert_eq!(resp.status().as_u16(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Conflict! Consult the documentation");
    assert_eq!(body["status"], 409);
    assert_eq!(body["exception"], "ConflictError");
    assert!(body["timestamp"].is_string());
    assert!(!body["details"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn empty_first_name_returns_400_validation_body() {
    let service = customer_service();
    let app = customer_app!(service);

    let mut payload = registration_payload();
    payload["firstName"] = json!("");

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request! Consult the documentation");
    assert_eq!(body["status"], 400);
    assert_eq!(body["exception"], "ValidationError");
    assert!(!body["details"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_customer_id_returns_400_business_body() {
    let service = customer_service();
    let app = customer_app!(service);

    let req = test::TestRequest::get()
        .uri("/api/customers/2")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request! Consult the documentation");
    assert_eq!(body["exception"], "BusinessError");
    assert_eq!(body["details"][0], "Id 2 not found");
}

#[actix_web::test]
async fn patch_merges_fields_and_keeps_cpf_and_email() {
    let service = customer_service();
    let app = customer_app!(service);

    let create = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(registration_payload())
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, create).await).await;
    let id = created["id"].as_i64().unwrap();

    let patch = test::TestRequest::patch()
        .uri(&format!("/api/customers?customerId={}", id))
        .set_json(json!({
            "firstName": "MiUpdate",
            "income": 5000.0
        }))
        .to_request();
    let resp = test::call_service(&app, patch).await;

    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["firstName"], "MiUpdate");
    assert_eq!(body["income"], json!(5000.0));
    assert_eq!(body["lastName"], "Silva");
    assert_eq!(body["cpf"], "75480224093");
    assert_eq!(body["email"], "mislene@email.com");
}

#[actix_web::test]
async fn patch_unknown_customer_returns_400() {
    let service = customer_service();
    let app = customer_app!(service);

    let req = test::TestRequest::patch()
        .uri("/api/customers?customerId=777")
        .set_json(json!({"firstName": "MiUpdate"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"][0], "Id 777 not found");
}

#[actix_web::test]
async fn delete_returns_204_and_removes_customer() {
    let service = customer_service();
    let app = customer_app!(service);

    let create = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(registration_payload())
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, create).await).await;
    let id = created["id"].as_i64().unwrap();

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/customers/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status().as_u16(), 204);

    let lookup = test::TestRequest::get()
        .uri(&format!("/api/customers/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, lookup).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn delete_unknown_customer_returns_400() {
    let service = customer_service();
    let app = customer_app!(service);

    let req = test::TestRequest::delete()
        .uri("/api/customers/31337")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}
