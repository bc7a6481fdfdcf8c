// Unit tests for CreditService against in-memory repositories.
//
// Covers the interaction contract (exactly one customer read and one
// credit write, in that order), the first-installment window, and the
// existence-vs-ownership distinction on credit code lookups.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{Months, Utc};
use uuid::Uuid;

use credisys::modules::credits::models::CreditStatus;
use credisys::modules::credits::services::CreditService;
use credisys::modules::customers::services::CustomerService;
use helpers::{
    credit_for, credit_with_first_installment, customer, InMemoryCreditRepository,
    InMemoryCustomerRepository,
};

struct Fixture {
    customer_repository: Arc<InMemoryCustomerRepository>,
    credit_repository: Arc<InMemoryCreditRepository>,
    service: CreditService,
}

fn fixture() -> Fixture {
    let customer_repository = Arc::new(InMemoryCustomerRepository::new());
    let credit_repository = Arc::new(InMemoryCreditRepository::new());
    let customer_service = Arc::new(CustomerService::new(customer_repository.clone()));
    let service = CreditService::new(credit_repository.clone(), customer_service);

    Fixture {
        customer_repository,
        credit_repository,
        service,
    }
}

#[tokio::test]
async fn save_reads_customer_once_and_writes_once() {
    let f = fixture();
    let owner = f.customer_repository.seed(customer());

    let credit = credit_for(owner.id.unwrap());
    let saved = f.service.save(credit.clone()).await.unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.credit_code, credit.credit_code);
    assert_eq!(saved.status, CreditStatus::InProgress);
    assert_eq!(f.customer_repository.find_calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.credit_repository.save_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn save_with_unknown_customer_never_persists() {
    let f = fixture();

    let err = f.service.save(credit_for(42)).await.unwrap_err();

    assert_eq!(err.kind(), "BusinessError");
    assert_eq!(err.to_string(), "Id 42 not found");
    assert_eq!(f.credit_repository.save_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn save_with_invalid_date_aborts_before_any_access() {
    let f = fixture();
    let owner = f.customer_repository.seed(customer());

    let too_late = Utc::now()
        .date_naive()
        .checked_add_months(Months::new(4))
        .unwrap();
    let credit = credit_with_first_installment(owner.id.unwrap(), too_late);

    let err = f.service.save(credit).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid Date");
    assert_eq!(f.customer_repository.find_calls.load(Ordering::SeqCst), 0);
    assert_eq!(f.credit_repository.save_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn first_installment_window_is_boundary_inclusive() {
    let f = fixture();
    let today = Utc::now().date_naive();
    let boundary = today.checked_add_months(Months::new(3)).unwrap();

    assert!(f.service.valid_day_first_installment(today).unwrap());
    assert!(f.service.valid_day_first_installment(boundary).unwrap());

    let past_boundary = boundary.succ_opt().unwrap();
    let err = f
        .service
        .valid_day_first_installment(past_boundary)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid Date");
}

#[tokio::test]
async fn find_all_by_customer_returns_owned_credits() {
    let f = fixture();
    let owner = f.customer_repository.seed(customer());
    let owner_id = owner.id.unwrap();

    let first = f.credit_repository.seed(credit_for(owner_id));
    let second = f.credit_repository.seed(credit_for(owner_id));
    f.credit_repository.seed(credit_for(owner_id + 1));

    let credits = f.service.find_all_by_customer(owner_id).await.unwrap();

    assert_eq!(credits.len(), 2);
    assert!(credits.contains(&first));
    assert!(credits.contains(&second));
}

#[tokio::test]
async fn find_all_by_unknown_customer_is_empty_not_an_error() {
    let f = fixture();

    let credits = f.service.find_all_by_customer(999).await.unwrap();

    assert!(credits.is_empty());
}

#[tokio::test]
async fn find_by_credit_code_passes_credit_through_unchanged() {
    let f = fixture();
    let owner = f.customer_repository.seed(customer());
    let seeded = f.credit_repository.seed(credit_for(owner.id.unwrap()));

    let found = f
        .service
        .find_by_credit_code(owner.id.unwrap(), seeded.credit_code)
        .await
        .unwrap();

    assert_eq!(found, seeded);
}

#[tokio::test]
async fn find_by_unknown_credit_code_reports_contract_message() {
    let f = fixture();
    let code = Uuid::new_v4();

    let err = f.service.find_by_credit_code(1, code).await.unwrap_err();

    assert_eq!(err.kind(), "BusinessError");
    assert_eq!(err.to_string(), format!("Creditcode {} not found", code));
}

#[tokio::test]
async fn foreign_owner_is_an_authorization_error_not_absence() {
    let f = fixture();
    let owner = f.customer_repository.seed(customer());
    let seeded = f.credit_repository.seed(credit_for(owner.id.unwrap()));

    let err = f
        .service
        .find_by_credit_code(owner.id.unwrap() + 1, seeded.credit_code)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Contact admin");
}
