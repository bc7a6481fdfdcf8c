use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credisys::config::Config;
use credisys::modules::credits::controllers::credit_controller;
use credisys::modules::credits::repositories::MySqlCreditRepository;
use credisys::modules::credits::services::CreditService;
use credisys::modules::customers::controllers::customer_controller;
use credisys::modules::customers::repositories::MySqlCustomerRepository;
use credisys::modules::customers::services::CustomerService;
use credisys::modules::health::controllers::health_controller;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credisys=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Credisys credit application backend");
    tracing::info!("Environment: {}", config.app.env);

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    // Explicit service construction: repositories behind trait objects,
    // services shared across workers
    let customer_service = Arc::new(CustomerService::new(Arc::new(
        MySqlCustomerRepository::new(db_pool.clone()),
    )));
    let credit_service = Arc::new(CreditService::new(
        Arc::new(MySqlCreditRepository::new(db_pool.clone())),
        customer_service.clone(),
    ));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(credit_service.clone()))
            .service(
                web::scope("/api")
                    .configure(customer_controller::configure)
                    .configure(credit_controller::configure),
            )
            .configure(health_controller::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
