use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_httpauth::middleware::HttpAuthentication;
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use sqlx::PgPool;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use dayledger::handlers;
use dayledger::ledger::Ledger;
use dayledger::store::PostgresActivityStore;
use dayledger::utils::jwt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Validate JWT secret
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    if jwt_secret.is_empty() {
        panic!("JWT_SECRET cannot be empty");
    }

    // Initialize the database pool
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    // Apply schema migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let ledger = Ledger::new(Arc::new(PostgresActivityStore::new(pool)));

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Authentication middleware
    let auth = HttpAuthentication::bearer(jwt::validator);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "dayledger".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(web::Data::new(ledger.clone()))
            .service(
                web::resource("/v1/activities")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::activity::list_activities))
                    .route(web::post().to(handlers::activity::create_activity)),
            )
            .service(
                web::resource("/v1/activities/{activityId}")
                    .wrap(auth.clone())
                    .route(web::patch().to(handlers::activity::update_activity))
                    .route(web::delete().to(handlers::activity::delete_activity)),
            )
            .service(
                web::resource("/v1/analytics/{date}")
                    .wrap(auth.clone())
                    .route(web::get().to(handlers::analytics::day_summary)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
