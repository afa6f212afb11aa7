use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogd::config::Config;
use catalogd::core::PasswordEncoder;
use catalogd::middleware::RequestId;
use catalogd::modules::categories::controllers::category_controller;
use catalogd::modules::categories::{CategoryService, MySqlCategoryRepository};
use catalogd::modules::health::controllers::health_controller;
use catalogd::modules::products::controllers::product_controller;
use catalogd::modules::products::{MySqlProductRepository, ProductService};
use catalogd::modules::users::controllers::user_controller;
use catalogd::modules::users::{MySqlRoleRepository, MySqlUserRepository, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogd=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting catalogd");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and run migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Explicit constructor-passed wiring, no singleton registry
    let category_repo = Arc::new(MySqlCategoryRepository::new(db_pool.clone()));
    let product_repo = Arc::new(MySqlProductRepository::new(db_pool.clone()));
    let user_repo = Arc::new(MySqlUserRepository::new(db_pool.clone()));
    let role_repo = Arc::new(MySqlRoleRepository::new(db_pool.clone()));

    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let product_service = Arc::new(ProductService::new(product_repo, category_repo));
    let user_service = Arc::new(UserService::new(
        user_repo,
        role_repo,
        PasswordEncoder::new(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(category_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .configure(health_controller::configure)
            .configure(category_controller::configure)
            .configure(product_controller::configure)
            .configure(user_controller::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
