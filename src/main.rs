use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinship_service::{
    config::Config,
    db::{create_pool, run_migrations},
    routes::configure_routes,
    security,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting kinship-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize JWT validation from the shared secret
    security::jwt::initialize_keys(&config.jwt.secret)
        .expect("Failed to initialize JWT keys from environment");
    tracing::info!("JWT validation initialized");

    // Create database connection pool
    let db_pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    // Run migrations
    run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations completed");

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Listening on {}", bind_addr);

    let is_production = config.is_production();
    let server_config = config.clone();

    HttpServer::new(move || {
        let cors = if is_production {
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PATCH", "PUT", "DELETE"])
                .allow_any_header()
                .max_age(3600)
        } else {
            Cors::permissive()
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
