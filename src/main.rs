#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use std::io;

use actix_web::HttpServer;
use dotenvy::dotenv;
use studio_booking::config::AppConfig;
use studio_booking::db::{establish_connection_pool, run_db_migrations};
use studio_booking::{build_app, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    info!("Initializing database connection pool...");
    let pool = establish_connection_pool(&config.database_url, config.pool_size).map_err(|e| {
        error!("Unable to create connection pool: {}", e);
        io::Error::other(e)
    })?;
    run_db_migrations(pool.clone()).map_err(|e| {
        error!("Unable to run migrations: {}", e);
        io::Error::other(e)
    })?;

    let state = AppState::new(pool, &config.jwt);

    if let Some(admin) = &config.admin {
        let accounts = state.accounts.clone();
        let admin = admin.clone();
        match actix_web::web::block(move || accounts.ensure_admin(&admin)).await {
            Ok(Ok(true)) => info!("Bootstrap admin account created"),
            Ok(Ok(false)) => debug!("Bootstrap admin account already present"),
            Ok(Err(e)) => warn!("Unable to create bootstrap admin account: {}", e),
            Err(e) => warn!("Bootstrap admin task failed: {}", e),
        }
    }

    info!(
        "Starting server at http://{}:{} (tokens valid for {}s)",
        config.host,
        config.port,
        state.tokens.expiry_secs()
    );

    HttpServer::new(move || build_app(&state))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
