#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use linkfolio::{
    handlers::{list_sessions, ping, sign_in, sign_out},
    session::SessionCookieFactory,
    settings::LinkfolioSettings,
    store::{IdentityStore, MemoryStore},
    utils::crypto::derive_signing_key,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = LinkfolioSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    start_server(settings).await
}

/// Start the server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(settings: LinkfolioSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    let store: Arc<dyn IdentityStore> = Arc::new(MemoryStore::new());
    let store_data = web::Data::from(store);

    let cookie_factory = SessionCookieFactory::new(
        derive_signing_key(settings.session.session_secret.as_bytes()),
        settings.is_production(),
    );

    // Configure CORS for the profile editor SPA
    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .app_data(web::Data::new(cookie_factory.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Authentication endpoints
        .route("/auth/sign_in", web::post().to(sign_in))
        .route("/auth/sign_out", web::post().to(sign_out))
        // Account endpoints
        .route("/account/sessions", web::get().to(list_sessions))
        // Health endpoint
        .route("/ping", web::get().to(ping));
}

fn print_startup_info(bind_address: &str, settings: &LinkfolioSettings) {
    println!("Starting Linkfolio auth service on http://{bind_address}");
    println!("Environment: {}", settings.application.environment);
    println!();
    println!("Authentication endpoints:");
    println!("  POST /auth/sign_in    - Submit email or username");
    println!("  POST /auth/sign_out   - Revoke the current session");
    println!();
    println!("Account endpoints:");
    println!("  GET  /account/sessions - List the signed-in user's sessions");
    println!();
    println!("System endpoints:");
    println!("  GET  /ping            - Health check");
}
