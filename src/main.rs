mod config;
mod dto;
mod handlers;
mod provider;
mod service;

use tracing_subscriber::EnvFilter;

use std::sync::Arc;

use config::{Config, ConfigError};
use handlers::cors::CorsPolicy;
use provider::MailgunClient;
use service::EmailService;

fn load_config() -> Result<Config, ConfigError> {
    let path = config::load_env_file()?;
    tracing::info!("Loaded environment from '{}'", path.display());
    Config::from_env()
}

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load config, there is no server to report to without it
    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Successfully loaded product mailer config: {:?}", cfg);

    // Setup service
    let client = MailgunClient::new(&cfg.mailgun).expect("failed to build Mailgun client");
    let service = EmailService::new(Arc::new(client), &cfg.mailgun);
    tracing::info!("Sending product emails as '{}'", service.sender());

    // Setup router
    let cors = CorsPolicy::new(cfg.server.allowed_origin.clone());
    let router = handlers::router(Arc::new(service), cors);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.server.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tracing::info!("Product mailer starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
