use std::sync::Arc;
use std::time::Duration;

use auth_service::authentication::service::AuthService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryTokenRepository;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::token::ports::TokenRepository;
use chrono::Utc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_minutes = config.jwt.refresh_token_ttl_minutes,
        purge_interval_seconds = config.tokens.purge_interval_seconds,
        "Configuration loaded"
    );

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let token_repository = Arc::new(InMemoryTokenRepository::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&token_repository),
        config.jwt.secret.as_bytes(),
        config.jwt.token_settings(),
    ));

    let purge_interval = Duration::from_secs(config.tokens.purge_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purge_interval);
        loop {
            ticker.tick().await;
            let purged = token_repository.purge_expired(Utc::now()).await;
            if purged > 0 {
                tracing::debug!(purged, "Expired refresh tokens purged");
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
