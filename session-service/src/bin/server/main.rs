use std::sync::Arc;

use auth::Salt;
use auth::TokenService;
use session_service::account::service::AccountService;
use session_service::config::Config;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::InMemoryAccountRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cookie_name = %config.session.cookie_name,
        session_ttl_seconds = config.session.ttl_seconds,
        login_path = %config.session.login_path,
        "Configuration loaded"
    );

    // The salt is fixed for the lifetime of the process; sessions do not
    // survive a restart.
    let salt = Salt::generate()?;
    tracing::info!(salt_len = salt.len(), "Session salt generated");
    let tokens = Arc::new(TokenService::new(salt));

    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let account_service = Arc::new(AccountService::new(account_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, tokens, config.session);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
