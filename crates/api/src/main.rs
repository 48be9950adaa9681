//! Valentine card server binary entrypoint.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use valentine_common::config::AppConfig;
use valentine_notifier::Dispatcher;

use valentine_api::routes::create_router;
use valentine_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("valentine_api=debug,valentine_notifier=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting valentine card server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Email channels
    let dispatcher = Dispatcher::from_config(&config)?;

    let addr = config.bind_addr;
    let state = AppState::new(config, dispatcher);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("Card server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
