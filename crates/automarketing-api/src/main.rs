//! # AutoMarketing API Server
//!
//! Binary entry point for the product service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use automarketing_api::{ApiContext, Config, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = automarketing_api::VERSION,
        "Starting AutoMarketing API"
    );

    tracing::info!(
        supabase = config.supabase.url.is_some(),
        redis = config.redis.url.is_some(),
        claude = config.claude.api_key.is_some(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Service configuration loaded"
    );

    // Clients connect lazily on first request
    let api_ctx = ApiContext::from_config(&config);
    let app = build_router(api_ctx, &config.cors_origins);

    // Start server
    let addr = config.server_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Dashboard available at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
