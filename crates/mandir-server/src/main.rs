mod api;
mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mandir_places::{PlacesClient, TempleResolver};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mandir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let resolver = match config.google_places_api_key.as_deref() {
        Some(key) => {
            let client = PlacesClient::with_base_url(
                key,
                config.places_timeout_secs,
                &config.places_base_url,
            )?;
            Some(Arc::new(TempleResolver::new(
                client,
                config.region,
                config.public_base_url.clone(),
            )))
        }
        None => {
            tracing::warn!(
                "GOOGLE_PLACES_API_KEY not set; temple and photo endpoints will answer missing_api_key"
            );
            None
        }
    };

    let rate_limit = RateLimitState::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    );
    let app = build_app(AppState { resolver }, &config.allowed_origins, rate_limit);

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        "mandir-server listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
