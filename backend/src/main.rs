use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod error;
mod settings;
mod tiers;
mod handlers {
    pub mod checkout_handlers;
    pub mod config_handlers;
}

use handlers::checkout_handlers;
use handlers::config_handlers;
use settings::SiteSettings;

pub struct AppState {
    settings: SiteSettings,
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.settings.static_dir.clone();
    let pages = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/config", get(config_handlers::get_config))
        .route("/checkout/{tier}", get(checkout_handlers::checkout))
        .route("/checkout/{tier}/storage", get(checkout_handlers::checkout_with_storage))
        .fallback_service(pages)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            // The dev frontend runs on its own origin and only reads config.
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = SiteSettings::from_env();
    settings.log_missing();

    let _guard = settings.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let bind_addr = settings.bind_addr.clone();
    tracing::info!("Serving {} on {}", settings.static_dir.display(), bind_addr);
    let state = Arc::new(AppState { settings });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    axum::serve(listener, app(state).into_make_service())
        .await
        .context("server stopped")?;
    Ok(())
}
