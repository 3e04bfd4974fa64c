use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::{net::TcpListener, sync::{broadcast, RwLock}};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod config;
mod content_loader;
mod error;
mod footer;
mod hot_reload;
mod markdown;
mod models;
mod page;
mod post_list;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod theme;
mod version_badge;

use client::SiteClient;
use config::{Config, CONTENT_DIR};
use hot_reload::start_content_watcher;
use state::{load_templates, AppState, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(CONTENT_DIR)?;
    info!("RUST_ENV is set to development: {}", config.is_development);

    let (layout_html, not_found_html) = load_templates(&config.content_dir)
        .await
        .context("Failed to load page templates")?;

    let client = SiteClient::new(config.origin.clone(), config.tags_url.clone())
        .context("Failed to build HTTP client")?;

    let state = Arc::new(AppState {
        layout_html: RwLock::new(layout_html),
        not_found_html: RwLock::new(not_found_html),
        client,
        site: config.site.clone(),
        content_dir: config.content_dir.clone(),
        is_development: config.is_development,
    });

    let (tx, _rx) = broadcast::channel(1);
    if config.is_development {
        info!("Hot reload enabled. Check logs for file change events.");
        start_content_watcher(tx.clone(), state.clone());
    }

    let app = routes::app(RouterState {
        app_state: state,
        broadcaster: tx,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
