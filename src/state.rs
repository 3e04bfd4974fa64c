use std::{path::{Path, PathBuf}, sync::Arc};

use tokio::{fs, sync::{broadcast, RwLock}};
use tracing::{error, info};

use crate::client::SiteClient;
use crate::config::SiteLink;

pub type RefreshBroadcaster = broadcast::Sender<()>;

pub struct AppState {
    pub layout_html: RwLock<String>,
    pub not_found_html: RwLock<String>, // supports {{index}} placeholder
    pub client: SiteClient,
    pub site: SiteLink,
    pub content_dir: PathBuf,
    pub is_development: bool,
}

#[derive(Clone)]
pub struct RouterState {
    pub app_state: Arc<AppState>,
    pub broadcaster: RefreshBroadcaster,
}

impl axum::extract::FromRef<RouterState> for Arc<AppState> {
    fn from_ref(state: &RouterState) -> Self {
        state.app_state.clone()
    }
}

impl axum::extract::FromRef<RouterState> for RefreshBroadcaster {
    fn from_ref(state: &RouterState) -> Self {
        state.broadcaster.clone()
    }
}

/// Reads `layout.html` and `not_found.html` from the content directory.
pub async fn load_templates(content_dir: &Path) -> Result<(String, String), std::io::Error> {
    let layout_html = fs::read_to_string(content_dir.join("layout.html")).await?;
    let not_found_html = fs::read_to_string(content_dir.join("not_found.html")).await?;
    Ok((layout_html, not_found_html))
}

pub async fn reload_templates(app_state: &AppState) {
    info!("Reloading page templates...");
    match load_templates(&app_state.content_dir).await {
        Ok((layout, not_found)) => {
            *app_state.layout_html.write().await = layout;
            *app_state.not_found_html.write().await = not_found;
            info!("Templates successfully reloaded.");
        }
        Err(e) => {
            error!("Failed to reload templates: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_for(dir: &Path) -> AppState {
        AppState {
            layout_html: RwLock::new(String::new()),
            not_found_html: RwLock::new(String::new()),
            client: SiteClient::new("http://127.0.0.1:9", "http://127.0.0.1:9/tags").unwrap(),
            site: SiteLink {
                name: "site".into(),
                href: "https://site.example".into(),
            },
            content_dir: dir.to_path_buf(),
            is_development: true,
        }
    }

    #[tokio::test]
    async fn reload_picks_up_edited_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("layout.html"), "<body>v2</body>").unwrap();
        std::fs::write(dir.path().join("not_found.html"), "<p>{{index}}</p>").unwrap();

        let state = state_for(dir.path());
        reload_templates(&state).await;

        assert_eq!(*state.layout_html.read().await, "<body>v2</body>");
        assert_eq!(*state.not_found_html.read().await, "<p>{{index}}</p>");
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_templates() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());
        *state.layout_html.write().await = "old".into();

        reload_templates(&state).await;

        assert_eq!(*state.layout_html.read().await, "old");
    }

    #[tokio::test]
    async fn shipped_templates_load() {
        let (layout, not_found) = load_templates(Path::new(crate::config::CONTENT_DIR))
            .await
            .unwrap();
        for id in ["year", "version", "ul_list", "content-area", "header", "theme-icon"] {
            assert!(layout.contains(&format!("id=\"{id}\"")), "layout is missing #{id}");
        }
        assert!(not_found.contains("{{index}}"));
    }
}
