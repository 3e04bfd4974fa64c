use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::{get, get_service},
    Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tracing::info;

use crate::content_loader::load_content;
use crate::footer::{current_year, render_footer};
use crate::hot_reload::ws_handler;
use crate::models::{PostEntry, ThemeMode};
use crate::page::{render_with_layout, Page};
use crate::post_list::{create_list, render_list};
use crate::state::{AppState, RouterState};
use crate::theme::toggle_dark_mode;
use crate::version_badge::refresh_version;

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    theme: Option<String>,
}

/// Builds the parts every page shares: footer, theme, version badge and post list.
async fn build_page(state: &AppState, path: String, theme: ThemeMode) -> (Page, Vec<PostEntry>) {
    let mut page = Page::new(path);
    render_footer(&mut page, current_year(), &state.site);
    if theme == ThemeMode::Dark {
        toggle_dark_mode(&mut page);
    }

    let ((), entries) = futures::join!(
        refresh_version(&state.client, &mut page),
        create_list(&state.client)
    );
    render_list(&mut page, &entries);
    (page, entries)
}

async fn finish(state: &AppState, page: &Page) -> Html<String> {
    let layout = state.layout_html.read().await;
    Html(render_with_layout(&layout, page, state.is_development))
}

async fn homepage(
    Query(query): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let theme = ThemeMode::from_query(query.theme.as_deref());
    let (page, _) = build_page(&state, "/".to_string(), theme).await;
    finish(&state, &page).await
}

async fn read_post(
    Path(index): Path<usize>,
    Query(query): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let theme = ThemeMode::from_query(query.theme.as_deref());
    let (page, entries) = build_page(&state, format!("/read/{}", index), theme).await;

    let page = match entries.get(index) {
        Some(entry) => {
            info!(index, loc = %entry.file_loc, "loading post");
            let page = RwLock::new(page);
            load_content(
                &state.client,
                &page,
                &entry.sub_title,
                &entry.file_loc,
                &entry.contributor_email,
            )
            .await;
            page.into_inner()
        }
        None => {
            let mut page = page;
            page.content_html = state
                .not_found_html
                .read()
                .await
                .replace("{{index}}", &index.to_string());
            page
        }
    };

    finish(&state, &page).await
}

pub fn app(router_state: RouterState) -> Router {
    let content_dir = router_state.app_state.content_dir.clone();
    let static_dir = get_service(ServeDir::new(content_dir.join("static")));

    Router::new()
        .route("/", get(homepage))
        .route("/read/{index}", get(read_post))
        .nest_service("/static", static_dir)
        .route("/ws", get(ws_handler))
        .fallback_service(ServeDir::new(content_dir.join("site")))
        .with_state(router_state)
}
