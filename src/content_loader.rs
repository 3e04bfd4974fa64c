use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::client::SiteClient;
use crate::error::FetchError;
use crate::markdown::markdown_to_html;
use crate::page::{Page, CONTENT_ERROR_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    HttpError(StatusCode),
    FetchFailed,
    /// A newer load started before this one finished; nothing was written.
    Stale,
}

enum Fetched {
    Body(String),
    Status(StatusCode),
}

pub fn header_text(sub: &str, emails: &[String]) -> String {
    format!("{} - {}", sub, emails.join(" & "))
}

/// Renders a markdown string straight into the content container.
pub fn render_markdown(page: &mut Page, markdown: &str) {
    page.content_html = markdown_to_html(markdown);
}

async fn fetch_markdown(client: &SiteClient, loc: &str) -> Result<Fetched, FetchError> {
    let url = client.resolve(loc)?;
    let response = client.get(url.clone()).await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Ok(Fetched::Status(status));
    }
    let body = response.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    Ok(Fetched::Body(body))
}

/// Fetches the post at `loc` and renders it into the content container, then sets the header.
///
/// The header is written whatever the fetch outcome. Both writes are skipped when a
/// later call on the same page has taken a newer request token.
pub async fn load_content(
    client: &SiteClient,
    page: &RwLock<Page>,
    sub: &str,
    loc: &str,
    emails: &[String],
) -> LoadOutcome {
    let token = page.write().await.next_token();
    let fetched = fetch_markdown(client, loc).await;

    let mut page = page.write().await;
    if !page.is_current(token) {
        debug!(loc, "discarding stale content load");
        return LoadOutcome::Stale;
    }

    let outcome = match fetched {
        Ok(Fetched::Body(markdown)) => {
            render_markdown(&mut page, &markdown);
            LoadOutcome::Rendered
        }
        Ok(Fetched::Status(status)) => {
            info!(%status, loc, "post fetch returned non-200");
            page.content_html = CONTENT_ERROR_TEXT.to_string();
            LoadOutcome::HttpError(status)
        }
        Err(e) => {
            error!("Error fetching MD file! {}", e);
            LoadOutcome::FetchFailed
        }
    };
    page.header = header_text(sub, emails);
    outcome
}
