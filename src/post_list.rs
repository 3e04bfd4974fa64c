use tracing::{error, info};

use crate::client::SiteClient;
use crate::models::PostEntry;
use crate::page::{ListItem, Page, FALLBACK_LIST_TEXT};

/// Fetches the manifest. Any failure is logged and yields an empty list.
pub async fn create_list(client: &SiteClient) -> Vec<PostEntry> {
    match client.fetch_manifest().await {
        Ok(entries) => {
            info!(count = entries.len(), "manifest loaded");
            entries
        }
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

/// Appends one item per entry in manifest order, or the fallback item when there are none.
pub fn render_list(page: &mut Page, entries: &[PostEntry]) {
    if entries.is_empty() {
        page.list.push(ListItem {
            text: FALLBACK_LIST_TEXT.to_string(),
            index: None,
        });
        return;
    }

    page.list.extend(entries.iter().enumerate().map(|(index, entry)| ListItem {
        text: entry.title.clone(),
        index: Some(index),
    }));
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get, Router};

    use super::*;
    use crate::test_support::{client_for, serve};

    const MANIFEST: &str = r#"[
        {"Title": "First", "Sub_Title": "one", "File_Loc": "/posts/first.md", "Contributor_Email": ["a@x.io"]},
        {"Title": "Second", "Sub_Title": "two", "File_Loc": "/posts/second.md", "Contributor_Email": []},
        {"Title": "Third", "Sub_Title": "three", "File_Loc": "/posts/third.md", "Contributor_Email": ["b@x.io", "c@x.io"]}
    ]"#;

    fn assert_fallback(page: &Page) {
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].text, FALLBACK_LIST_TEXT);
        assert_eq!(page.list[0].index, None);
    }

    #[tokio::test]
    async fn renders_entries_in_manifest_order() {
        let base = serve(Router::new().route("/data/src.json", get(|| async { MANIFEST }))).await;
        let entries = create_list(&client_for(&base)).await;

        let mut page = Page::new("/");
        render_list(&mut page, &entries);

        let titles: Vec<&str> = page.list.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
        let indices: Vec<Option<usize>> = page.list.iter().map(|i| i.index).collect();
        assert_eq!(indices, [Some(0), Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn null_subtitle_or_contributors_keep_every_entry() {
        let base = serve(Router::new().route(
            "/data/src.json",
            get(|| async {
                r#"[
                    {"Title": "A", "File_Loc": "/a.md", "Sub_Title": null, "Contributor_Email": ["a@x.io"]},
                    {"Title": "B", "File_Loc": "/b.md", "Sub_Title": "bee", "Contributor_Email": null}
                ]"#
            }),
        ))
        .await;
        let entries = create_list(&client_for(&base)).await;

        let mut page = Page::new("/");
        render_list(&mut page, &entries);

        let titles: Vec<&str> = page.list.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert!(entries[0].sub_title.is_empty());
        assert!(entries[1].contributor_email.is_empty());
    }

    #[tokio::test]
    async fn empty_manifest_renders_fallback() {
        let base = serve(Router::new().route("/data/src.json", get(|| async { "[]" }))).await;
        let entries = create_list(&client_for(&base)).await;
        let mut page = Page::new("/");
        render_list(&mut page, &entries);
        assert_fallback(&page);
    }

    #[tokio::test]
    async fn non_array_manifest_renders_fallback() {
        let base = serve(Router::new().route(
            "/data/src.json",
            get(|| async { r#"{"Title": "not a list"}"# }),
        ))
        .await;
        let entries = create_list(&client_for(&base)).await;
        assert!(entries.is_empty());
        let mut page = Page::new("/");
        render_list(&mut page, &entries);
        assert_fallback(&page);
    }

    #[tokio::test]
    async fn missing_manifest_renders_fallback() {
        let base = serve(Router::new().route(
            "/data/src.json",
            get(|| async { StatusCode::NOT_FOUND }),
        ))
        .await;
        let entries = create_list(&client_for(&base)).await;
        let mut page = Page::new("/");
        render_list(&mut page, &entries);
        assert_fallback(&page);
    }

    #[tokio::test]
    async fn unreachable_origin_renders_fallback() {
        // Nothing listens on the discard port.
        let client = client_for("http://127.0.0.1:9");
        let entries = create_list(&client).await;
        let mut page = Page::new("/");
        render_list(&mut page, &entries);
        assert_fallback(&page);
    }
}
