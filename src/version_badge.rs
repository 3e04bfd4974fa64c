use tracing::{info, warn};

use crate::client::SiteClient;
use crate::models::VersionTag;
use crate::page::Page;

/// Badge text for a tag list: the first tag's name, or `0`.
pub fn version_text(tags: &[VersionTag]) -> String {
    tags.first()
        .and_then(|tag| tag.name.clone())
        .unwrap_or_else(|| "0".to_string())
}

/// Sets the `version` element from the remote tag list. On failure the element is left as is.
pub async fn refresh_version(client: &SiteClient, page: &mut Page) {
    match client.fetch_tags().await {
        Ok(tags) => {
            page.version = version_text(&tags);
            info!(version = %page.version, "version badge updated");
        }
        Err(e) => warn!("unable to get the version: {}", e),
    }
}
