use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{PostEntry, VersionTag};

pub const MANIFEST_PATH: &str = "/data/src.json";

const USER_AGENT: &str = concat!("goodread/", env!("CARGO_PKG_VERSION"));

/// HTTP access to the blog origin and the remote tag list.
///
/// No timeout is configured: a stalled request leaves the affected page region as it was.
#[derive(Clone)]
pub struct SiteClient {
    http: Client,
    origin: String,
    tags_url: String,
}

impl SiteClient {
    pub fn new(origin: impl Into<String>, tags_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(SiteClient {
            http,
            origin: origin.into(),
            tags_url: tags_url.into(),
        })
    }

    /// Appends `loc` to the origin, the way a relative post path is glued onto the page location.
    pub fn resolve(&self, loc: &str) -> Result<Url, FetchError> {
        let joined = format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            loc.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| FetchError::InvalidUrl {
            url: joined.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn get(&self, url: Url) -> Result<Response, FetchError> {
        debug!(%url, "GET");
        self.http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
    }

    pub async fn fetch_tags(&self) -> Result<Vec<VersionTag>, FetchError> {
        let url = Url::parse(&self.tags_url).map_err(|e| FetchError::InvalidUrl {
            url: self.tags_url.clone(),
            reason: e.to_string(),
        })?;
        self.get_json(url).await
    }

    pub async fn fetch_manifest(&self) -> Result<Vec<PostEntry>, FetchError> {
        let url = self.resolve(MANIFEST_PATH)?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.get(url.clone()).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
