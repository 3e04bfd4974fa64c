use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

pub const CONTENT_DIR: &str = "content";
pub const SITE_FILE: &str = "site.toml";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TAGS_URL: &str = "https://api.github.com/repos/prax78/goodread/tags";
const DEFAULT_SITE_NAME: &str = "Prakash78Blog";
const DEFAULT_SITE_LINK: &str = "https://prakash78blog.wordpress.com";

/// Optional overrides read from `content/site.toml`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SiteFile {
    pub site_name: Option<String>,
    pub site_link: Option<String>,
    pub origin: Option<String>,
    pub tags_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub is_development: bool,
    /// Base URL the manifest and post locations are resolved against.
    pub origin: String,
    pub tags_url: String,
    pub site: SiteLink,
    pub content_dir: PathBuf,
}

impl Config {
    /// Reads `content/site.toml` when present, then applies the environment on top.
    pub fn load(content_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content_dir = content_dir.as_ref().to_path_buf();
        let site_file = read_site_file(&content_dir.join(SITE_FILE))?;
        let config = Self::from_sources(content_dir, site_file, |key| std::env::var(key).ok());
        info!(origin = %config.origin, port = config.port, "configuration loaded");
        Ok(config)
    }

    pub fn from_sources(
        content_dir: PathBuf,
        file: SiteFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let is_development = env("RUST_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);

        let port: u16 = env("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let origin = env("BLOG_ORIGIN")
            .or(file.origin)
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));

        let tags_url = env("TAGS_URL")
            .or(file.tags_url)
            .unwrap_or_else(|| DEFAULT_TAGS_URL.to_string());

        Config {
            port,
            is_development,
            origin,
            tags_url,
            site: SiteLink {
                name: file.site_name.unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
                href: file.site_link.unwrap_or_else(|| DEFAULT_SITE_LINK.to_string()),
            },
            content_dir,
        }
    }
}

fn read_site_file(path: &Path) -> Result<SiteFile, ConfigError> {
    if !path.exists() {
        return Ok(SiteFile::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
