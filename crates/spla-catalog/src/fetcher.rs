//! Remote catalog sources.
//!
//! [`HttpFetcher`] talks to a stat.ink-style JSON API; [`DirFetcher`] reads
//! the same documents from a local directory for offline use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use spla_core::{CatalogItem, CatalogKind};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult, FetchError};

/// A read-only source of raw catalog records.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch every record of `kind`. Any failure aborts the whole fetch.
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, FetchError>;
}

/// Fetches catalogs over HTTP from `<base_url>/<kind>`.
pub struct HttpFetcher {
    http: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The URL for `kind`.
    pub fn url(&self, kind: CatalogKind) -> String {
        format!("{}/{}", self.base_url, kind.as_str())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, FetchError> {
        let url = self.url(kind);
        tracing::info!(%kind, %url, "fetching catalog");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Unreachable {
                kind,
                resource: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                kind,
                url,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::Malformed {
            kind,
            resource: url,
            message: e.to_string(),
        })
    }
}

/// Reads catalogs from `<dir>/<kind>.json`.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    dir: PathBuf,
}

impl DirFetcher {
    /// Read catalogs from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The file holding `kind`.
    pub fn path(&self, kind: CatalogKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.as_str()))
    }
}

#[async_trait]
impl Fetcher for DirFetcher {
    async fn fetch(&self, kind: CatalogKind) -> Result<Vec<CatalogItem>, FetchError> {
        let path = self.path(kind);
        tracing::info!(%kind, path = %path.display(), "reading catalog file");

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Unreachable {
                kind,
                resource: path.display().to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&text).map_err(|e| FetchError::Malformed {
            kind,
            resource: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn http_urls() {
        let fetcher =
            HttpFetcher::new(&CatalogConfig::default().with_base_url("http://example.test/api/")).unwrap();
        assert_eq!(fetcher.url(CatalogKind::Rule), "http://example.test/api/rule");
        assert_eq!(fetcher.url(CatalogKind::Weapon), "http://example.test/api/weapon");
    }

    #[tokio::test]
    async fn dir_fetcher_reads_records() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("stage.json"),
            r#"[{"key":"yunohana","name":{"ja_JP":"ユノハナ大渓谷","en_US":"Scorch Gorge"},"aliases":["1"]}]"#,
        )
        .unwrap();

        let fetcher = DirFetcher::new(dir.path());
        let items = fetcher.fetch(CatalogKind::Stage).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key, "yunohana");
        assert_eq!(items[0].display_name("en_US"), "Scorch Gorge");
    }

    #[tokio::test]
    async fn dir_fetcher_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = DirFetcher::new(dir.path())
            .fetch(CatalogKind::Rule)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unreachable { kind: CatalogKind::Rule, .. }));
        assert_eq!(err.kind(), CatalogKind::Rule);
    }

    #[tokio::test]
    async fn dir_fetcher_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("weapon.json"), r#"{"key":"not a list"}"#).unwrap();
        let err = DirFetcher::new(dir.path())
            .fetch(CatalogKind::Weapon)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Malformed { kind: CatalogKind::Weapon, .. }));
        assert!(err.to_string().contains("weapon.json"));
    }
}
