//! `LoadLoTE` capability and the thin I/O adapters behind it.
//!
//! The traversal engine only sees the trait; transport policy (timeouts,
//! retries, proxies) belongs to the `reqwest` client handed in by the caller.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Uri;

#[derive(Debug, Error)]
#[error("transport failure while loading `{uri}`")]
pub struct TransportError {
    pub uri: Uri,
    #[source]
    pub source: anyhow::Error,
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(String),
    NotFound,
}

/// Capability resolving a list location to its raw compact-JWS content.
#[async_trait]
pub trait LoadLote: Send + Sync {
    async fn load(&self, uri: &Uri) -> Result<LoadOutcome, TransportError>;
}

/// HTTP adapter: 200 is `Loaded`, 404 is `NotFound`, anything else is a
/// transport error.
#[derive(Debug, Clone, Default)]
pub struct HttpLoteLoader {
    client: reqwest::Client,
}

impl HttpLoteLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoadLote for HttpLoteLoader {
    async fn load(&self, uri: &Uri) -> Result<LoadOutcome, TransportError> {
        let response = self
            .client
            .get(uri.as_str())
            .send()
            .await
            .map_err(|source| TransportError {
                uri: uri.clone(),
                source: anyhow::Error::from(source),
            })?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let content = response.text().await.map_err(|source| TransportError {
                    uri: uri.clone(),
                    source: anyhow::Error::from(source).context("failed to read response body"),
                })?;
                Ok(LoadOutcome::Loaded(content))
            }
            reqwest::StatusCode::NOT_FOUND => Ok(LoadOutcome::NotFound),
            status => Err(TransportError {
                uri: uri.clone(),
                source: anyhow::anyhow!("unexpected HTTP status {status}"),
            }),
        }
    }
}

/// File adapter for `file:` URIs and plain paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoteLoader;

#[async_trait]
impl LoadLote for FileLoteLoader {
    async fn load(&self, uri: &Uri) -> Result<LoadOutcome, TransportError> {
        let path = match url::Url::parse(uri.as_str()) {
            Ok(parsed) if parsed.scheme() == "file" => parsed.to_file_path().map_err(|()| TransportError {
                uri: uri.clone(),
                source: anyhow::anyhow!("not a local file path"),
            })?,
            Ok(parsed) => {
                return Err(TransportError {
                    uri: uri.clone(),
                    source: anyhow::anyhow!("unsupported URI scheme `{}`", parsed.scheme()),
                });
            }
            // Not URL-shaped at all; treat the value as a plain path.
            Err(_) => std::path::PathBuf::from(uri.as_str()),
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(LoadOutcome::Loaded(content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(LoadOutcome::NotFound),
            Err(error) => Err(TransportError {
                uri: uri.clone(),
                source: anyhow::Error::from(error),
            }),
        }
    }
}

/// In-memory adapter for tests and air-gapped provisioning.
#[derive(Debug, Clone, Default)]
pub struct StaticLoteLoader {
    lists: HashMap<Uri, String>,
}

impl StaticLoteLoader {
    pub fn new(lists: impl IntoIterator<Item = (Uri, String)>) -> Self {
        Self {
            lists: lists.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, uri: impl Into<Uri>, content: impl Into<String>) {
        self.lists.insert(uri.into(), content.into());
    }
}

#[async_trait]
impl LoadLote for StaticLoteLoader {
    async fn load(&self, uri: &Uri) -> Result<LoadOutcome, TransportError> {
        match self.lists.get(uri) {
            Some(content) => Ok(LoadOutcome::Loaded(content.clone())),
            None => Ok(LoadOutcome::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code can panic on errors")]

    use super::*;

    #[tokio::test]
    async fn static_loader_serves_inserted_lists() {
        let mut loader = StaticLoteLoader::default();
        loader.insert("https://example/root.jwt", "a.b.c");

        let outcome = loader.load(&Uri::new("https://example/root.jwt")).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(content) if content == "a.b.c"));

        let missing = loader.load(&Uri::new("https://example/other.jwt")).await.unwrap();
        assert!(matches!(missing, LoadOutcome::NotFound));
    }

    #[tokio::test]
    async fn file_loader_reports_missing_files_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.jwt");
        tokio::fs::write(&path, "x.y.z").await.unwrap();

        let loaded = FileLoteLoader
            .load(&Uri::new(path.display().to_string()))
            .await
            .unwrap();
        assert!(matches!(loaded, LoadOutcome::Loaded(content) if content == "x.y.z"));

        let missing = FileLoteLoader
            .load(&Uri::new(dir.path().join("absent.jwt").display().to_string()))
            .await
            .unwrap();
        assert!(matches!(missing, LoadOutcome::NotFound));
    }

    #[tokio::test]
    async fn file_loader_rejects_non_file_schemes() {
        let error = FileLoteLoader
            .load(&Uri::new("https://example/list.jwt"))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("transport failure"));
    }
}
