//! Proxy metadata client backing the resolution engine.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use modgraph_core::{ModuleProvider, Requirement};
use modgraph_util::errors::{ModgraphError, ModgraphResult};

use crate::gomod;
use crate::proxy::GoProxy;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The `@latest` record served by a module proxy.
#[derive(Debug, Deserialize)]
struct LatestInfo {
    #[serde(rename = "Version")]
    version: Option<String>,
}

/// A [`ModuleProvider`] that speaks the Go module proxy protocol.
///
/// One metadata fetch at a time; the engine's worklist loop awaits each call
/// before issuing the next. Failures are never retried within a run.
pub struct ProxyClient {
    client: Client,
    proxy: GoProxy,
}

impl ProxyClient {
    /// Build a client against the given proxy endpoint.
    pub fn new(proxy: GoProxy) -> ModgraphResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("modgraph/0.1")
            .build()
            .map_err(|e| ModgraphError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, proxy })
    }

    /// Build a client against the default public proxy.
    pub fn default_proxy() -> ModgraphResult<Self> {
        Self::new(GoProxy::default_proxy())
    }

    pub fn proxy(&self) -> &GoProxy {
        &self.proxy
    }

    /// GET a text resource. `Ok(None)` for 404, `Err` for anything else
    /// that is not a success status.
    async fn fetch_text(&self, url: &str) -> ModgraphResult<Option<String>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModgraphError::Network {
                message: format!("Request to {url} failed: {e}"),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ModgraphError::Network {
                message: format!("HTTP {status} fetching {url}"),
            }
            .into());
        }

        let text = resp.text().await.map_err(|e| ModgraphError::Network {
            message: format!("Failed to read response from {url}: {e}"),
        })?;
        tracing::debug!("GET {url}: {} bytes", text.len());
        Ok(Some(text))
    }

    /// Whether the proxy knows this module at all, judged by its release
    /// listing. Used to tell `ReleaseNotFound` apart from `ModuleNotFound`.
    async fn module_exists(&self, path: &str) -> bool {
        match self.fetch_text(&self.proxy.list_url(path)).await {
            Ok(Some(body)) => body.lines().any(|line| !line.trim().is_empty()),
            _ => false,
        }
    }
}

#[async_trait]
impl ModuleProvider for ProxyClient {
    async fn latest_release(&self, path: &str) -> ModgraphResult<String> {
        let url = self.proxy.latest_url(path);
        let body = self.fetch_text(&url).await?.ok_or(ModgraphError::ModuleNotFound {
            path: path.to_string(),
        })?;

        let info: LatestInfo =
            serde_json::from_str(&body).map_err(|e| ModgraphError::Parse {
                message: format!("Malformed @latest record for {path}: {e}"),
            })?;

        info.version.ok_or_else(|| {
            ModgraphError::ModuleNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    async fn list_releases(&self, path: &str) -> ModgraphResult<Vec<String>> {
        let url = self.proxy.list_url(path);
        let body = self.fetch_text(&url).await?.ok_or(ModgraphError::ModuleNotFound {
            path: path.to_string(),
        })?;

        // The wire order is oldest-first; flip it so callers that print the
        // raw listing lead with recent releases.
        let mut releases: Vec<String> = body
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .collect();
        releases.reverse();
        Ok(releases)
    }

    async fn fetch_requirements(
        &self,
        path: &str,
        release: &str,
    ) -> ModgraphResult<Vec<Requirement>> {
        let known_module = self.module_exists(path).await;

        let url = self.proxy.mod_url(path, release);
        match self.fetch_text(&url).await? {
            Some(manifest) => Ok(gomod::parse_requirements(&manifest)),
            None if known_module => Err(ModgraphError::ReleaseNotFound {
                path: path.to_string(),
                release: release.to_string(),
            }
            .into()),
            None => Err(ModgraphError::ModuleNotFound {
                path: path.to_string(),
            }
            .into()),
        }
    }

    async fn fetch_size(&self, path: &str, release: &str) -> ModgraphResult<Option<u64>> {
        let url = self.proxy.zip_url(path, release);
        let resp = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| ModgraphError::Network {
                message: format!("Request to {url} failed: {e}"),
            })?;

        if !resp.status().is_success() {
            return Ok(None);
        }

        // content_length() reflects the (empty) HEAD body; the archive size
        // is in the header.
        Ok(resp
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_record_decodes() {
        let info: LatestInfo =
            serde_json::from_str(r#"{"Version":"v1.9.1","Time":"2023-05-12T16:36:18Z"}"#).unwrap();
        assert_eq!(info.version.as_deref(), Some("v1.9.1"));
    }

    #[test]
    fn latest_record_without_version() {
        let info: LatestInfo = serde_json::from_str(r#"{"Time":"2023-05-12T16:36:18Z"}"#).unwrap();
        assert!(info.version.is_none());
    }
}
