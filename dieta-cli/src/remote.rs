//! HTTP retrieval of remote spreadsheet resources
//!
//! Both the worker directory and the diet templates live as plain files
//! behind fixed URLs, so all this client does is GET a URL and hand back the
//! body bytes. No retry, transport-default timeouts.

use crate::error::FetchError;

/// Thin wrapper around a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch a resource and return the raw response body.
    ///
    /// A non-success status is an error in its own right; callers never have
    /// to inspect the bytes to find out the fetch failed.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        log::debug!("GET {} -> {} ({} bytes)", url, status, bytes.len());
        Ok(bytes.to_vec())
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new()
    }
}
