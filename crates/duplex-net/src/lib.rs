//! duplex networking
//!
//! Fetches markup over HTTP(S) and surfaces the two things the loader's
//! mode sniffing needs: the decoded response text and the server's declared
//! content type. Transport policy (TLS, redirects, retries) lives here and
//! nowhere else; the core never touches the network.

use std::time::Duration;

pub use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched markup resource
#[derive(Debug)]
pub struct FetchedMarkup {
    /// Decoded response body
    pub text: String,
    /// Declared `Content-Type` header, verbatim (parameters intact);
    /// `None` when the server sent none
    pub content_type: Option<String>,
    /// URL after redirects, for filename heuristics
    pub final_url: String,
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Markup fetcher with a reusable HTTP client
pub struct MarkupFetcher {
    client: reqwest::Client,
}

impl MarkupFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("duplex/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// Fetch a URL and return its text plus transport metadata.
    ///
    /// Non-2xx responses abort the load: a body is never sniffed or parsed
    /// when the server reported failure.
    pub async fn fetch(&self, url: &str) -> Result<FetchedMarkup, NetError> {
        let parsed = Url::parse(url).map_err(|e| NetError::InvalidUrl(e.to_string()))?;
        tracing::info!(%parsed, "HTTP GET");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let final_url = response.url().to_string();
        let text = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(
            bytes = text.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "fetched markup"
        );
        Ok(FetchedMarkup {
            text,
            content_type,
            final_url,
        })
    }
}

impl Default for MarkupFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetError {
    if err.is_timeout() {
        NetError::Timeout
    } else {
        NetError::Transport(err.to_string())
    }
}

/// Fetch a URL with a one-shot client
pub async fn fetch_markup(url: &str) -> Result<FetchedMarkup, NetError> {
    MarkupFetcher::new().fetch(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected_without_io() {
        let err = smol::block_on(fetch_markup("not a url"));
        assert!(matches!(err, Err(NetError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            NetError::HttpStatus { status: 404 }.to_string(),
            "HTTP error: 404"
        );
        assert_eq!(NetError::Timeout.to_string(), "request timed out");
    }
}
