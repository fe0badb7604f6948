//! Shared JSON-over-HTTP transport.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::ApiError;

/// Characters of a response body kept in log lines.
const LOG_BODY_EXCERPT: usize = 500;

/// Thin wrapper around a `reqwest::Client` rooted at the store API base URL.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// Create a client that sends `headers` with every request.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL cannot carry a path or the HTTP client
    /// fails to build.
    pub fn new(base_url: Url, headers: HeaderMap) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestClientInner { client, base_url }),
        })
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so ids containing `/` cannot escape
    /// their position in the path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Start a request to an endpoint.
    #[must_use]
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.client.request(method, url)
    }

    /// Send a request and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the request fails, `ApiError::Status`
    /// for a non-2xx response, or `ApiError::Decode` if the body does not
    /// match `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send_text(request).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse API response"
            );
            ApiError::Decode(e)
        })
    }

    /// Send a request whose response body is not needed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the request fails or `ApiError::Status`
    /// for a non-2xx response.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send_text(request).await.map(drop)
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn send_text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.inner.client.execute(request).await?;
        let status = response.status();

        // Body as text first so failures can be logged verbatim
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %method,
                %path,
                status = %status,
                body = %excerpt(&body),
                "API returned non-success status"
            );
            return Err(ApiError::from_response(status, &body));
        }

        debug!(%method, %path, status = %status, "API request succeeded");
        Ok(body)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_EXCERPT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> RestClient {
        RestClient::new(Url::parse(base).unwrap(), HeaderMap::new()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let rest = client("https://api.example.com/api");
        let url = rest.endpoint(&["coupons", "apply"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/coupons/apply");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let rest = client("https://api.example.com/api/");
        let url = rest.endpoint(&["products"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/products");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let rest = client("https://api.example.com/api");
        let url = rest.endpoint(&["products", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/products/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            RestClient::new(Url::parse("mailto:a@b.c").unwrap(), HeaderMap::new()),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_excerpt_truncates() {
        assert_eq!(excerpt(&"x".repeat(600)).len(), 500);
    }
}
