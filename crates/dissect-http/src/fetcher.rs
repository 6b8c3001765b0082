//! Content-type gated retrieval of response bodies.

use dissect_core::{ContentType, Result};

use crate::probe::{Endpoint, ProbeTarget};
use crate::traits::HttpTransport;
use crate::url::HttpUrl;

/// A body whose declared content type matched what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub content_type: ContentType,
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// Fetches bodies and hands over only those with the expected content type.
pub struct Fetcher<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// GET `url`; returns `None` when the response does not declare
    /// `expected` as its content type.
    ///
    /// The status code is not checked: a DAAP server reports login failures
    /// inside a DMAP body that is still worth dissecting.
    pub async fn fetch(&self, url: HttpUrl, expected: ContentType) -> Result<Option<FetchedBody>> {
        tracing::info!("Fetching {}", url);
        let response = self.transport.get(url.clone()).await?;

        let Some(declared) = response.content_type_header() else {
            tracing::warn!(
                "No content-type in response from {} (status {})",
                url,
                response.status_code
            );
            return Ok(None);
        };

        if ContentType::from_header(declared) != Some(expected) {
            tracing::warn!(
                "Content-type mismatch from {}: got {:?}, expected {} (status {})",
                url,
                declared,
                expected,
                response.status_code
            );
            return Ok(None);
        }

        Ok(Some(FetchedBody {
            content_type: expected,
            status_code: response.status_code,
            body: response.body,
        }))
    }

    /// User-Agent the transport announces.
    pub fn user_agent(&self) -> String {
        self.transport.user_agent()
    }

    /// Fetch one of the probe endpoints of `target`.
    pub async fn fetch_endpoint(
        &self,
        target: &ProbeTarget,
        endpoint: Endpoint,
    ) -> Result<Option<FetchedBody>> {
        self.fetch(target.url(endpoint), endpoint.expected_content_type())
            .await
    }
}
