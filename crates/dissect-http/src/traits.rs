//! Traits for HTTP transport abstraction.

use async_trait::async_trait;
use dissect_core::Result;

use crate::{HttpResponse, HttpUrl};

/// HTTP transport trait for testability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET and return the complete response.
    async fn get(&self, url: HttpUrl) -> Result<HttpResponse>;

    /// User-Agent sent with every request.
    fn user_agent(&self) -> String;
}
