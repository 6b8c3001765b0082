//! HTTP/1.1 request formatting.

use std::collections::HashMap;
use std::io::Write;

use crate::url::HttpUrl;

/// GET request builder.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub target: String,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// GET for `url` with `Host`, `Accept` and `Connection: close` set.
    pub fn get(url: &HttpUrl) -> Self {
        Self {
            target: url.target.clone(),
            headers: HashMap::new(),
        }
        .header("Host", url.authority())
        .header("Accept", "*/*")
        .header("Connection", "close")
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serialize to wire format.
    ///
    /// Format:
    /// ```text
    /// GET TARGET HTTP/1.1\r\n
    /// Header: Value\r\n
    /// ...
    /// \r\n
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();

        // writes into a Vec cannot fail
        let _ = write!(&mut out, "GET {} HTTP/1.1\r\n", self.target);

        // Sorted for consistent output in tests
        let mut sorted_headers: Vec<_> = self.headers.iter().collect();
        sorted_headers.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in sorted_headers {
            let _ = write!(&mut out, "{}: {}\r\n", key, value);
        }

        out.extend_from_slice(b"\r\n");
        out
    }
}
