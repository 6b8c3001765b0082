//! Minimal `http://` URL handling.

use std::fmt;

/// A plain-HTTP target: host, port and request target (path plus query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpUrl {
    pub host: String,
    pub port: u16,
    /// Path and query, always starting with `/`.
    pub target: String,
}

impl HttpUrl {
    pub fn new(host: impl Into<String>, port: u16, target: impl Into<String>) -> Self {
        let target = target.into();
        let target = if target.starts_with('/') {
            target
        } else {
            format!("/{}", target)
        };
        Self {
            host: host.into(),
            port,
            target,
        }
    }

    /// Value for the `Host` header.
    pub fn authority(&self) -> String {
        if self.port == 80 {
            self.bracketed_host()
        } else {
            format!("{}:{}", self.bracketed_host(), self.port)
        }
    }

    fn bracketed_host(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }
}

impl fmt::Display for HttpUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.bracketed_host(), self.port, self.target)
    }
}
