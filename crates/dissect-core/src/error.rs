//! Error types for fetching and persisting response bodies.
//!
//! Dissection itself never fails: short headers, absent tags and unknown
//! content types are all reported as values. These errors belong to the I/O
//! around it.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for fetch operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Operation timed out")]
    Timeout,
}

/// Errors while exchanging a plain HTTP request/response.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Body truncated: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: usize, actual: usize },

    #[error("Invalid chunked encoding: {0}")]
    InvalidChunk(String),

    #[error("Body exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Errors validating a probe host argument.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HostError {
    #[error("Expected a bare host, not a URL: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host")]
    MissingHost,

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Host must not carry a port (use --daap-port/--airplay-port): {0}")]
    UnexpectedPort(String),
}

/// Errors writing a raw body to disk.
#[derive(Error, Debug)]
#[error("failed to write {}: {source}", .path.display())]
pub struct DumpError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
