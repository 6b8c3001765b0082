//! # dissect-http
//!
//! Thin I/O around `dissect-core`: plain HTTP retrieval of the Apple TV
//! DAAP login and AirPlay info endpoints, and raw body persistence.
//!
//! This crate provides:
//! - `http://` URL parsing and the two probe endpoints
//! - HTTP/1.1 GET request formatting and response parsing
//! - A tokio TCP connection with full-length body reads
//! - Content-type gated fetching, mockable through [`HttpTransport`]
//! - Verbatim body dumps to fixed file names

mod config;
mod connection;
mod dump;
mod fetcher;
mod probe;
mod request;
mod response;
mod traits;
mod url;

pub use config::FetchConfig;
pub use connection::HttpConnection;
pub use dump::BodyDump;
pub use fetcher::{FetchedBody, Fetcher};
pub use probe::{validate_host, Endpoint, ProbeTarget};
pub use request::HttpRequest;
pub use response::{decode_chunked, HttpResponse};
pub use traits::HttpTransport;
pub use url::HttpUrl;
