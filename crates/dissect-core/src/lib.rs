//! # dissect-core
//!
//! Passive dissection of the response bodies an Apple TV exposes over plain
//! HTTP, shared by the fetcher and the command-line front end.
//!
//! This crate provides:
//! - Exact byte-sequence scanning
//! - The DMAP tag catalog with rendered report messages
//! - Binary plist magic header validation
//! - Content-type driven dispatch to the right dissection strategy
//! - Common error types for the I/O shim

pub mod content_type;
pub mod dispatch;
pub mod error;
pub mod header;
pub mod scanner;
pub mod tag;

pub use content_type::ContentType;
pub use dispatch::{Dissection, FormatDispatcher, Strategy, TagHit};
pub use error::{DumpError, Error, HostError, HttpError, Result};
pub use header::{HeaderVerdict, BPLIST_MAGIC};
pub use tag::{DmapTag, Severity, TagCode, TagDescriptor};
