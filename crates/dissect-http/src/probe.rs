//! The two Apple TV endpoints the dissector probes.

use std::net::Ipv6Addr;

use dissect_core::{ContentType, HostError};

use crate::url::HttpUrl;

/// Default DAAP (iTunes sharing) port.
pub const DAAP_PORT: u16 = 3689;

/// Default AirPlay port.
pub const AIRPLAY_PORT: u16 = 7000;

/// A probed endpoint and the body format it is expected to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /login?attempt=1` on the DAAP port.
    DaapLogin,
    /// `GET /info` on the AirPlay port.
    AirPlayInfo,
}

impl Endpoint {
    /// Probe order.
    pub const ALL: [Endpoint; 2] = [Endpoint::DaapLogin, Endpoint::AirPlayInfo];

    pub fn expected_content_type(&self) -> ContentType {
        match self {
            Endpoint::DaapLogin => ContentType::DmapTagged,
            Endpoint::AirPlayInfo => ContentType::BinaryPlist,
        }
    }

    pub fn target(&self) -> &'static str {
        match self {
            Endpoint::DaapLogin => "/login?attempt=1",
            Endpoint::AirPlayInfo => "/info",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Endpoint::DaapLogin => DAAP_PORT,
            Endpoint::AirPlayInfo => AIRPLAY_PORT,
        }
    }
}

/// A host to probe, with per-endpoint ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    pub daap_port: u16,
    pub airplay_port: u16,
}

impl ProbeTarget {
    /// Target `host` on the default ports. The host is checked with
    /// [`validate_host`].
    pub fn new(host: &str) -> Result<Self, HostError> {
        Ok(Self {
            host: validate_host(host)?,
            daap_port: DAAP_PORT,
            airplay_port: AIRPLAY_PORT,
        })
    }

    pub fn daap_port(mut self, port: u16) -> Self {
        self.daap_port = port;
        self
    }

    pub fn airplay_port(mut self, port: u16) -> Self {
        self.airplay_port = port;
        self
    }

    pub fn port(&self, endpoint: Endpoint) -> u16 {
        match endpoint {
            Endpoint::DaapLogin => self.daap_port,
            Endpoint::AirPlayInfo => self.airplay_port,
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> HttpUrl {
        HttpUrl::new(self.host.clone(), self.port(endpoint), endpoint.target())
    }
}

/// Check a probe host argument and return it in connectable form.
///
/// Accepts a host name, an IPv4 address or an IPv6 literal (bracketed or
/// not). URLs, paths and `host:port` are rejected; ports come from
/// [`ProbeTarget`] since each endpoint has its own.
pub fn validate_host(host: &str) -> Result<String, HostError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(HostError::MissingHost);
    }
    if host.contains("://") {
        return Err(HostError::UnsupportedScheme(host.to_string()));
    }
    if host
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
        return Err(HostError::InvalidHost(host.to_string()));
    }

    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((literal, "")) => ipv6_literal(literal, host),
            Some((_, after)) if after.starts_with(':') => {
                Err(HostError::UnexpectedPort(host.to_string()))
            }
            _ => Err(HostError::InvalidHost(host.to_string())),
        };
    }

    match host.matches(':').count() {
        0 => Ok(host.to_string()),
        1 => Err(HostError::UnexpectedPort(host.to_string())),
        _ => ipv6_literal(host, host),
    }
}

fn ipv6_literal(literal: &str, original: &str) -> Result<String, HostError> {
    literal
        .parse::<Ipv6Addr>()
        .map(|addr| addr.to_string())
        .map_err(|_| HostError::InvalidHost(original.to_string()))
}
