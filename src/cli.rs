//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dissect_core::HostError;
use dissect_http::{validate_host, BodyDump, FetchConfig, ProbeTarget};

/// Passively dissect the DAAP login and AirPlay info responses of an Apple TV.
#[derive(Debug, Parser)]
#[command(name = "appletv-dissect", version, about)]
pub struct Cli {
    /// Host name or address of the device to probe
    #[arg(required_unless_present = "inspect", value_parser = validate_host)]
    pub host: Option<String>,

    /// Dissect a previously dumped body instead of probing a host
    #[arg(long, value_name = "FILE", conflicts_with = "host", requires = "content_type")]
    pub inspect: Option<PathBuf>,

    /// Content-type label of the --inspect body
    #[arg(long, value_name = "LABEL", requires = "inspect")]
    pub content_type: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Directory for raw body dumps
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not write raw bodies to disk
    #[arg(long)]
    pub no_dump: bool,

    /// User-Agent header sent with each request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// DAAP port
    #[arg(long, default_value_t = dissect_http::Endpoint::DaapLogin.default_port())]
    pub daap_port: u16,

    /// AirPlay port
    #[arg(long, default_value_t = dissect_http::Endpoint::AirPlayInfo.default_port())]
    pub airplay_port: u16,

    /// Report every occurrence of each tag, not only the first
    #[arg(long)]
    pub all_offsets: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn fetch_config(&self) -> FetchConfig {
        let config = FetchConfig::new().timeout(Duration::from_secs(self.timeout));
        match &self.user_agent {
            Some(ua) => config.user_agent(ua.clone()),
            None => config,
        }
    }

    pub fn body_dump(&self) -> BodyDump {
        if self.no_dump {
            BodyDump::disabled()
        } else {
            BodyDump::new(self.out_dir.clone())
        }
    }

    pub fn probe_target(&self) -> Result<Option<ProbeTarget>, HostError> {
        let Some(host) = self.host.as_deref() else {
            return Ok(None);
        };
        let target = ProbeTarget::new(host)?
            .daap_port(self.daap_port)
            .airplay_port(self.airplay_port);
        Ok(Some(target))
    }

    /// Default log filter when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
