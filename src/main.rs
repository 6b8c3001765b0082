//! appletv-dissect - passive dissection of Apple TV DAAP and AirPlay responses.

mod cli;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dissect_core::{ContentType, Dissection, FormatDispatcher};
use dissect_http::{BodyDump, Endpoint, Fetcher, HttpConnection, HttpTransport, ProbeTarget};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn setup_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    // stderr keeps stdout free for report lines
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn announce(content_type: ContentType) -> String {
    match content_type {
        ContentType::BinaryPlist => {
            format!("[Info] Found binary plist response -> {}", content_type)
        }
        ContentType::DmapTagged => format!("[Info] Found DMAP tagged response  -> {}", content_type),
    }
}

fn write_dissection(out: &mut impl Write, dissection: &Dissection) -> Result<()> {
    writeln!(out, "{}", announce(dissection.content_type()))?;
    for line in dissection.lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Dissect a body previously written to disk.
async fn inspect(
    out: &mut impl Write,
    path: &Path,
    label: &str,
    dispatcher: &FormatDispatcher,
) -> Result<()> {
    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(bytes = body.len(), "Read {}", path.display());

    if !FormatDispatcher::is_recognized(label) {
        info!("No dissector for content type {:?}", label);
    }
    if let Some(dissection) = dispatcher.dissect_label(label, &body) {
        write_dissection(out, &dissection)?;
    }
    Ok(())
}

/// Fetch, dump and dissect both endpoints of `target`.
///
/// A failed or mismatched endpoint does not stop the next one, and a failed
/// dump does not stop dissection. Errors only when nothing was dissected.
async fn probe<T: HttpTransport>(
    out: &mut impl Write,
    target: &ProbeTarget,
    fetcher: &Fetcher<T>,
    dump: &BodyDump,
    dispatcher: &FormatDispatcher,
) -> Result<()> {
    let mut dissected = 0;

    for endpoint in Endpoint::ALL {
        let result = fetcher.fetch_endpoint(target, endpoint).await;
        if result.is_ok() {
            writeln!(out, "[+] User Agent -> {}", fetcher.user_agent())?;
        }

        let fetched = match result {
            Ok(Some(fetched)) => fetched,
            Ok(None) => continue,
            Err(e) => {
                warn!("Failed to fetch {}: {}", target.url(endpoint), e);
                continue;
            }
        };
        info!(
            status = fetched.status_code,
            bytes = fetched.body.len(),
            "Fetched {}",
            target.url(endpoint)
        );

        if let Err(e) = dump.write(fetched.content_type, &fetched.body).await {
            warn!("{}", e);
        }

        write_dissection(out, &dispatcher.dissect(fetched.content_type, &fetched.body))?;
        dissected += 1;
    }

    if dissected == 0 {
        bail!("no endpoint on {} returned a dissectable response", target.host);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);

    let dispatcher = FormatDispatcher::new().all_offsets(cli.all_offsets);
    let mut stdout = std::io::stdout().lock();

    if let (Some(path), Some(label)) = (&cli.inspect, &cli.content_type) {
        return inspect(&mut stdout, path, label, &dispatcher).await;
    }

    let Some(target) = cli.probe_target()? else {
        bail!("no host given");
    };

    let dump = cli.body_dump();
    if !dump.is_enabled() {
        info!("Raw body dumps disabled");
    }

    info!("Probing {}", target.host);
    let fetcher = Fetcher::new(HttpConnection::new(cli.fetch_config()));
    probe(&mut stdout, &target, &fetcher, &dump, &dispatcher).await
}
