mod cli;
mod console;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use ledger_app::Session;
use ledger_client::{HttpAssetClient, ServiceConfig};
use ledger_export::{Exporter, LazyCodec, XlsxCodecLoader};
use tracing_subscriber::EnvFilter;

use crate::{cli::LedgerCli, console::Console};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let LedgerCli {
        api_url,
        request_timeout_secs,
        status_ttl_secs,
        export_dir,
    } = LedgerCli::parse();

    init_tracing();

    let mut config = ServiceConfig::new(&api_url)?;
    if let Some(secs) = request_timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    tracing::info!(base_url = %config.base_url(), "Starting ledger console");

    let client = HttpAssetClient::new(config)?;
    let exporter = Exporter::new(LazyCodec::new(Arc::new(XlsxCodecLoader)), export_dir);
    let session = Session::new(
        Arc::new(client),
        exporter,
        Duration::from_secs(status_ttl_secs),
    );

    Console::new(session).run().await
}

/// Logs go to stderr so they do not interleave with the screen on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
