//! Process wiring: config → exporter → HTTP server → signals → shutdown

use std::time::Duration;

use anyhow::Context;
use clap::ArgMatches;
use lastwrite_core::{signal_channels, Error, Exporter, ShutdownCoordinator};
use tokio::net::TcpListener;

use crate::{cli, server};

/// Time allowed for dispatchers, the refresher and the server to stop
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = cli::resolve_config(matches)?;

    let exporter = Exporter::new()?;
    let coordinator = ShutdownCoordinator::new(SHUTDOWN_TIMEOUT);

    let report = match exporter.start(&config, &coordinator).await {
        Ok(report) => report,
        Err(e) => {
            coordinator.shutdown().await;
            return Err(e.into());
        }
    };
    for failure in &report.failed {
        tracing::warn!(
            root = %failure.root,
            "Not monitoring directory: {}",
            failure.reason
        );
    }

    let address = config.web.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            coordinator.shutdown().await;
            return Err(Error::io_error(format!("Failed to listen on {address}: {e}")).into());
        }
    };
    tracing::info!(
        "Serving metrics on http://{address}{}",
        config.web.telemetry_path
    );

    let app = server::router(exporter.registry().clone(), &config.web.telemetry_path);
    let mut server = tokio::spawn(server::serve(listener, app, coordinator.subscribe()));

    let (mut sigint, mut sigterm) = signal_channels()?;

    let server_ended = tokio::select! {
        _ = sigint.recv() => None,
        _ = sigterm.recv() => None,
        joined = &mut server => Some(joined),
    };

    coordinator.shutdown().await;

    let joined = match server_ended {
        Some(joined) => joined,
        None => server.await,
    };
    joined.context("HTTP server task failed")??;
    Ok(())
}
