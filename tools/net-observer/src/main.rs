//! net-observer: passive observer for a simulated blockchain network.
//!
//! Connects to the simulator's WebSocket broadcast, folds every event into
//! a projection of nodes, wallets and chains, and logs a periodic summary.
//! It never sends anything to the network beyond protocol pongs.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to a local simulator (default)
//! net-observer
//!
//! # Start from empty state on every reconnect, print the final view on exit
//! net-observer --on-reconnect reset --dump-json
//! ```

mod app;
mod ws;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use observer_core::{ObserverConfig, ObserverService, ReconnectPolicy};
use observer_telemetry::{init_telemetry, TelemetryConfig};
use tokio::sync::mpsc;
use tracing::info;

use app::App;
use ws::WsClient;

/// Chain network observer
#[derive(Parser, Debug)]
#[command(name = "net-observer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint of the simulator's event broadcast
    #[arg(long, env = "OBSERVER_WS_URL", default_value = "ws://127.0.0.1:3012")]
    ws_url: String,

    /// Envelopes kept in the event log (0 = unbounded)
    #[arg(long, env = "OBSERVER_EVENT_LOG_CAPACITY", default_value_t = 10_000)]
    event_log_capacity: usize,

    /// What to do with observed state on reconnect (continue | reset)
    #[arg(long, env = "OBSERVER_ON_RECONNECT", default_value = "continue")]
    on_reconnect: ReconnectPolicy,

    /// Seconds between summary log lines
    #[arg(
        long,
        env = "OBSERVER_SUMMARY_INTERVAL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    summary_interval_secs: u64,

    /// Print the final projection as JSON on exit
    #[arg(long, env = "OBSERVER_DUMP_JSON")]
    dump_json: bool,
}

impl Args {
    fn observer_config(&self) -> ObserverConfig {
        ObserverConfig {
            event_log_capacity: self.event_log_capacity,
            reconnect_policy: self.on_reconnect,
            ..ObserverConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_telemetry(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let service = Arc::new(ObserverService::new(args.observer_config()));
    let mut app = App::new(service);

    // Create transport event channel
    let (ws_tx, ws_rx) = mpsc::channel(1024);

    // Start WebSocket client
    let mut ws_client = WsClient::new(args.ws_url.clone(), ws_tx);
    ws_client.start()?;
    info!(url = %args.ws_url, policy = ?args.on_reconnect, "Observer started");

    run(
        &mut app,
        ws_rx,
        Duration::from_secs(args.summary_interval_secs),
    )
    .await;

    // Cleanup WebSocket
    ws_client.stop().await;

    app.log_summary();
    if args.dump_json {
        let snapshot = app.observer().snapshot();
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize projection")?;
        println!("{json}");
    }

    Ok(())
}

/// Main loop: apply transport events until Ctrl-C or the transport gives up.
async fn run(app: &mut App, mut ws_rx: mpsc::Receiver<ws::TransportEvent>, summary_every: Duration) {
    let mut summary_tick = tokio::time::interval(summary_every);
    summary_tick.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = ws_rx.recv() => match event {
                Some(event) => app.handle_transport_event(event),
                None => {
                    info!("Transport stopped");
                    break;
                }
            },
            _ = summary_tick.tick() => {
                app.log_summary();
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
        }
    }
}
