//! WebSocket client that forwards the simulator's text frames in order.
//!
//! The client never interprets frames. Each text frame becomes one
//! `TransportEvent::Message`; binary frames are dropped.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Events produced by the transport, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established; a new epoch begins.
    Connected,
    /// One raw text frame.
    Message(String),
    /// Connection lost or closed by the peer.
    Disconnected,
    /// Error occurred.
    Error(String),
}

/// Maximum consecutive reconnection attempts before giving up.
const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Base delay between reconnection attempts (exponential backoff).
const RECONNECT_BASE_DELAY_SECS: u64 = 2;

/// Maximum delay between reconnection attempts.
const MAX_RECONNECT_DELAY_SECS: u64 = 60;

/// How a single connection ended.
enum SessionEnd {
    /// Peer closed or the stream ended.
    Closed,
    /// Local shutdown requested.
    Shutdown,
}

/// WebSocket client for the event broadcast.
pub struct WsClient {
    ws_url: String,
    event_tx: Option<mpsc::Sender<TransportEvent>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl WsClient {
    /// Create a new WebSocket client.
    pub fn new(ws_url: String, event_tx: mpsc::Sender<TransportEvent>) -> Self {
        Self {
            ws_url,
            event_tx: Some(event_tx),
            shutdown_tx: None,
        }
    }

    /// Spawn the connection loop.
    ///
    /// The event sender moves into the loop, so the receiving side sees the
    /// channel close once the loop gives up or is stopped.
    pub fn start(&mut self) -> Result<()> {
        let event_tx = self
            .event_tx
            .take()
            .context("WebSocket client already started")?;
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        tokio::spawn(Self::connection_loop(
            self.ws_url.clone(),
            event_tx,
            shutdown_rx,
        ));

        Ok(())
    }

    /// Connection loop with reconnection logic.
    async fn connection_loop(
        ws_url: String,
        event_tx: mpsc::Sender<TransportEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut reconnect_attempts = 0u32;

        loop {
            match Self::run_connection(&ws_url, &event_tx, &mut shutdown_rx, &mut reconnect_attempts)
                .await
            {
                Ok(SessionEnd::Shutdown) => break,
                Ok(SessionEnd::Closed) => {
                    info!(url = %ws_url, "WebSocket closed by peer");
                    if event_tx.send(TransportEvent::Disconnected).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(url = %ws_url, error = %e, "WebSocket connection failed");
                    let _ = event_tx.send(TransportEvent::Error(e.to_string())).await;
                    if event_tx.send(TransportEvent::Disconnected).await.is_err() {
                        break;
                    }
                }
            }

            reconnect_attempts += 1;
            if !Self::should_retry(reconnect_attempts, &event_tx).await {
                break;
            }

            let delay_secs = Self::calculate_backoff_delay(reconnect_attempts);
            debug!(attempt = reconnect_attempts, delay_secs, "Reconnecting");

            tokio::select! {
                _ = tokio::time::sleep(std::time::Duration::from_secs(delay_secs)) => {}
                _ = shutdown_rx.recv() => break,
            }
        }
    }

    /// Check if we should retry connection.
    async fn should_retry(attempts: u32, event_tx: &mpsc::Sender<TransportEvent>) -> bool {
        if attempts >= MAX_RECONNECT_ATTEMPTS {
            let msg = format!(
                "WebSocket reconnection failed after {} attempts",
                MAX_RECONNECT_ATTEMPTS
            );
            let _ = event_tx.send(TransportEvent::Error(msg)).await;
            return false;
        }
        true
    }

    /// Calculate exponential backoff delay.
    fn calculate_backoff_delay(attempts: u32) -> u64 {
        std::cmp::min(
            RECONNECT_BASE_DELAY_SECS.saturating_mul(1 << attempts.min(6)),
            MAX_RECONNECT_DELAY_SECS,
        )
    }

    /// Run a single WebSocket connection until it ends.
    async fn run_connection(
        ws_url: &str,
        event_tx: &mpsc::Sender<TransportEvent>,
        shutdown_rx: &mut mpsc::Receiver<()>,
        reconnect_attempts: &mut u32,
    ) -> Result<SessionEnd> {
        let (ws_stream, _) = tokio::select! {
            res = connect_async(ws_url) => res.context("Failed to connect to WebSocket")?,
            _ = shutdown_rx.recv() => return Ok(SessionEnd::Shutdown),
        };

        info!(url = %ws_url, "WebSocket connected");
        *reconnect_attempts = 0;
        if event_tx.send(TransportEvent::Connected).await.is_err() {
            return Ok(SessionEnd::Shutdown);
        }

        let (mut write, mut read) = ws_stream.split();

        loop {
            let msg = tokio::select! {
                msg = read.next() => msg,
                _ = shutdown_rx.recv() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(SessionEnd::Shutdown);
                }
            };

            match msg {
                Some(Ok(Message::Text(text))) => {
                    let frame = TransportEvent::Message(text.as_str().to_owned());
                    if event_tx.send(frame).await.is_err() {
                        return Ok(SessionEnd::Shutdown);
                    }
                }
                Some(Ok(Message::Ping(data))) => {
                    let _ = write.send(Message::Pong(data)).await;
                }
                Some(Ok(Message::Close(_))) | None => return Ok(SessionEnd::Closed),
                Some(Ok(Message::Binary(data))) => {
                    debug!(len = data.len(), "Ignoring binary frame");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("WebSocket read failed"),
            }
        }
    }

    /// Stop the WebSocket connection.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }
}
