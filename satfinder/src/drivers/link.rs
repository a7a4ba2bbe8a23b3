use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::ClientConfig;
use crate::controller::LinkEvent;
use crate::packets::Command;
use crate::state::LinkState;
use crate::SatError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum PumpExit {
    Closed,
    Shutdown,
}

/// Native WebSocket link to the dish device.
///
/// A supervisor task owns the socket. It connects, pumps frames until the
/// connection closes, waits the configured reconnect delay and connects again,
/// forever, until [`DishLink::shutdown`] is called or the link is dropped.
/// Every lifecycle transition is published as a [`LinkEvent`].
///
/// Commands sent while no connection is open are dropped, never queued.
pub struct DishLink {
    url: String,
    outbound: mpsc::Sender<String>,
    state: Arc<Mutex<LinkState>>,
    shutdown: watch::Sender<bool>,
}

impl DishLink {
    /// Starts the supervisor and returns the link together with the receiver
    /// of its lifecycle events. The receiver is created before the first
    /// connection attempt, so no event is missed.
    pub fn spawn(config: &ClientConfig) -> Result<(DishLink, broadcast::Receiver<LinkEvent>), SatError> {
        config.validate()?;
        let url = config.gateway_url();

        let (events_tx, events_rx) = broadcast::channel(256);
        let (outbound_tx, outbound_rx) = mpsc::channel::<String>(64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = Arc::new(Mutex::new(LinkState::Closed));

        tokio::spawn(supervise(
            url.clone(),
            config.reconnect_delay(),
            events_tx,
            outbound_rx,
            Arc::clone(&state),
            shutdown_rx,
        ));

        let link = DishLink {
            url,
            outbound: outbound_tx,
            state,
            shutdown: shutdown_tx,
        };
        Ok((link, events_rx))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn state(&self) -> LinkState {
        *self.state.lock().await
    }

    /// Encodes and queues a command for the open connection.
    ///
    /// Fails with [`SatError::LinkClosed`] when no connection is open; the
    /// command is dropped, never queued for a later connection.
    pub async fn try_send(&self, command: &Command) -> Result<(), SatError> {
        let state = *self.state.lock().await;
        if state != LinkState::Open {
            return Err(SatError::LinkClosed);
        }
        let text = codec::encode(command)?;
        self.outbound
            .send(text)
            .await
            .map_err(|_| SatError::Transport("link supervisor has stopped".to_string()))
    }

    /// Fire-and-forget variant of [`DishLink::try_send`]. Returns whether the
    /// command was queued.
    pub async fn send(&self, command: &Command) -> bool {
        match self.try_send(command).await {
            Ok(()) => true,
            Err(SatError::LinkClosed) => {
                debug!("link not open, dropping '{}'", command.action());
                false
            }
            Err(e) => {
                warn!("could not send '{}': {}", command.action(), e);
                false
            }
        }
    }

    /// Stops reconnecting and closes the current connection, if any.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

async fn set_state(
    state: &Mutex<LinkState>,
    events: &broadcast::Sender<LinkEvent>,
    next: LinkState,
    event: LinkEvent,
) {
    *state.lock().await = next;
    let _ = events.send(event);
}

async fn supervise(
    url: String,
    delay: Duration,
    events: broadcast::Sender<LinkEvent>,
    mut outbound: mpsc::Receiver<String>,
    state: Arc<Mutex<LinkState>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        set_state(&state, &events, LinkState::Connecting, LinkEvent::Connecting).await;

        let attempt = tokio::select! {
            attempt = connect_async(url.as_str()) => attempt,
            _ = shutdown.changed() => break,
        };
        match attempt {
            Ok((socket, _)) => {
                // anything left over from the previous connection is stale
                while outbound.try_recv().is_ok() {}
                info!("connected to {}", url);
                set_state(&state, &events, LinkState::Open, LinkEvent::Opened).await;
                if let PumpExit::Shutdown = pump(socket, &events, &mut outbound, &mut shutdown).await {
                    break;
                }
            }
            Err(e) => warn!("connection to {} failed: {}", url, e),
        }

        set_state(&state, &events, LinkState::Closed, LinkEvent::Closed).await;
        tokio::select! {
            _ = sleep(delay) => {}
            _ = shutdown.changed() => break,
        }
    }
    *state.lock().await = LinkState::Closed;
    info!("link to {} shut down", url);
}

async fn pump(
    socket: Socket,
    events: &broadcast::Sender<LinkEvent>,
    outbound: &mut mpsc::Receiver<String>,
    shutdown: &mut watch::Receiver<bool>,
) -> PumpExit {
    let (mut write, mut read) = socket.split();
    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(LinkEvent::Message(text));
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!("close frame: {:?}", frame);
                    return PumpExit::Closed;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("read failed: {}", e);
                    return PumpExit::Closed;
                }
                None => return PumpExit::Closed,
            },
            text = outbound.recv() => match text {
                Some(text) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        warn!("write failed: {}", e);
                        return PumpExit::Closed;
                    }
                }
                None => return PumpExit::Shutdown,
            },
            _ = shutdown.changed() => {
                let _ = write.send(Message::Close(None)).await;
                return PumpExit::Shutdown;
            }
        }
    }
}
