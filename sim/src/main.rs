use std::error::Error;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use satfinder::codec::{decode_command, encode_payload};
use satfinder::GATEWAY_PATH;
use sim::{DeviceState, SimConfig};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::time::interval;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// Accepts the upgrade only on the gateway path.
fn gateway_only(request: &Request, response: Response) -> Result<Response, ErrorResponse> {
    if request.uri().path() == GATEWAY_PATH {
        return Ok(response);
    }
    warn!("rejecting upgrade on {}", request.uri().path());
    let mut rejection = ErrorResponse::new(Some(format!("no WebSocket endpoint at {}", request.uri().path())));
    *rejection.status_mut() = StatusCode::NOT_FOUND;
    Err(rejection)
}

async fn handle_client(stream: TcpStream, device: Arc<Mutex<DeviceState>>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let ws = accept_hdr_async(stream, gateway_only).await?;
    let (mut write, mut read) = ws.split();

    while let Some(frame) = read.next().await {
        let text = match frame? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let command = match decode_command(&text) {
            Ok(command) => command,
            Err(e) => {
                warn!("dropping frame: {} ({})", e, text);
                continue;
            }
        };
        debug!("<- {}", command.action());

        let reply = device.lock().await.apply(&command);
        if let Some(payload) = reply {
            write.send(Message::Text(encode_payload(&payload)?)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let config = SimConfig::from_env()?;
    let device = Arc::new(Mutex::new(DeviceState::default()));

    let ticker = Arc::clone(&device);
    let tick = config.tick;
    tokio::spawn(async move {
        let mut timer = interval(tick);
        loop {
            timer.tick().await;
            ticker.lock().await.tick();
        }
    });

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("SatFinder simulator listening on ws://{}{}", config.bind_addr(), GATEWAY_PATH);
    info!("   Environment: SIM_PORT={}", config.port);

    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("New connection from {}", addr);
        let device = Arc::clone(&device);
        tokio::spawn(async move {
            match handle_client(stream, device).await {
                Ok(()) => info!("{} disconnected", addr),
                Err(e) => warn!("{} dropped: {}", addr, e),
            }
        });
    }
}
