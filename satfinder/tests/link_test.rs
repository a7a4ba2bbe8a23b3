#![cfg(feature = "driver")]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use satfinder::drivers::{run_session, DishLink};
use satfinder::{ClientConfig, Command, Controller, LinkEvent, LinkState, SatError};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

fn config_for(addr: &str) -> ClientConfig {
    ClientConfig {
        reconnect_delay_ms: 50,
        ..ClientConfig::for_host(addr)
    }
}

async fn next_action(ws: &mut WebSocketStream<TcpStream>) -> Option<String> {
    while let Some(frame) = ws.next().await {
        if let Ok(Message::Text(text)) = frame {
            let value: serde_json::Value = serde_json::from_str(&text).ok()?;
            return value["action"].as_str().map(str::to_string);
        }
    }
    None
}

#[tokio::test]
async fn bootstraps_on_every_open_and_polls_after_messages() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (frames_tx, mut frames_rx) = mpsc::channel::<(usize, String)>(16);

    tokio::spawn(async move {
        for round in 0..2 {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            for _ in 0..2 {
                let action = next_action(&mut ws).await.unwrap();
                frames_tx.send((round, action)).await.unwrap();
            }
            if round == 0 {
                ws.send(Message::Text(r#"{"action":"getvalues","azimut":"12.34","elevation":"5.6"}"#.to_string()))
                    .await
                    .unwrap();
                let poll = next_action(&mut ws).await.unwrap();
                frames_tx.send((round, poll)).await.unwrap();
                ws.close(None).await.unwrap();
            } else {
                // hold the second connection until the test is done
                let _ = next_action(&mut ws).await;
            }
        }
    });

    let config = config_for(&addr);
    let (link, events) = DishLink::spawn(&config).unwrap();
    let (_ui_tx, ui_rx) = mpsc::channel(8);
    let mut controller = Controller::new(config);

    let mut seen = Vec::new();
    let mut azimuths = Vec::new();
    let finished = timeout(Duration::from_secs(10), async {
        tokio::select! {
            _ = run_session(&link, events, ui_rx, &mut controller, |c, _| {
                azimuths.push(c.state().display.azimut.clone());
            }) => {}
            _ = async {
                while let Some(frame) = frames_rx.recv().await {
                    seen.push(frame);
                    if seen.len() == 5 {
                        break;
                    }
                }
            } => {}
        }
    })
    .await;
    assert!(finished.is_ok(), "frames seen before timeout: {:?}", seen);

    let expected: Vec<(usize, String)> = vec![
        (0, "getvalues".into()),
        (0, "getsettings".into()),
        (0, "getvalues".into()),
        (1, "getvalues".into()),
        (1, "getsettings".into()),
    ];
    assert_eq!(seen, expected);
    assert!(azimuths.iter().any(|a| a == "12.3"));
    link.shutdown();
}

#[tokio::test]
async fn send_without_connection_is_dropped() {
    // reserve a port and release it so nothing is listening there
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().to_string()
    };

    let (link, mut events) = DishLink::spawn(&config_for(&addr)).unwrap();
    assert_eq!(link.url(), format!("ws://{}/ws", addr));
    assert!(!link.send(&Command::GetValues).await);

    let first = timeout(Duration::from_secs(5), events.recv()).await.unwrap().unwrap();
    assert_eq!(first, LinkEvent::Connecting);
    let second = timeout(Duration::from_secs(5), events.recv()).await.unwrap().unwrap();
    assert_eq!(second, LinkEvent::Closed);

    assert_ne!(link.state().await, LinkState::Open);
    assert!(!link.send(&Command::GetSettings).await);
    assert!(matches!(link.try_send(&Command::GetValues).await, Err(SatError::LinkClosed)));
    link.shutdown();
}

#[tokio::test]
async fn shutdown_ends_the_event_stream() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let (link, mut events) = DishLink::spawn(&config_for(&addr)).unwrap();
    link.shutdown();

    let drained = timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;
    assert!(drained.is_ok());
    assert_eq!(link.state().await, LinkState::Closed);
}

#[tokio::test]
async fn invalid_config_is_rejected_before_spawning() {
    let config = ClientConfig { host: String::new(), ..ClientConfig::default() };
    assert!(DishLink::spawn(&config).is_err());
}
