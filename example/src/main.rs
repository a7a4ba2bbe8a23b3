// Console client for the SatFinder dish positioner.
// Run with: cargo run -p example
// Make sure the simulator is running: cargo run -p sim

mod console;
mod report;

use std::error::Error;

use console::{parse_line, print_help, Input};
use report::Reporter;
use satfinder::drivers::{run_session, DishLink};
use satfinder::{ClientConfig, Controller};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("SATFINDER_HOST").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let config = ClientConfig::for_host(&host);

    println!("=== SatFinder Console Client ===");
    println!("Connecting to {}...", config.gateway_url());
    let (link, link_events) = DishLink::spawn(&config)?;
    let mut controller = Controller::new(config);

    let (ui_tx, ui_rx) = mpsc::channel(32);
    let (quit_tx, quit_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        print_help();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("stdin: {}", e);
                    break;
                }
            };
            match parse_line(&line) {
                Ok(Some(Input::Ui(event))) => {
                    if ui_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(Some(Input::Help)) => print_help(),
                Ok(Some(Input::Quit)) => break,
                Ok(None) => {}
                Err(message) => println!("{}", message),
            }
        }
        let _ = quit_tx.send(());
    });

    let mut reporter = Reporter::default();
    tokio::select! {
        _ = run_session(&link, link_events, ui_rx, &mut controller, |c, e| reporter.print(c, e)) => {}
        _ = quit_rx => {
            info!("shutting down");
            link.shutdown();
        }
    }

    println!("Disconnected.");
    Ok(())
}
