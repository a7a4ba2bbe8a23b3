use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::controller::{Controller, Effect, Event, LinkEvent, UiEvent};

use super::DishLink;

/// Feeds link and UI events into `controller` and performs the resulting
/// effects on `link`, in arrival order, until the link shuts down.
///
/// `observe` runs after every handled event with the updated controller.
/// The UI channel is optional in practice: once all its senders are gone the
/// session keeps running on link events alone.
pub async fn run_session<F>(
    link: &DishLink,
    mut link_events: broadcast::Receiver<LinkEvent>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    controller: &mut Controller,
    mut observe: F,
) where
    F: FnMut(&Controller, &Event),
{
    let mut ui_open = true;
    loop {
        let event = tokio::select! {
            received = link_events.recv() => match received {
                Ok(event) => Event::Link(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("session lagged behind the link, {} events lost", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
            ui = ui_events.recv(), if ui_open => match ui {
                Some(ui) => Event::Ui(ui),
                None => {
                    ui_open = false;
                    continue;
                }
            },
        };

        for effect in controller.handle(event.clone()) {
            match effect {
                Effect::Send(command) => {
                    link.send(&command).await;
                }
                Effect::ScheduleReconnect(delay) => {
                    debug!("link reconnects by itself in {:?}", delay);
                }
            }
        }
        observe(controller, &event);
    }
}
