//! The application controller.
//!
//! [`Controller`] owns the single [`AppState`] and is the only place where
//! link events, UI events, the dispatcher and the reconciler meet. It never
//! touches a socket: it returns [`Effect`]s that the hosting transport
//! (browser `WebSocket` or the native driver) carries out.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::codec;
use crate::config::ClientConfig;
use crate::dispatch::{dispatch, Dispatch, Trigger};
use crate::overlay::Overlay;
use crate::packets::{Command, FieldValue, SettingsField};
use crate::reconcile::reconcile;
use crate::state::{AppState, LinkState, ManualField};

/// Lifecycle and traffic of the device connection.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    Connecting,
    Opened,
    Closed,
    /// One inbound text frame.
    Message(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Trigger(Trigger),
    /// A click reached an overlay container; `target_id` is the element the
    /// click started on.
    OverlayClicked { overlay: Overlay, target_id: String },
    /// Click on an element tagged to toggle one or more overlays.
    ToggleOverlays(Vec<Overlay>),
    SettingsEdited { field: SettingsField, value: FieldValue },
    ManualEdited { field: ManualField, value: FieldValue },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Link(LinkEvent),
    Ui(UiEvent),
}

/// Work the host transport must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write this command on the open connection.
    Send(Command),
    /// Open a brand-new connection after the delay.
    ScheduleReconnect(Duration),
}

#[derive(Debug, Clone)]
pub struct Controller {
    config: ClientConfig,
    state: AppState,
}

impl Controller {
    pub fn new(config: ClientConfig) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::Link(link) => self.on_link(link, &mut effects),
            Event::Ui(ui) => self.on_ui(ui, &mut effects),
        }
        effects
    }

    fn on_link(&mut self, event: LinkEvent, effects: &mut Vec<Effect>) {
        match event {
            LinkEvent::Connecting => {
                info!("connecting to {}", self.config.gateway_url());
                self.state.link = LinkState::Connecting;
            }
            LinkEvent::Opened => {
                info!("connection open");
                self.state.link = LinkState::Open;
                self.send(Command::GetValues, effects);
                self.send(Command::GetSettings, effects);
            }
            LinkEvent::Closed => {
                let delay = self.config.reconnect_delay();
                warn!("connection closed, reconnecting in {:?}", delay);
                self.state.link = LinkState::Closed;
                effects.push(Effect::ScheduleReconnect(delay));
            }
            LinkEvent::Message(text) => self.on_message(&text, effects),
        }
    }

    fn on_message(&mut self, text: &str, effects: &mut Vec<Effect>) {
        let payload = match codec::decode(text) {
            Ok(payload) => payload,
            Err(e) => {
                error!("dropping inbound message: {} ({})", e, text);
                return;
            }
        };
        debug!("message: {:?}", payload.action());
        let domain = reconcile(&mut self.state, payload);
        debug!("applied to {:?}", domain);
        if self.config.poll_after_message {
            self.send(Command::GetValues, effects);
        }
    }

    fn on_ui(&mut self, event: UiEvent, effects: &mut Vec<Effect>) {
        match event {
            UiEvent::Trigger(trigger) => match dispatch(&mut self.state, &self.config, trigger) {
                Dispatch::Send(command) => self.send(command, effects),
                Dispatch::Unimplemented(id) => info!("'{}' is not implemented on the device", id),
            },
            UiEvent::OverlayClicked { overlay, target_id } => {
                self.state.overlays.container_clicked(overlay, &target_id);
            }
            UiEvent::ToggleOverlays(overlays) => self.state.overlays.toggle_tagged(&overlays),
            UiEvent::SettingsEdited { field, value } => self.state.settings_form.set(field, value),
            UiEvent::ManualEdited { field, value } => self.state.edit_manual(field, value),
        }
    }

    /// Queues a send, or drops the command when the link is not open.
    fn send(&self, command: Command, effects: &mut Vec<Effect>) {
        if self.state.link != LinkState::Open {
            debug!("link {}, dropping '{}'", self.state.link, command.action());
            return;
        }
        effects.push(Effect::Send(command));
    }
}
