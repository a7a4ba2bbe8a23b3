use std::time::Duration;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use satfinder::codec;
use satfinder::state::AppState;
use satfinder::{ClientConfig, Command, Controller, Effect, Event, LinkEvent, UiEvent, DEFAULT_DEVICE_HOST};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Socket event handlers, built once and attached to every new socket.
struct Callbacks {
    onopen: Closure<dyn FnMut(JsValue)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(CloseEvent)>,
}

impl Callbacks {
    fn new(manager: DishConnection) -> Self {
        let onopen = Closure::wrap(Box::new(move |_| {
            log::info!("WebSocket connected");
            manager.handle(Event::Link(LinkEvent::Opened));
        }) as Box<dyn FnMut(JsValue)>);

        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| match e.data().as_string() {
            Some(text) => manager.handle(Event::Link(LinkEvent::Message(text))),
            None => log::warn!("Ignoring non-text WebSocket frame"),
        }) as Box<dyn FnMut(MessageEvent)>);

        let onerror = Closure::wrap(Box::new(move |e: ErrorEvent| {
            log::error!("WebSocket error: {:?}", e.message());
        }) as Box<dyn FnMut(ErrorEvent)>);

        // close always follows a failed connect, so reconnects hang off this alone
        let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
            log::warn!("WebSocket closed: code={}, reason={}", e.code(), e.reason());
            manager.ws.set_value(None);
            manager.handle(Event::Link(LinkEvent::Closed));
        }) as Box<dyn FnMut(CloseEvent)>);

        Self { onopen, onmessage, onerror, onclose }
    }

    fn attach(&self, ws: &WebSocket) {
        ws.set_onopen(Some(self.onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(self.onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(self.onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(self.onclose.as_ref().unchecked_ref()));
    }
}

// ========== Dish Connection ==========

/// Browser side of the device link.
///
/// Owns the application controller in a signal so components re-render from
/// its state, and carries out the controller's effects on the browser
/// `WebSocket`. Copyable; every component gets it from context.
#[derive(Clone, Copy)]
pub struct DishConnection {
    controller: RwSignal<Controller>,
    ws: StoredValue<Option<WebSocket>, LocalStorage>,
    callbacks: StoredValue<Option<Callbacks>, LocalStorage>,
}

impl DishConnection {
    pub fn new() -> Self {
        let host = window()
            .location()
            .hostname()
            .ok()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_HOST.to_string());
        let config = ClientConfig::for_host(&host);
        if let Err(e) = config.validate() {
            log::error!("Invalid client configuration: {}", e);
        }

        let manager = Self {
            controller: RwSignal::new(Controller::new(config)),
            ws: StoredValue::new_local(None),
            callbacks: StoredValue::new_local(None),
        };
        manager.callbacks.set_value(Some(Callbacks::new(manager)));
        manager.connect();
        manager
    }

    /// Reads the application state, tracking it reactively.
    pub fn with_state<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        self.controller.with(|c| f(c.state()))
    }

    /// Feeds a UI event to the controller.
    pub fn ui(&self, event: UiEvent) {
        self.handle(Event::Ui(event));
    }

    fn handle(&self, event: Event) {
        let effects = self.controller.try_update(|c| c.handle(event)).unwrap_or_default();
        for effect in effects {
            match effect {
                Effect::Send(command) => self.write(&command),
                Effect::ScheduleReconnect(delay) => self.schedule_reconnect(delay),
            }
        }
    }

    fn write(&self, command: &Command) {
        let text = match codec::encode(command) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to encode '{}': {}", command.action(), e);
                return;
            }
        };
        self.ws.with_value(|ws| match ws {
            Some(ws) if ws.ready_state() == WebSocket::OPEN => {
                if let Err(e) = ws.send_with_str(&text) {
                    log::warn!("WebSocket send failed: {:?}", e);
                }
            }
            _ => log::debug!("WebSocket not open, dropping '{}'", command.action()),
        });
    }

    fn schedule_reconnect(&self, delay: Duration) {
        let manager = *self;
        set_timeout(move || manager.connect(), delay);
    }

    fn connect(&self) {
        let url = self.controller.with_untracked(|c| c.config().gateway_url());
        log::info!("Connecting to {}", url);
        self.handle(Event::Link(LinkEvent::Connecting));

        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("Failed to create WebSocket: {:?}", e);
                self.handle(Event::Link(LinkEvent::Closed));
                return;
            }
        };

        self.callbacks.with_value(|callbacks| match callbacks {
            Some(callbacks) => callbacks.attach(&ws),
            None => log::error!("WebSocket handlers missing, socket to {} will stay silent", url),
        });
        self.ws.set_value(Some(ws));
    }
}
