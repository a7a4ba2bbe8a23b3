//! State synchronization between a dish positioner UI and the SatFinder
//! device over a single WebSocket.
//!
//! Two independent state domains travel over the one connection: live
//! telemetry (`getvalues`) and persisted settings (`getsettings` /
//! `savesettings`). The [`controller::Controller`] keeps them apart, turns UI
//! triggers into [`packets::Command`]s and tells its host transport when to
//! send and when to reconnect.
//!
//! The crate is platform neutral; the `driver` feature adds a native tokio
//! transport in [`drivers`].

mod errors;
pub use errors::*;

pub mod packets;
pub mod codec;

mod config;
pub use config::*;

pub mod state;
pub mod overlay;
pub mod dispatch;
pub mod reconcile;
pub mod controller;

#[cfg(feature = "driver")]
pub mod drivers;

pub use controller::{Controller, Effect, Event, LinkEvent, UiEvent};
pub use dispatch::{Dispatch, Trigger};
pub use overlay::{Overlay, Visibility};
pub use packets::{Command, DevicePayload, FieldValue};
pub use reconcile::Domain;
pub use state::{AppState, LinkState};
