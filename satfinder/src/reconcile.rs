//! Application of inbound device payloads to the UI state.

use tracing::{debug, warn};

use crate::packets::DevicePayload;
use crate::state::{AppState, TelemetryDisplay};

/// The state domain a payload was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Telemetry,
    Settings,
    /// Unrecognized tag; nothing was touched.
    Untouched,
}

/// Replaces exactly one domain of `state` with the payload's snapshot.
pub fn reconcile(state: &mut AppState, payload: DevicePayload) -> Domain {
    match payload {
        DevicePayload::Telemetry(telemetry) => {
            state.display = TelemetryDisplay::from(&telemetry);
            for slider in &mut state.sliders {
                slider.show(telemetry.reading(slider.field));
            }
            state.telemetry = telemetry;
            Domain::Telemetry
        }
        DevicePayload::Settings { tag, settings } => {
            debug!("settings snapshot ({:?})", tag);
            state.settings_form = settings.clone();
            state.settings = settings;
            Domain::Settings
        }
        DevicePayload::Unrecognized { action, body } => {
            warn!("ignoring payload with unrecognized action '{}' ({} fields)", action, body.len());
            Domain::Untouched
        }
    }
}
