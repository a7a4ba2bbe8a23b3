use std::fmt;

use crate::config::ClientConfig;
use crate::overlay::OverlayState;
use crate::packets::{format_reading, FieldValue, SettingsSnapshot, TelemetryField, TelemetrySnapshot};

/// Lifecycle of the single device connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    Connecting,
    Open,
    #[default]
    Closed,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Connecting => write!(f, "connecting"),
            LinkState::Open => write!(f, "open"),
            LinkState::Closed => write!(f, "closed"),
        }
    }
}

/// Text shown for each telemetry readout.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryDisplay {
    pub led_level: String,
    pub state: String,
    pub azimut: String,
    pub elevation: String,
    pub s_azimut: String,
    pub s_elevation: String,
}

impl Default for TelemetryDisplay {
    fn default() -> Self {
        Self::from(&TelemetrySnapshot::default())
    }
}

impl From<&TelemetrySnapshot> for TelemetryDisplay {
    fn from(t: &TelemetrySnapshot) -> Self {
        Self {
            led_level: format_reading(t.led_level),
            state: t.state.clone(),
            azimut: format_reading(t.azimut),
            elevation: format_reading(t.elevation),
            s_azimut: format_reading(t.s_azimut),
            s_elevation: format_reading(t.s_elevation),
        }
    }
}

/// A range input and the label next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderControl {
    pub input_id: String,
    pub output_id: String,
    pub field: TelemetryField,
    pub position: Option<f64>,
    pub label: String,
}

impl SliderControl {
    pub fn show(&mut self, reading: Option<f64>) {
        self.position = reading;
        self.label = format_reading(reading);
    }
}

/// The manual-control form (`om_time`, `om_speed`, `om_steps`).
#[derive(Debug, Clone, PartialEq)]
pub struct ManualForm {
    pub time: FieldValue,
    pub speed: FieldValue,
    pub steps: String,
}

impl Default for ManualForm {
    fn default() -> Self {
        Self {
            time: FieldValue::from("1"),
            speed: FieldValue::from("700"),
            steps: "short".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Time,
    Speed,
    Steps,
}

/// Everything the UI renders. Owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub link: LinkState,
    pub telemetry: TelemetrySnapshot,
    pub display: TelemetryDisplay,
    /// Last settings snapshot the device reported.
    pub settings: SettingsSnapshot,
    /// Editable settings form, reset from each settings snapshot.
    pub settings_form: SettingsSnapshot,
    pub manual: ManualForm,
    pub sliders: Vec<SliderControl>,
    pub overlays: OverlayState,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        let sliders = config
            .sliders
            .iter()
            .map(|b| SliderControl {
                input_id: b.input_id.clone(),
                output_id: b.output_id.clone(),
                field: b.field,
                position: None,
                label: format_reading(None),
            })
            .collect();
        Self {
            link: LinkState::Closed,
            telemetry: TelemetrySnapshot::default(),
            display: TelemetryDisplay::default(),
            settings: SettingsSnapshot::default(),
            settings_form: SettingsSnapshot::default(),
            manual: ManualForm::default(),
            sliders,
            overlays: OverlayState::default(),
        }
    }

    pub fn slider(&self, input_id: &str) -> Option<&SliderControl> {
        self.sliders.iter().find(|s| s.input_id == input_id)
    }

    pub fn slider_mut(&mut self, input_id: &str) -> Option<&mut SliderControl> {
        self.sliders.iter_mut().find(|s| s.input_id == input_id)
    }

    pub fn edit_manual(&mut self, field: ManualField, value: FieldValue) {
        match field {
            ManualField::Time => self.manual.time = value,
            ManualField::Speed => self.manual.speed = value,
            ManualField::Steps => self.manual.steps = value.to_string(),
        }
    }
}
