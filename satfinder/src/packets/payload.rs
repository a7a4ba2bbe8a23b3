use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value::{lenient_f64, lenient_text};
use super::{FieldValue, GET_SETTINGS, GET_VALUES, SAVE_SETTINGS};

/// Live device state reported in `getvalues` replies.
///
/// Numeric fields accept JSON numbers or numeric strings; anything the device
/// omits or sends unparsable stays `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub led_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub azimut: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Satellite azimuth the dish should point at.
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub s_azimut: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub s_elevation: Option<f64>,
    /// Dial (slider) azimuth target.
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub d_azimut: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub d_elevation: Option<f64>,
    /// Rotor step counter.
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub rotor: Option<f64>,
}

/// Numeric telemetry fields a slider can be bound to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryField {
    LedLevel,
    Azimut,
    Elevation,
    SAzimut,
    SElevation,
    DAzimut,
    DElevation,
    Rotor,
}

impl TelemetrySnapshot {
    pub fn reading(&self, field: TelemetryField) -> Option<f64> {
        match field {
            TelemetryField::LedLevel => self.led_level,
            TelemetryField::Azimut => self.azimut,
            TelemetryField::Elevation => self.elevation,
            TelemetryField::SAzimut => self.s_azimut,
            TelemetryField::SElevation => self.s_elevation,
            TelemetryField::DAzimut => self.d_azimut,
            TelemetryField::DElevation => self.d_elevation,
            TelemetryField::Rotor => self.rotor,
        }
    }
}

/// Persisted device configuration carried by `getsettings` / `savesettings`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub azimut: FieldValue,
    #[serde(default)]
    pub elevation: FieldValue,
    #[serde(default)]
    pub az_offset: FieldValue,
    #[serde(default)]
    pub el_offset: FieldValue,
    #[serde(default)]
    pub motor_speed: FieldValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Azimut,
    Elevation,
    AzOffset,
    ElOffset,
    MotorSpeed,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Azimut,
        SettingsField::Elevation,
        SettingsField::AzOffset,
        SettingsField::ElOffset,
        SettingsField::MotorSpeed,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            SettingsField::Azimut => "azimut",
            SettingsField::Elevation => "elevation",
            SettingsField::AzOffset => "az_offset",
            SettingsField::ElOffset => "el_offset",
            SettingsField::MotorSpeed => "motor_speed",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

impl SettingsSnapshot {
    pub fn get(&self, field: SettingsField) -> &FieldValue {
        match field {
            SettingsField::Azimut => &self.azimut,
            SettingsField::Elevation => &self.elevation,
            SettingsField::AzOffset => &self.az_offset,
            SettingsField::ElOffset => &self.el_offset,
            SettingsField::MotorSpeed => &self.motor_speed,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: FieldValue) {
        match field {
            SettingsField::Azimut => self.azimut = value,
            SettingsField::Elevation => self.elevation = value,
            SettingsField::AzOffset => self.az_offset = value,
            SettingsField::ElOffset => self.el_offset = value,
            SettingsField::MotorSpeed => self.motor_speed = value,
        }
    }

    /// Wire name and value of every field, in form order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        SettingsField::ALL.into_iter().map(move |f| (f.wire_name(), self.get(f)))
    }
}

/// The finite vocabulary of inbound `action` tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundAction {
    GetValues,
    GetSettings,
    SaveSettings,
    Unrecognized(String),
}

impl InboundAction {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            GET_VALUES => InboundAction::GetValues,
            GET_SETTINGS => InboundAction::GetSettings,
            SAVE_SETTINGS => InboundAction::SaveSettings,
            other => InboundAction::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InboundAction::GetValues => GET_VALUES,
            InboundAction::GetSettings => GET_SETTINGS,
            InboundAction::SaveSettings => SAVE_SETTINGS,
            InboundAction::Unrecognized(tag) => tag,
        }
    }
}

/// Which settings tag a settings payload arrived under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTag {
    GetSettings,
    SaveSettings,
}

/// An inbound device message, already routed by its `action` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum DevicePayload {
    Telemetry(TelemetrySnapshot),
    Settings {
        tag: SettingsTag,
        settings: SettingsSnapshot,
    },
    /// A tag outside the known vocabulary. The body is kept for logging.
    Unrecognized {
        action: String,
        body: Map<String, Value>,
    },
}

impl DevicePayload {
    pub fn action(&self) -> InboundAction {
        match self {
            DevicePayload::Telemetry(_) => InboundAction::GetValues,
            DevicePayload::Settings { tag: SettingsTag::GetSettings, .. } => InboundAction::GetSettings,
            DevicePayload::Settings { tag: SettingsTag::SaveSettings, .. } => InboundAction::SaveSettings,
            DevicePayload::Unrecognized { action, .. } => InboundAction::Unrecognized(action.clone()),
        }
    }
}
