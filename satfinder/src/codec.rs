//! JSON text codec for both directions of the link.

use serde_json::{Map, Value};

use crate::packets::{
    Command, DevicePayload, InboundAction, SettingsSnapshot, SettingsTag, TelemetrySnapshot, ACTION_KEY,
};
use crate::SatError;

/// Serializes an outbound command to a flat JSON object.
pub fn encode(command: &Command) -> Result<String, SatError> {
    Ok(serde_json::to_string(&Value::Object(command.to_fields()))?)
}

/// Parses an inbound device frame.
///
/// The text must be a JSON object. A missing or non-string `action` is
/// routed as an unrecognized tag with an empty name.
pub fn decode(text: &str) -> Result<DevicePayload, SatError> {
    let mut body = parse_object(text)?;
    let tag = match body.remove(ACTION_KEY) {
        Some(Value::String(tag)) => tag,
        _ => String::new(),
    };

    let payload = match InboundAction::from_tag(&tag) {
        InboundAction::GetValues => {
            DevicePayload::Telemetry(serde_json::from_value::<TelemetrySnapshot>(Value::Object(body))?)
        }
        InboundAction::GetSettings => DevicePayload::Settings {
            tag: SettingsTag::GetSettings,
            settings: serde_json::from_value::<SettingsSnapshot>(Value::Object(body))?,
        },
        InboundAction::SaveSettings => DevicePayload::Settings {
            tag: SettingsTag::SaveSettings,
            settings: serde_json::from_value::<SettingsSnapshot>(Value::Object(body))?,
        },
        InboundAction::Unrecognized(action) => DevicePayload::Unrecognized { action, body },
    };
    Ok(payload)
}

/// Serializes a device frame. Used by the simulator.
pub fn encode_payload(payload: &DevicePayload) -> Result<String, SatError> {
    let mut body = match payload {
        DevicePayload::Telemetry(telemetry) => into_object(serde_json::to_value(telemetry)?)?,
        DevicePayload::Settings { settings, .. } => into_object(serde_json::to_value(settings)?)?,
        DevicePayload::Unrecognized { body, .. } => body.clone(),
    };
    body.insert(ACTION_KEY.to_string(), Value::String(payload.action().as_str().to_string()));
    Ok(serde_json::to_string(&Value::Object(body))?)
}

/// Parses a client frame. Used by the simulator.
pub fn decode_command(text: &str) -> Result<Command, SatError> {
    Command::from_fields(parse_object(text)?).ok_or(SatError::MissingAction)
}

fn parse_object(text: &str) -> Result<Map<String, Value>, SatError> {
    into_object(serde_json::from_str::<Value>(text)?)
}

fn into_object(value: Value) -> Result<Map<String, Value>, SatError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SatError::NotAnObject),
    }
}
