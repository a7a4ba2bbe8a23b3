use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::packets::TelemetryField;
use crate::SatError;

/// Address the device uses when it runs its own access point.
pub const DEFAULT_DEVICE_HOST: &str = "192.168.4.1";
pub const GATEWAY_PATH: &str = "/ws";
pub const RECONNECT_DELAY_MS: u64 = 2000;

/// Pairing of a range input with the action it sends, the label that echoes
/// its value and the telemetry field it mirrors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SliderBinding {
    pub input_id: String,
    pub action: String,
    pub output_id: String,
    pub field: TelemetryField,
}

impl SliderBinding {
    pub fn new(input_id: &str, action: &str, output_id: &str, field: TelemetryField) -> Self {
        Self {
            input_id: input_id.to_string(),
            action: action.to_string(),
            output_id: output_id.to_string(),
            field,
        }
    }
}

/// ```rust
/// use satfinder::ClientConfig;
///
/// let config = ClientConfig::for_host("192.168.4.1");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.gateway_url(), "ws://192.168.4.1/ws");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Host (and optional port) of the page that served the UI.
    pub host: String,
    pub path: String,
    pub reconnect_delay_ms: u64,
    /// Request fresh telemetry after every parsed inbound message.
    pub poll_after_message: bool,
    pub sliders: Vec<SliderBinding>,
    /// Element ids whose click is swallowed instead of being sent.
    pub unimplemented_actions: Vec<String>,
}

impl ClientConfig {
    pub fn for_host(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SatError> {
        let config: ClientConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SatError> {
        if self.host.is_empty() {
            return Err(SatError::InvalidConfig("host cannot be empty".to_string()));
        }
        if !self.path.starts_with('/') {
            return Err(SatError::InvalidConfig(format!("path '{}' must start with '/'", self.path)));
        }
        if self.reconnect_delay_ms == 0 {
            return Err(SatError::InvalidConfig("reconnect delay must be greater than 0".to_string()));
        }
        let mut seen = HashSet::new();
        for binding in &self.sliders {
            if !seen.insert(binding.input_id.as_str()) {
                return Err(SatError::InvalidConfig(format!(
                    "slider '{}' is bound more than once",
                    binding.input_id
                )));
            }
        }
        Ok(())
    }

    pub fn gateway_url(&self) -> String {
        format!("ws://{}{}", self.host, self.path)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn slider(&self, input_id: &str) -> Option<&SliderBinding> {
        self.sliders.iter().find(|b| b.input_id == input_id)
    }

    pub fn is_unimplemented(&self, element_id: &str) -> bool {
        self.unimplemented_actions.iter().any(|a| a == element_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DEVICE_HOST.to_string(),
            path: GATEWAY_PATH.to_string(),
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            poll_after_message: true,
            sliders: vec![
                SliderBinding::new("myAzRange", "slider1", "d_azimut", TelemetryField::DAzimut),
                SliderBinding::new("myElRange", "slider2", "d_elevation", TelemetryField::DElevation),
                SliderBinding::new("myRotorRange", "slider3", "rotor", TelemetryField::Rotor),
            ],
            unimplemented_actions: vec!["om_stop".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_slider_binding_is_rejected() {
        let mut config = ClientConfig::default();
        config.sliders.push(SliderBinding::new("myAzRange", "slider9", "x", TelemetryField::Azimut));
        assert!(matches!(config.validate(), Err(SatError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = ClientConfig::from_json(r#"{"host":"dish.local:8080"}"#).unwrap();
        assert_eq!(config.gateway_url(), "ws://dish.local:8080/ws");
        assert_eq!(config.reconnect_delay(), Duration::from_millis(2000));
        assert_eq!(config.sliders.len(), 3);
        assert!(config.is_unimplemented("om_stop"));
    }

    #[test]
    fn zero_delay_is_rejected() {
        let config = ClientConfig { reconnect_delay_ms: 0, ..ClientConfig::default() };
        assert!(config.validate().is_err());
    }
}
