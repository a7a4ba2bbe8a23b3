//! Simulated SatFinder device.
//!
//! [`DeviceState`] answers decoded client commands the way the dish
//! positioner does and moves the simulated dish toward its dial targets on
//! every [`DeviceState::tick`].

use std::error::Error;
use std::time::Duration;

use satfinder::packets::{
    Command, DevicePayload, Direction, FieldValue, RotorAction, SettingsSnapshot, SettingsTag, TelemetryField,
    TelemetrySnapshot,
};
use satfinder::{ClientConfig, SliderBinding};
use tracing::{debug, info};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TICK_MS: u64 = 100;

// Astra 19.2E calibration and dish offsets shipped with the firmware.
pub const ASTRA_AZIMUT: f64 = 173.34;
pub const ASTRA_ELEVATION: f64 = 29.40;
pub const EL_OFFSET: f64 = -18.00;
pub const AZ_OFFSET: f64 = -10.00;
pub const MOTOR_SPEED: i64 = 700;

/// Degrees a full rotor move shifts the azimuth target.
pub const ROTOR_MOVE_DEG: f64 = 10.0;
/// Degrees a single rotor step shifts the azimuth target.
pub const ROTOR_STEP_DEG: f64 = 1.0;
/// Elevation travel in degrees per second at motor speed 1000.
const ELEVATION_RATE: f64 = 2.0;
/// Degrees the dish moves per tick toward its targets.
const SLEW_PER_TICK: f64 = 0.5;

const ELEVATION_RANGE: (f64, f64) = (0.0, 90.0);
/// Remaining error below which the dish counts as settled.
const SETTLED_DEG: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub port: u16,
    pub tick: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl SimConfig {
    /// Reads `SIM_PORT` and `SIM_TICK_MS`, falling back to the defaults when
    /// a variable is unset. A set but unparsable value is an error.
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(port) = lookup("SIM_PORT") {
            config.port = port.trim().parse().map_err(|e| format!("SIM_PORT '{}': {}", port, e))?;
        }
        if let Some(tick) = lookup("SIM_TICK_MS") {
            let ms: u64 = tick.trim().parse().map_err(|e| format!("SIM_TICK_MS '{}': {}", tick, e))?;
            if ms == 0 {
                return Err("SIM_TICK_MS must be greater than 0".into());
            }
            config.tick = Duration::from_millis(ms);
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Simulated dish and its stored settings.
#[derive(Debug, Clone)]
pub struct DeviceState {
    /// Compass heading of the dish.
    pub azimut: f64,
    pub elevation: f64,
    /// Dial targets the dish slews toward.
    pub d_azimut: f64,
    pub d_elevation: f64,
    pub rotor: f64,
    pub settings: SettingsSnapshot,
    /// Slider actions the firmware answers to and the dial each one drives.
    sliders: Vec<SliderBinding>,
}

impl Default for DeviceState {
    fn default() -> Self {
        let settings = SettingsSnapshot {
            azimut: FieldValue::from(ASTRA_AZIMUT),
            elevation: FieldValue::from(ASTRA_ELEVATION),
            az_offset: FieldValue::from(AZ_OFFSET),
            el_offset: FieldValue::from(EL_OFFSET),
            motor_speed: FieldValue::from(MOTOR_SPEED),
        };
        Self {
            azimut: 150.0,
            elevation: 20.0,
            d_azimut: 150.0,
            d_elevation: 20.0,
            rotor: 0.0,
            settings,
            sliders: ClientConfig::default().sliders,
        }
    }
}

impl DeviceState {
    /// Applies one client command. Returns the reply to send back, if any.
    pub fn apply(&mut self, command: &Command) -> Option<DevicePayload> {
        match command {
            Command::GetValues => Some(DevicePayload::Telemetry(self.telemetry())),
            Command::GetSettings => Some(self.settings_reply(SettingsTag::GetSettings)),
            Command::SaveSettings(settings) => {
                info!("storing settings, motor speed {}", settings.motor_speed);
                self.settings = settings.clone();
                Some(self.settings_reply(SettingsTag::SaveSettings))
            }
            Command::Slider { action, level } => {
                self.set_dial(action, level);
                None
            }
            Command::Rotor(action) => {
                let delta = if action.is_step() { ROTOR_STEP_DEG } else { ROTOR_MOVE_DEG };
                let delta = match action {
                    RotorAction::Up | RotorAction::UpStep => delta,
                    RotorAction::Down | RotorAction::DownStep => -delta,
                };
                self.d_azimut = wrap_degrees(self.d_azimut + delta);
                debug!("{}: azimuth target {:.2}", action.as_str(), self.d_azimut);
                None
            }
            Command::Elevation { direction, time, speed } => {
                let seconds = time.as_f64().unwrap_or(0.0).max(0.0);
                let speed = speed.as_f64().unwrap_or(0.0).max(0.0);
                let travel = seconds * ELEVATION_RATE * speed / 1000.0;
                let delta = match direction {
                    Direction::Up => travel,
                    Direction::Down => -travel,
                };
                self.d_elevation = clamp_elevation(self.d_elevation + delta);
                debug!("elevation target {:.2}", self.d_elevation);
                None
            }
            Command::Other(action) => {
                debug!("ignoring '{}'", action);
                None
            }
        }
    }

    /// Moves the dish one step toward its dial targets.
    pub fn tick(&mut self) {
        let az_error = shortest_turn(self.azimut, self.d_azimut);
        self.azimut = wrap_degrees(self.azimut + az_error.clamp(-SLEW_PER_TICK, SLEW_PER_TICK));
        let el_error = self.d_elevation - self.elevation;
        self.elevation = clamp_elevation(self.elevation + el_error.clamp(-SLEW_PER_TICK, SLEW_PER_TICK));
    }

    pub fn is_moving(&self) -> bool {
        shortest_turn(self.azimut, self.d_azimut).abs() > SETTLED_DEG
            || (self.d_elevation - self.elevation).abs() > SETTLED_DEG
    }

    /// Satellite position the dish should point at: calibration plus offset.
    pub fn satellite(&self) -> (f64, f64) {
        let field = |v: &FieldValue| v.as_f64().unwrap_or(0.0);
        (
            wrap_degrees(field(&self.settings.azimut) + field(&self.settings.az_offset)),
            clamp_elevation(field(&self.settings.elevation) + field(&self.settings.el_offset)),
        )
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        let (s_azimut, s_elevation) = self.satellite();
        let off_target = shortest_turn(self.azimut, s_azimut).abs() + (s_elevation - self.elevation).abs();
        let led_level = (100.0 - off_target * 10.0).clamp(0.0, 100.0);
        let state = if self.is_moving() {
            "Moving"
        } else if led_level > 0.0 {
            "Locked"
        } else {
            "Idle"
        };
        TelemetrySnapshot {
            led_level: Some(led_level),
            state: state.to_string(),
            azimut: Some(self.azimut),
            elevation: Some(self.elevation),
            s_azimut: Some(s_azimut),
            s_elevation: Some(s_elevation),
            d_azimut: Some(self.d_azimut),
            d_elevation: Some(self.d_elevation),
            rotor: Some(self.rotor),
        }
    }

    fn settings_reply(&self, tag: SettingsTag) -> DevicePayload {
        DevicePayload::Settings { tag, settings: self.settings.clone() }
    }

    fn set_dial(&mut self, action: &str, level: &FieldValue) {
        let Some(binding) = self.sliders.iter().find(|b| b.action == action) else {
            debug!("no dial behind '{}'", action);
            return;
        };
        let Some(level) = level.as_f64() else {
            debug!("'{}' level '{}' is not a number", action, level);
            return;
        };
        match binding.field {
            TelemetryField::DAzimut => self.d_azimut = wrap_degrees(level),
            TelemetryField::DElevation => self.d_elevation = clamp_elevation(level),
            TelemetryField::Rotor => self.rotor = level,
            other => debug!("dial '{}' drives {:?}, ignored", action, other),
        }
    }
}

fn wrap_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

fn clamp_elevation(deg: f64) -> f64 {
    deg.clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1)
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
fn shortest_turn(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}
