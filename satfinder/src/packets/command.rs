use serde_json::{Map, Value};

use super::{FieldValue, SettingsSnapshot};

pub const ACTION_KEY: &str = "action";

pub const GET_VALUES: &str = "getvalues";
pub const GET_SETTINGS: &str = "getsettings";
pub const SAVE_SETTINGS: &str = "savesettings";

pub const EL_UP: &str = "om_el_up";
pub const EL_DOWN: &str = "om_el_down";
pub const AZ_UP: &str = "om_az_up";
pub const AZ_DOWN: &str = "om_az_down";

/// Azimuth rotor actions. The manual azimuth buttons never go on the wire
/// under their own ids; they are translated into one of these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotorAction {
    Up,
    Down,
    UpStep,
    DownStep,
}

impl RotorAction {
    pub const ALL: [RotorAction; 4] = [
        RotorAction::Up,
        RotorAction::Down,
        RotorAction::UpStep,
        RotorAction::DownStep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotorAction::Up => "rotor_up",
            RotorAction::Down => "rotor_down",
            RotorAction::UpStep => "rotor_up_step",
            RotorAction::DownStep => "rotor_down_step",
        }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == action)
    }

    /// Lookup from button direction and step selector.
    pub fn for_button(direction: Direction, step: StepSize) -> Self {
        match (direction, step) {
            (Direction::Up, StepSize::Short) => RotorAction::UpStep,
            (Direction::Up, StepSize::Full) => RotorAction::Up,
            (Direction::Down, StepSize::Short) => RotorAction::DownStep,
            (Direction::Down, StepSize::Full) => RotorAction::Down,
        }
    }

    pub fn is_step(&self) -> bool {
        matches!(self, RotorAction::UpStep | RotorAction::DownStep)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Value of the `om_steps` selector. Only the literal `"short"` selects the
/// step variants; every other selector value means a full move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSize {
    Short,
    Full,
}

impl StepSize {
    pub fn from_selector(value: &str) -> Self {
        if value == "short" {
            StepSize::Short
        } else {
            StepSize::Full
        }
    }
}

/// Outbound command sent from the client to the dish device.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Request a telemetry snapshot.
    GetValues,
    /// Request a settings snapshot.
    GetSettings,
    /// Persist the given settings on the device.
    SaveSettings(SettingsSnapshot),
    /// Range input released at `level`.
    Slider { action: String, level: FieldValue },
    Rotor(RotorAction),
    /// Timed elevation move (`om_el_up` / `om_el_down`).
    Elevation {
        direction: Direction,
        time: FieldValue,
        speed: FieldValue,
    },
    /// Any other element id, sent verbatim.
    Other(String),
}

impl Command {
    pub fn action(&self) -> &str {
        match self {
            Command::GetValues => GET_VALUES,
            Command::GetSettings => GET_SETTINGS,
            Command::SaveSettings(_) => SAVE_SETTINGS,
            Command::Slider { action, .. } => action,
            Command::Rotor(rotor) => rotor.as_str(),
            Command::Elevation { direction: Direction::Up, .. } => EL_UP,
            Command::Elevation { direction: Direction::Down, .. } => EL_DOWN,
            Command::Other(action) => action,
        }
    }

    /// Flat field map for the wire, including the `action` discriminator.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        match self {
            Command::SaveSettings(settings) => {
                for (name, value) in settings.fields() {
                    fields.insert(name.to_string(), value.to_json());
                }
            }
            Command::Slider { level, .. } => {
                fields.insert("level".to_string(), level.to_json());
            }
            Command::Elevation { time, speed, .. } => {
                fields.insert("time".to_string(), time.to_json());
                fields.insert("speed".to_string(), speed.to_json());
            }
            Command::GetValues | Command::GetSettings | Command::Rotor(_) | Command::Other(_) => {}
        }
        fields.insert(ACTION_KEY.to_string(), Value::String(self.action().to_string()));
        fields
    }

    /// Rebuilds a command from a wire field map. Used by the device side.
    ///
    /// Any action carrying a `level` field is taken as a slider release, since
    /// slider action names are configuration rather than protocol vocabulary.
    pub fn from_fields(mut fields: Map<String, Value>) -> Option<Self> {
        let action = match fields.remove(ACTION_KEY) {
            Some(Value::String(action)) => action,
            _ => return None,
        };
        let has_level = fields.contains_key("level");
        let mut take = |key: &str| fields.remove(key).map(FieldValue::from_json).unwrap_or_default();

        let command = match action.as_str() {
            GET_VALUES => Command::GetValues,
            GET_SETTINGS => Command::GetSettings,
            SAVE_SETTINGS => Command::SaveSettings(SettingsSnapshot {
                azimut: take("azimut"),
                elevation: take("elevation"),
                az_offset: take("az_offset"),
                el_offset: take("el_offset"),
                motor_speed: take("motor_speed"),
            }),
            EL_UP | EL_DOWN => Command::Elevation {
                direction: if action == EL_UP { Direction::Up } else { Direction::Down },
                time: take("time"),
                speed: take("speed"),
            },
            other => match RotorAction::from_action(other) {
                Some(rotor) => Command::Rotor(rotor),
                None if has_level => Command::Slider {
                    action: other.to_string(),
                    level: take("level"),
                },
                None => Command::Other(other.to_string()),
            },
        };
        Some(command)
    }
}
