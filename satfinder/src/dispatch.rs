//! Translation of UI triggers into outbound commands.

use tracing::debug;

use crate::config::ClientConfig;
use crate::overlay::Overlay;
use crate::packets::{
    format_reading, Command, Direction, FieldValue, RotorAction, StepSize, AZ_DOWN, AZ_UP, EL_DOWN, EL_UP,
    SAVE_SETTINGS,
};
use crate::state::AppState;

/// A user-initiated event on an actionable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// A range input was released at `value`.
    SliderReleased { input_id: String, value: FieldValue },
    /// A button (or any other actionable element) was clicked.
    Clicked(String),
}

/// Result of dispatching a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Send(Command),
    /// The element is known but has no device command behind it yet.
    Unimplemented(String),
}

/// Maps one trigger to at most one command, applying the local side effects
/// (slider label echo, closing the settings overlay) to `state`.
pub fn dispatch(state: &mut AppState, config: &ClientConfig, trigger: Trigger) -> Dispatch {
    match trigger {
        Trigger::SliderReleased { input_id, value } => slider_released(state, config, input_id, value),
        Trigger::Clicked(element_id) => clicked(state, config, element_id),
    }
}

fn slider_released(state: &mut AppState, config: &ClientConfig, input_id: String, value: FieldValue) -> Dispatch {
    let action = match config.slider(&input_id) {
        Some(binding) => binding.action.clone(),
        None => {
            debug!("slider '{}' has no binding, sending its id as action", input_id);
            input_id.clone()
        }
    };
    if let Some(slider) = state.slider_mut(&input_id) {
        slider.position = value.as_f64();
        slider.label = format_reading(value.as_f64());
    }
    Dispatch::Send(Command::Slider { action, level: value })
}

fn clicked(state: &mut AppState, config: &ClientConfig, element_id: String) -> Dispatch {
    if config.is_unimplemented(&element_id) {
        debug!("'{}' has no device command, nothing sent", element_id);
        return Dispatch::Unimplemented(element_id);
    }

    let command = match element_id.as_str() {
        EL_UP | EL_DOWN => Command::Elevation {
            direction: if element_id == EL_UP { Direction::Up } else { Direction::Down },
            time: state.manual.time.clone(),
            speed: state.manual.speed.clone(),
        },
        AZ_UP | AZ_DOWN => {
            let direction = if element_id == AZ_UP { Direction::Up } else { Direction::Down };
            let step = StepSize::from_selector(&state.manual.steps);
            Command::Rotor(RotorAction::for_button(direction, step))
        }
        SAVE_SETTINGS => {
            let command = Command::SaveSettings(state.settings_form.clone());
            state.overlays.close(Overlay::Settings);
            command
        }
        other => Command::Other(other.to_string()),
    };
    Dispatch::Send(command)
}
