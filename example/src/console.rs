//! Line commands of the console client.

use satfinder::packets::{FieldValue, SettingsField, AZ_DOWN, AZ_UP, EL_DOWN, EL_UP, SAVE_SETTINGS};
use satfinder::state::ManualField;
use satfinder::{Overlay, Trigger, UiEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Ui(UiEvent),
    Help,
    Quit,
}

fn click(id: &str) -> Input {
    Input::Ui(UiEvent::Trigger(Trigger::Clicked(id.to_string())))
}

/// Parses one console line. Returns `Err` with a message for lines that look
/// like a known command but are incomplete.
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let input = match (head, rest.as_slice()) {
        ("q" | "quit", []) => Input::Quit,
        ("h" | "help" | "?", []) => Input::Help,
        ("az+", []) => click(AZ_UP),
        ("az-", []) => click(AZ_DOWN),
        ("el+", []) => click(EL_UP),
        ("el-", []) => click(EL_DOWN),
        ("save", []) => click(SAVE_SETTINGS),
        ("time", [value]) => manual(ManualField::Time, value),
        ("speed", [value]) => manual(ManualField::Speed, value),
        ("steps", [value]) => manual(ManualField::Steps, value),
        ("slider", [input_id, value]) => Input::Ui(UiEvent::Trigger(Trigger::SliderReleased {
            input_id: input_id.to_string(),
            value: FieldValue::from(*value),
        })),
        ("set", [name, value]) => {
            let field = SettingsField::from_wire_name(name).ok_or_else(|| format!("unknown setting '{}'", name))?;
            Input::Ui(UiEvent::SettingsEdited { field, value: FieldValue::from(*value) })
        }
        ("manual" | "settings", []) => {
            let overlay = Overlay::from_tag(head).ok_or_else(|| format!("unknown overlay '{}'", head))?;
            Input::Ui(UiEvent::ToggleOverlays(vec![overlay]))
        }
        ("time" | "speed" | "steps" | "slider" | "set", _) => {
            return Err(format!("'{}' needs arguments, see help", head));
        }
        (id, []) => click(id),
        _ => return Err(format!("cannot parse '{}'", line.trim())),
    };
    Ok(Some(input))
}

fn manual(field: ManualField, value: &str) -> Input {
    Input::Ui(UiEvent::ManualEdited { field, value: FieldValue::from(value) })
}

pub fn print_help() {
    println!("\nCOMMANDS:");
    println!("  az+ | az- | el+ | el-        move the dish");
    println!("  time <s> | speed <n>         manual move parameters");
    println!("  steps <short|long>           rotor step size");
    println!("  slider <input id> <value>    release a dial");
    println!("  set <field> <value> | save   edit and save settings");
    println!("  <element id>                 send any other action");
    println!("  help | quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_element_ids() {
        assert_eq!(parse_line("az+"), Ok(Some(click("om_az_up"))));
        assert_eq!(parse_line("  el-  "), Ok(Some(click("om_el_down"))));
        assert_eq!(parse_line("save"), Ok(Some(click("savesettings"))));
        assert_eq!(parse_line("om_stop"), Ok(Some(click("om_stop"))));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn edits_carry_the_typed_text() {
        assert_eq!(
            parse_line("set el_offset -17.5"),
            Ok(Some(Input::Ui(UiEvent::SettingsEdited {
                field: SettingsField::ElOffset,
                value: FieldValue::from("-17.5"),
            })))
        );
        assert_eq!(
            parse_line("slider myAzRange 181.2"),
            Ok(Some(Input::Ui(UiEvent::Trigger(Trigger::SliderReleased {
                input_id: "myAzRange".into(),
                value: FieldValue::from("181.2"),
            }))))
        );
        assert!(parse_line("set focus 1").is_err());
        assert!(parse_line("speed").is_err());
    }
}
