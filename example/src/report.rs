//! Console output of the session.
//!
//! The controller polls after every device reply, so against a fast device
//! the same telemetry comes back thousands of times a second. Lines are only
//! printed when what they show has changed.

use satfinder::packets::SettingsSnapshot;
use satfinder::state::{AppState, ManualForm, TelemetryDisplay};
use satfinder::{Controller, Event, LinkEvent};

#[derive(Default)]
pub struct Reporter {
    display: Option<(TelemetryDisplay, Vec<String>)>,
    settings: Option<SettingsSnapshot>,
    form: Option<(ManualForm, SettingsSnapshot)>,
}

impl Reporter {
    /// Lines to print after `event` was handled.
    pub fn lines(&mut self, state: &AppState, event: &Event) -> Vec<String> {
        let mut lines = Vec::new();
        match event {
            Event::Link(LinkEvent::Opened) => lines.push("✓ Connected".to_string()),
            Event::Link(LinkEvent::Closed) => {
                // everything is reprinted after the next connect
                *self = Self::default();
                lines.push("✗ Disconnected, retrying".to_string());
            }
            Event::Link(LinkEvent::Message(_)) => {
                let labels: Vec<String> = state.sliders.iter().map(|s| format!("{}={}", s.output_id, s.label)).collect();
                let display = (state.display.clone(), labels);
                if self.display.as_ref() != Some(&display) {
                    lines.push(telemetry_line(&display.0, &display.1));
                    self.display = Some(display);
                }
                if self.settings.as_ref() != Some(&state.settings) {
                    lines.push(format!("💾 device settings | {}", settings_text(&state.settings)));
                    self.settings = Some(state.settings.clone());
                }
            }
            Event::Ui(_) => {
                let form = (state.manual.clone(), state.settings_form.clone());
                if self.form.as_ref() != Some(&form) {
                    lines.push(format!(
                        "⚙  time={} speed={} steps={} | {}",
                        form.0.time,
                        form.0.speed,
                        form.0.steps,
                        settings_text(&form.1)
                    ));
                    self.form = Some(form);
                }
            }
            _ => {}
        }
        lines
    }

    /// Session observer printing the changed lines.
    pub fn print(&mut self, controller: &Controller, event: &Event) {
        for line in self.lines(controller.state(), event) {
            println!("{}", line);
        }
    }
}

fn telemetry_line(d: &TelemetryDisplay, labels: &[String]) -> String {
    format!(
        "📡 {:<10} az {:>6} el {:>5} | sat az {:>6} el {:>5} | led {:>5} | {}",
        d.state,
        d.azimut,
        d.elevation,
        d.s_azimut,
        d.s_elevation,
        d.led_level,
        labels.join(" ")
    )
}

fn settings_text(settings: &SettingsSnapshot) -> String {
    settings.fields().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use satfinder::state::ManualField;
    use satfinder::{ClientConfig, FieldValue, UiEvent};

    fn open_controller() -> Controller {
        let mut controller = Controller::new(ClientConfig::default());
        controller.handle(Event::Link(LinkEvent::Opened));
        controller
    }

    fn feed(controller: &mut Controller, reporter: &mut Reporter, event: Event) -> Vec<String> {
        controller.handle(event.clone());
        reporter.lines(controller.state(), &event)
    }

    fn message(text: &str) -> Event {
        Event::Link(LinkEvent::Message(text.to_string()))
    }

    #[test]
    fn repeated_telemetry_prints_once() {
        let mut controller = open_controller();
        let mut reporter = Reporter::default();
        let frame = r#"{"action":"getvalues","azimut":"150","elevation":"-2.25","state":"Idle"}"#;

        let first = feed(&mut controller, &mut reporter, message(frame));
        assert_eq!(first.len(), 2);
        assert!(first[0].starts_with("📡 Idle"));
        assert!(first[0].contains("el  -2.3"));

        for _ in 0..1000 {
            assert!(feed(&mut controller, &mut reporter, message(frame)).is_empty());
        }

        let moved = feed(&mut controller, &mut reporter, message(r#"{"action":"getvalues","azimut":"150.5","elevation":"-2.25","state":"Moving"}"#));
        assert_eq!(moved.len(), 1);
        assert!(moved[0].contains("150.5"));
    }

    #[test]
    fn settings_frames_print_as_settings() {
        let mut controller = open_controller();
        let mut reporter = Reporter::default();
        feed(&mut controller, &mut reporter, message(r#"{"action":"getvalues"}"#));

        let lines = feed(
            &mut controller,
            &mut reporter,
            message(r#"{"action":"getsettings","azimut":"173.34","elevation":"29.40","az_offset":"-10.00","el_offset":"-18.00","motor_speed":"700"}"#),
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("💾 device settings"));
        assert!(lines[0].contains("motor_speed=700"));
    }

    #[test]
    fn disconnect_reprints_on_the_next_frame() {
        let mut controller = open_controller();
        let mut reporter = Reporter::default();
        let frame = r#"{"action":"getvalues","azimut":"10"}"#;
        feed(&mut controller, &mut reporter, message(frame));

        assert_eq!(feed(&mut controller, &mut reporter, Event::Link(LinkEvent::Closed)), vec!["✗ Disconnected, retrying"]);
        feed(&mut controller, &mut reporter, Event::Link(LinkEvent::Opened));
        assert!(!feed(&mut controller, &mut reporter, message(frame)).is_empty());
    }

    #[test]
    fn form_edits_print_only_when_the_form_changes() {
        let mut controller = open_controller();
        let mut reporter = Reporter::default();
        let edit = || Event::Ui(UiEvent::ManualEdited { field: ManualField::Speed, value: FieldValue::from("500") });

        let lines = feed(&mut controller, &mut reporter, edit());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("speed=500"));
        assert!(feed(&mut controller, &mut reporter, edit()).is_empty());
    }
}
