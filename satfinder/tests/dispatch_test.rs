use satfinder::dispatch::{dispatch, Dispatch, Trigger};
use satfinder::packets::{Command, Direction, FieldValue, RotorAction, SettingsField};
use satfinder::state::{AppState, ManualField};
use satfinder::{ClientConfig, Overlay};

fn setup() -> (AppState, ClientConfig) {
    let config = ClientConfig::default();
    (AppState::new(&config), config)
}

fn click(state: &mut AppState, config: &ClientConfig, id: &str) -> Dispatch {
    dispatch(state, config, Trigger::Clicked(id.to_string()))
}

#[test]
fn slider_release_sends_bound_action_and_echoes_label() {
    let (mut state, config) = setup();
    let result = dispatch(
        &mut state,
        &config,
        Trigger::SliderReleased { input_id: "myAzRange".into(), value: FieldValue::from("181.26") },
    );

    assert_eq!(
        result,
        Dispatch::Send(Command::Slider { action: "slider1".into(), level: FieldValue::from("181.26") })
    );
    let slider = state.slider("myAzRange").unwrap();
    assert_eq!(slider.label, "181.3");
    assert_eq!(slider.output_id, "d_azimut");
    // the other sliders are untouched
    assert_eq!(state.slider("myElRange").unwrap().label, "--");
}

#[test]
fn unbound_slider_uses_its_id_as_action() {
    let (mut state, config) = setup();
    let result = dispatch(
        &mut state,
        &config,
        Trigger::SliderReleased { input_id: "myFocusRange".into(), value: FieldValue::from(3_i64) },
    );
    assert_eq!(
        result,
        Dispatch::Send(Command::Slider { action: "myFocusRange".into(), level: FieldValue::from(3_i64) })
    );
}

#[test]
fn elevation_buttons_carry_manual_form_values() {
    let (mut state, config) = setup();
    state.edit_manual(ManualField::Time, FieldValue::from("5"));
    state.edit_manual(ManualField::Speed, FieldValue::from("300"));

    assert_eq!(
        click(&mut state, &config, "om_el_up"),
        Dispatch::Send(Command::Elevation {
            direction: Direction::Up,
            time: FieldValue::from("5"),
            speed: FieldValue::from("300"),
        })
    );
    assert_eq!(
        click(&mut state, &config, "om_el_down"),
        Dispatch::Send(Command::Elevation {
            direction: Direction::Down,
            time: FieldValue::from("5"),
            speed: FieldValue::from("300"),
        })
    );
}

#[test]
fn azimuth_buttons_follow_the_step_selector() {
    let (mut state, config) = setup();
    let cases = [
        ("short", "om_az_up", RotorAction::UpStep),
        ("short", "om_az_down", RotorAction::DownStep),
        ("long", "om_az_up", RotorAction::Up),
        ("long", "om_az_down", RotorAction::Down),
        ("", "om_az_up", RotorAction::Up),
        ("Short", "om_az_down", RotorAction::Down),
    ];
    for (steps, button, expected) in cases {
        state.edit_manual(ManualField::Steps, FieldValue::from(steps));
        assert_eq!(
            click(&mut state, &config, button),
            Dispatch::Send(Command::Rotor(expected)),
            "selector {:?} with {}",
            steps,
            button
        );
    }
}

#[test]
fn save_settings_sends_the_form_and_closes_the_overlay() {
    let (mut state, config) = setup();
    state.overlays.toggle(Overlay::Settings);
    state.settings_form.set(SettingsField::Azimut, FieldValue::from("170.0"));
    state.settings_form.set(SettingsField::MotorSpeed, FieldValue::from("650"));
    let form = state.settings_form.clone();

    match click(&mut state, &config, "savesettings") {
        Dispatch::Send(Command::SaveSettings(sent)) => assert_eq!(sent, form),
        other => panic!("expected savesettings, got {:?}", other),
    }
    assert!(!state.overlays.is_active(Overlay::Settings));
}

#[test]
fn stop_is_surfaced_as_unimplemented() {
    let (mut state, config) = setup();
    let before = state.clone();
    assert_eq!(click(&mut state, &config, "om_stop"), Dispatch::Unimplemented("om_stop".into()));
    assert_eq!(state, before);
}

#[test]
fn other_elements_are_sent_verbatim() {
    let (mut state, config) = setup();
    assert_eq!(
        click(&mut state, &config, "calibrate_compass"),
        Dispatch::Send(Command::Other("calibrate_compass".into()))
    );
}
