use satfinder::codec::{decode, decode_command, encode, encode_payload};
use satfinder::packets::{
    Command, DevicePayload, Direction, FieldValue, RotorAction, SettingsSnapshot, SettingsTag, TelemetrySnapshot,
};
use satfinder::SatError;
use serde_json::{json, Value};

fn as_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn bootstrap_requests_are_bare_actions() {
    assert_eq!(as_json(&encode(&Command::GetValues).unwrap()), json!({"action": "getvalues"}));
    assert_eq!(as_json(&encode(&Command::GetSettings).unwrap()), json!({"action": "getsettings"}));
}

#[test]
fn slider_level_keeps_the_callers_primitive() {
    let text = Command::Slider { action: "slider1".into(), level: FieldValue::from("42.5") };
    assert_eq!(as_json(&encode(&text).unwrap()), json!({"action": "slider1", "level": "42.5"}));

    let number = Command::Slider { action: "slider2".into(), level: FieldValue::from(17_i64) };
    assert_eq!(as_json(&encode(&number).unwrap()), json!({"action": "slider2", "level": 17}));
}

#[test]
fn elevation_move_carries_time_and_speed() {
    let command = Command::Elevation {
        direction: Direction::Down,
        time: FieldValue::from("3"),
        speed: FieldValue::from("500"),
    };
    assert_eq!(
        as_json(&encode(&command).unwrap()),
        json!({"action": "om_el_down", "time": "3", "speed": "500"})
    );
}

#[test]
fn save_settings_is_flat() {
    let settings = SettingsSnapshot {
        azimut: "173.34".into(),
        elevation: "29.40".into(),
        az_offset: "-10.00".into(),
        el_offset: "-18.00".into(),
        motor_speed: "700".into(),
    };
    let value = as_json(&encode(&Command::SaveSettings(settings)).unwrap());
    assert_eq!(
        value,
        json!({
            "action": "savesettings",
            "azimut": "173.34",
            "elevation": "29.40",
            "az_offset": "-10.00",
            "el_offset": "-18.00",
            "motor_speed": "700"
        })
    );
}

#[test]
fn telemetry_accepts_strings_and_numbers() {
    let payload = decode(
        r#"{"action":"getvalues","led_level":"80","state":"Tracking","azimut":"12.34","elevation":5.6,
            "s_azimut":173.34,"s_elevation":"29.4","d_azimut":"180","d_elevation":"30","rotor":"4"}"#,
    )
    .unwrap();
    match payload {
        DevicePayload::Telemetry(t) => {
            assert_eq!(t.led_level, Some(80.0));
            assert_eq!(t.state, "Tracking");
            assert_eq!(t.azimut, Some(12.34));
            assert_eq!(t.elevation, Some(5.6));
            assert_eq!(t.s_azimut, Some(173.34));
            assert_eq!(t.rotor, Some(4.0));
        }
        other => panic!("expected telemetry, got {:?}", other),
    }
}

#[test]
fn telemetry_missing_fields_are_empty() {
    let payload = decode(r#"{"action":"getvalues","azimut":"n/a"}"#).unwrap();
    assert_eq!(payload, DevicePayload::Telemetry(TelemetrySnapshot::default()));
}

#[test]
fn settings_tags_are_distinguished() {
    let get = decode(r#"{"action":"getsettings","azimut":"173.34","motor_speed":700}"#).unwrap();
    let save = decode(r#"{"action":"savesettings","azimut":"173.34","motor_speed":700}"#).unwrap();
    match (get, save) {
        (
            DevicePayload::Settings { tag: SettingsTag::GetSettings, settings: a },
            DevicePayload::Settings { tag: SettingsTag::SaveSettings, settings: b },
        ) => {
            assert_eq!(a, b);
            assert_eq!(a.azimut, FieldValue::from("173.34"));
            assert_eq!(a.motor_speed, FieldValue::from(700_i64));
            assert_eq!(a.el_offset, FieldValue::default());
        }
        other => panic!("unexpected routing: {:?}", other),
    }
}

#[test]
fn unknown_and_missing_tags_are_unrecognized() {
    match decode(r#"{"action":"firmware_update","progress":3}"#).unwrap() {
        DevicePayload::Unrecognized { action, body } => {
            assert_eq!(action, "firmware_update");
            assert_eq!(body.get("progress"), Some(&json!(3)));
        }
        other => panic!("expected unrecognized, got {:?}", other),
    }
    match decode(r#"{"azimut":"1.0"}"#).unwrap() {
        DevicePayload::Unrecognized { action, .. } => assert_eq!(action, ""),
        other => panic!("expected unrecognized, got {:?}", other),
    }
}

#[test]
fn malformed_text_is_an_error() {
    assert!(matches!(decode("{\"action\":"), Err(SatError::Json(_))));
    assert!(matches!(decode("[1, 2]"), Err(SatError::NotAnObject)));
    assert!(matches!(decode("\"getvalues\""), Err(SatError::NotAnObject)));
}

#[test]
fn device_side_decodes_client_commands() {
    assert_eq!(decode_command(r#"{"action":"getvalues"}"#).unwrap(), Command::GetValues);
    assert_eq!(
        decode_command(r#"{"action":"rotor_down_step"}"#).unwrap(),
        Command::Rotor(RotorAction::DownStep)
    );
    assert_eq!(
        decode_command(r#"{"action":"myAzRange","level":"90"}"#).unwrap(),
        Command::Slider { action: "myAzRange".into(), level: FieldValue::from("90") }
    );
    assert_eq!(decode_command(r#"{"action":"reboot"}"#).unwrap(), Command::Other("reboot".into()));
    assert!(matches!(decode_command(r#"{"level":"90"}"#), Err(SatError::MissingAction)));
}

#[test]
fn device_payload_encoding_adds_the_tag() {
    let telemetry = TelemetrySnapshot {
        azimut: Some(12.5),
        state: "Idle".into(),
        ..TelemetrySnapshot::default()
    };
    let value = as_json(&encode_payload(&DevicePayload::Telemetry(telemetry)).unwrap());
    assert_eq!(value["action"], "getvalues");
    assert_eq!(value["azimut"], 12.5);
    assert_eq!(value["state"], "Idle");
    assert!(value.get("rotor").is_none());

    let saved = DevicePayload::Settings {
        tag: SettingsTag::SaveSettings,
        settings: SettingsSnapshot { motor_speed: FieldValue::from(650_i64), ..SettingsSnapshot::default() },
    };
    let value = as_json(&encode_payload(&saved).unwrap());
    assert_eq!(value["action"], "savesettings");
    assert_eq!(value["motor_speed"], 650);
}
