use satfinder::overlay::OverlayState;
use satfinder::{Overlay, Visibility};

#[test]
fn overlays_start_hidden() {
    let overlays = OverlayState::default();
    assert_eq!(overlays.visibility(Overlay::Manual), Visibility::Hidden);
    assert_eq!(overlays.visibility(Overlay::Settings), Visibility::Hidden);
}

#[test]
fn only_clicks_on_the_container_itself_toggle() {
    let mut overlays = OverlayState::default();
    overlays.toggle(Overlay::Settings);

    for inner in ["azimut", "savesettings", "settings-dialog", "overlay-manual", ""] {
        assert!(!overlays.container_clicked(Overlay::Settings, inner), "{}", inner);
        assert!(overlays.is_active(Overlay::Settings));
    }

    assert!(overlays.container_clicked(Overlay::Settings, "overlay-settings"));
    assert!(!overlays.is_active(Overlay::Settings));
    assert!(!overlays.is_active(Overlay::Manual));
}

#[test]
fn element_with_both_tags_toggles_both() {
    let mut overlays = OverlayState::default();
    overlays.toggle(Overlay::Manual);

    overlays.toggle_tagged(&[Overlay::Manual, Overlay::Settings]);
    assert!(!overlays.is_active(Overlay::Manual));
    assert!(overlays.is_active(Overlay::Settings));

    // a repeated tag still toggles once
    overlays.toggle_tagged(&[Overlay::Settings, Overlay::Settings]);
    assert!(!overlays.is_active(Overlay::Settings));
}

#[test]
fn tags_and_container_ids() {
    for overlay in [Overlay::Manual, Overlay::Settings] {
        assert_eq!(Overlay::from_tag(overlay.tag()), Some(overlay));
        assert!(overlay.container_id().starts_with("overlay-"));
    }
    assert_eq!(Overlay::from_tag("help"), None);
}

#[test]
fn close_is_idempotent() {
    let mut overlays = OverlayState::default();
    overlays.close(Overlay::Manual);
    assert!(!overlays.is_active(Overlay::Manual));
    overlays.toggle(Overlay::Manual);
    overlays.close(Overlay::Manual);
    overlays.close(Overlay::Manual);
    assert!(!overlays.is_active(Overlay::Manual));
}
