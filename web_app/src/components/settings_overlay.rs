use leptos::prelude::*;
use satfinder::packets::{FieldValue, SettingsField, SAVE_SETTINGS};
use satfinder::{Overlay, UiEvent};

use super::overlay_frame::OverlayFrame;
use super::{click, use_dish};

fn label_of(field: SettingsField) -> &'static str {
    match field {
        SettingsField::Azimut => "Satellite azimuth",
        SettingsField::Elevation => "Satellite elevation",
        SettingsField::AzOffset => "Azimuth offset",
        SettingsField::ElOffset => "Elevation offset",
        SettingsField::MotorSpeed => "Motor speed",
    }
}

/// Device settings form. Populated from every settings snapshot.
#[component]
pub fn SettingsOverlay() -> impl IntoView {
    let dish = use_dish();

    view! {
        <OverlayFrame overlay=Overlay::Settings title="Device Settings">
            <div class="space-y-4">
                {SettingsField::ALL.into_iter().map(|field| view! {
                    <div>
                        <label class="block text-[#888888] text-xs mb-1.5">{label_of(field)}</label>
                        <input
                            id=field.wire_name()
                            type="text"
                            class="w-full bg-[#1a1a1a] border border-[#ffffff08] rounded px-3 py-2 text-white text-sm focus:border-[#00d9ff] focus:outline-none"
                            prop:value=move || dish.with_state(|s| s.settings_form.get(field).to_string())
                            on:input=move |ev| dish.ui(UiEvent::SettingsEdited {
                                field,
                                value: FieldValue::from(event_target_value(&ev)),
                            })
                        />
                    </div>
                }).collect_view()}

                <div class="flex space-x-2 pt-2">
                    <button
                        id=SAVE_SETTINGS
                        class="flex-1 bg-[#00d9ff] hover:bg-[#00b8d9] text-black font-medium py-2 px-4 rounded transition-colors text-xs"
                        on:click=click(dish, SAVE_SETTINGS)
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </OverlayFrame>
    }
}
