//! Dial sliders.
//!
//! One range input per configured slider binding. The device is only told on
//! release (`change`), and the label next to the slider echoes the released
//! value until the next telemetry snapshot overwrites it.

use leptos::prelude::*;
use satfinder::packets::{FieldValue, TelemetryField};
use satfinder::{Trigger, UiEvent};

use super::use_dish;

fn range_of(field: TelemetryField) -> (f64, f64, f64) {
    match field {
        TelemetryField::DAzimut | TelemetryField::Azimut | TelemetryField::SAzimut => (0.0, 360.0, 0.1),
        TelemetryField::DElevation | TelemetryField::Elevation | TelemetryField::SElevation => (0.0, 90.0, 0.1),
        TelemetryField::Rotor => (-90.0, 90.0, 1.0),
        TelemetryField::LedLevel => (0.0, 100.0, 1.0),
    }
}

#[component]
fn DialSlider(#[prop(into)] input_id: String) -> impl IntoView {
    let dish = use_dish();
    let id = StoredValue::new(input_id);
    let slider = move || dish.with_state(|s| id.with_value(|id| s.slider(id).cloned()));

    let Some(initial) = slider() else {
        return None;
    };
    let (min, max, step) = range_of(initial.field);
    let color = "#00d9ff";

    let position = move || slider().and_then(|s| s.position).unwrap_or(min);
    let percent = move || ((position() - min) / (max - min) * 100.0).clamp(0.0, 100.0);

    Some(view! {
        <div class="flex flex-col gap-1">
            <div class="flex justify-between items-baseline">
                <span class="text-[10px] text-[#888888]">{initial.output_id.clone()}</span>
                <span
                    id=initial.output_id.clone()
                    class="text-[11px] font-mono font-bold"
                    style=format!("color: {};", color)
                >
                    {move || slider().map(|s| s.label).unwrap_or_default()}
                </span>
            </div>
            <div class="w-full h-2 relative bg-[#222222] rounded-full">
                <div
                    class="absolute left-0 top-0 h-full rounded-full transition-all duration-100"
                    style=move || format!("width: {}%; background-color: {}; box-shadow: 0 0 6px {}60;", percent(), color, color)
                />
                <input
                    type="range"
                    id=initial.input_id.clone()
                    class="absolute inset-0 w-full h-full opacity-0 cursor-pointer"
                    min=min
                    max=max
                    step=step
                    prop:value=position
                    on:change=move |ev| {
                        dish.ui(UiEvent::Trigger(Trigger::SliderReleased {
                            input_id: id.get_value(),
                            value: FieldValue::from(event_target_value(&ev)),
                        }));
                    }
                />
                <div
                    class="absolute top-1/2 -translate-y-1/2 w-4 h-4 rounded-full border-2 bg-[#0a0a0a] transition-all duration-100"
                    style=move || format!("left: calc({}% - 8px); border-color: {};", percent(), color)
                />
            </div>
        </div>
    })
}

#[component]
pub fn DialSliders() -> impl IntoView {
    let dish = use_dish();
    let ids: Vec<String> = dish.with_state(|s| s.sliders.iter().map(|s| s.input_id.clone()).collect());

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2 space-y-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] uppercase tracking-wide">"Dials"</h2>
            {ids.into_iter().map(|input_id| view! { <DialSlider input_id=input_id /> }).collect_view()}
        </div>
    }
}
