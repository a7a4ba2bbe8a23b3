//! Manual move controls.

use leptos::prelude::*;
use satfinder::packets::{FieldValue, AZ_DOWN, AZ_UP, EL_DOWN, EL_UP};
use satfinder::state::ManualField;
use satfinder::{Overlay, UiEvent};
use wasm_bindgen::JsCast;

use super::overlay_frame::OverlayFrame;
use super::{click, use_dish};

const INPUT_CLASS: &str = "w-full bg-[#1a1a1a] border border-[#ffffff08] rounded px-3 py-2 text-white text-sm focus:border-[#00d9ff] focus:outline-none";
const BUTTON_CLASS: &str = "bg-[#1a1a1a] hover:bg-[#00d9ff] border border-[#ffffff08] hover:border-[#00d9ff] text-white hover:text-black font-medium py-2 rounded transition-colors text-xs";

fn edited<T: JsCast>(field: ManualField, ev: &T) -> UiEvent {
    UiEvent::ManualEdited { field, value: FieldValue::from(event_target_value(ev)) }
}

#[component]
pub fn ManualOverlay() -> impl IntoView {
    let dish = use_dish();

    view! {
        <OverlayFrame overlay=Overlay::Manual title="Manual Control">
            <div class="space-y-4">
                <div class="grid grid-cols-2 gap-2 text-xs font-mono tabular-nums">
                    <div class="flex justify-between bg-[#111111] rounded px-2 py-1">
                        <span class="text-[#666666]">"Az"</span>
                        <span id="om_azimut" class="text-white">{move || dish.with_state(|s| s.display.azimut.clone())}"°"</span>
                    </div>
                    <div class="flex justify-between bg-[#111111] rounded px-2 py-1">
                        <span class="text-[#666666]">"El"</span>
                        <span id="om_elevation" class="text-white">{move || dish.with_state(|s| s.display.elevation.clone())}"°"</span>
                    </div>
                </div>

                <div class="grid grid-cols-3 gap-2">
                    <div>
                        <label class="block text-[#888888] text-xs mb-1.5">"Time (s)"</label>
                        <input
                            id="om_time"
                            type="number"
                            class=INPUT_CLASS
                            prop:value=move || dish.with_state(|s| s.manual.time.to_string())
                            on:input=move |ev| dish.ui(edited(ManualField::Time, &ev))
                        />
                    </div>
                    <div>
                        <label class="block text-[#888888] text-xs mb-1.5">"Speed"</label>
                        <input
                            id="om_speed"
                            type="number"
                            class=INPUT_CLASS
                            prop:value=move || dish.with_state(|s| s.manual.speed.to_string())
                            on:input=move |ev| dish.ui(edited(ManualField::Speed, &ev))
                        />
                    </div>
                    <div>
                        <label class="block text-[#888888] text-xs mb-1.5">"Steps"</label>
                        <select
                            id="om_steps"
                            class=INPUT_CLASS
                            prop:value=move || dish.with_state(|s| s.manual.steps.clone())
                            on:change=move |ev| dish.ui(edited(ManualField::Steps, &ev))
                        >
                            <option value="short">"Short"</option>
                            <option value="long">"Long"</option>
                        </select>
                    </div>
                </div>

                <div class="grid grid-cols-3 gap-2">
                    <div></div>
                    <button id=EL_UP class=BUTTON_CLASS on:click=click(dish, EL_UP)>"El ▲"</button>
                    <div></div>
                    <button id=AZ_DOWN class=BUTTON_CLASS on:click=click(dish, AZ_DOWN)>"◀ Az"</button>
                    <button id="om_stop" class=BUTTON_CLASS on:click=click(dish, "om_stop")>"Stop"</button>
                    <button id=AZ_UP class=BUTTON_CLASS on:click=click(dish, AZ_UP)>"Az ▶"</button>
                    <div></div>
                    <button id=EL_DOWN class=BUTTON_CLASS on:click=click(dish, EL_DOWN)>"El ▼"</button>
                    <div></div>
                </div>
            </div>
        </OverlayFrame>
    }
}
