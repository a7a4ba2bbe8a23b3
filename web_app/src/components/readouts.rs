use leptos::prelude::*;
use satfinder::state::TelemetryDisplay;

use super::use_dish;

#[component]
fn Readout(
    #[prop(into)] label: String,
    value: fn(&TelemetryDisplay) -> String,
    #[prop(default = "°")] unit: &'static str,
) -> impl IntoView {
    let dish = use_dish();
    view! {
        <div class="flex justify-between items-center bg-[#111111] rounded px-1.5 py-1">
            <span class="text-[#666666] text-[10px] font-medium">{label}</span>
            <span class="text-[11px] font-mono text-white tabular-nums">
                {move || dish.with_state(|s| value(&s.display))}
                <span class="text-[#555555] ml-0.5">{unit}</span>
            </span>
        </div>
    }
}

/// Live telemetry panel.
#[component]
pub fn Readouts() -> impl IntoView {
    let dish = use_dish();

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] mb-1.5 uppercase tracking-wide">
                "Dish"
                <span id="state" class="ml-2 text-[#888888] normal-case">
                    {move || dish.with_state(|s| s.display.state.clone())}
                </span>
            </h2>
            <div class="space-y-0.5">
                <Readout label="Azimuth" value=|d| d.azimut.clone() />
                <Readout label="Elevation" value=|d| d.elevation.clone() />
                <Readout label="Satellite azimuth" value=|d| d.s_azimut.clone() />
                <Readout label="Satellite elevation" value=|d| d.s_elevation.clone() />
                <Readout label="Signal" value=|d| d.led_level.clone() unit="%" />
            </div>
        </div>
    }
}
