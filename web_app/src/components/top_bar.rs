//! Header with link status and overlay toggles.

use leptos::prelude::*;
use satfinder::{LinkState, Overlay, UiEvent};

use super::use_dish;

#[component]
pub fn TopBar() -> impl IntoView {
    let dish = use_dish();
    let link = move || dish.with_state(|s| s.link);

    let toggle = move |overlays: Vec<Overlay>| {
        move |_: web_sys::MouseEvent| dish.ui(UiEvent::ToggleOverlays(overlays.clone()))
    };

    view! {
        <header class="h-9 bg-[#111111] border-b border-[#ffffff10] flex items-center px-3 shrink-0">
            <div class="flex items-center space-x-2">
                <div class="w-6 h-6 bg-[#00d9ff] rounded flex items-center justify-center">
                    <svg class="w-3.5 h-3.5 text-black" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 3v3m0 12v3M3 12h3m12 0h3M7.05 7.05l2.12 2.12m5.66 5.66l2.12 2.12"/>
                    </svg>
                </div>
                <h1 class="text-xs font-semibold text-white">"SatFinder"</h1>
            </div>

            <div class="flex-1"></div>

            <div class="flex items-center space-x-2">
                <button
                    class="manual text-[10px] text-[#888888] hover:text-white px-2 py-1 rounded hover:bg-[#ffffff08] transition-colors"
                    on:click=toggle(vec![Overlay::Manual])
                >
                    "Manual"
                </button>
                <button
                    class="settings text-[10px] text-[#888888] hover:text-white px-2 py-1 rounded hover:bg-[#ffffff08] transition-colors"
                    on:click=toggle(vec![Overlay::Settings])
                >
                    "Settings"
                </button>
                <div class="flex items-center space-x-1.5 px-2 py-1">
                    <div class=move || match link() {
                        LinkState::Open => "w-1.5 h-1.5 bg-[#00d9ff] rounded-full animate-pulse",
                        LinkState::Connecting => "w-1.5 h-1.5 bg-[#ffaa00] rounded-full",
                        LinkState::Closed => "w-1.5 h-1.5 bg-[#ff4444] rounded-full",
                    }></div>
                    <span class="text-[10px] text-[#888888]">{move || link().to_string()}</span>
                </div>
            </div>
        </header>
    }
}
