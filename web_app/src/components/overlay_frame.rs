use leptos::prelude::*;
use satfinder::{Overlay, UiEvent};
use wasm_bindgen::JsCast;

use super::use_dish;

/// Modal container shared by both overlays.
///
/// The container stays mounted; only its visibility class follows the
/// overlay state. A click that lands on the dimmed backdrop (the container
/// itself) closes the overlay, clicks inside the dialog do not.
#[component]
pub fn OverlayFrame(overlay: Overlay, #[prop(into)] title: String, children: Children) -> impl IntoView {
    let dish = use_dish();
    let active = move || dish.with_state(|s| s.overlays.is_active(overlay));

    view! {
        <div
            id=overlay.container_id()
            class=move || if active() {
                "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50"
            } else {
                "hidden"
            }
            on:click=move |ev| {
                let target_id = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .map(|el| el.id())
                    .unwrap_or_default();
                dish.ui(UiEvent::OverlayClicked { overlay, target_id });
            }
        >
            <div class="bg-[#111111] border border-[#ffffff10] rounded-lg p-6 max-w-md w-full mx-4">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-semibold text-white">{title}</h2>
                    <button
                        class=format!("{} text-[#888888] hover:text-white transition-colors", overlay.tag())
                        on:click=move |_| dish.ui(UiEvent::ToggleOverlays(vec![overlay]))
                    >
                        <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                        </svg>
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}
