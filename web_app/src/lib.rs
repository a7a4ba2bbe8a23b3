use leptos::prelude::*;
use leptos::mount::mount_to_body;
use wasm_bindgen::prelude::*;

mod components;
mod websocket;

use components::{DialSliders, ManualOverlay, Readouts, SettingsOverlay, TopBar};
use websocket::DishConnection;

#[wasm_bindgen(start)]
pub fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    let dish = DishConnection::new();
    provide_context(dish);

    view! {
        <div class="min-h-screen bg-[#0a0a0a] text-white flex flex-col">
            <TopBar/>
            <main class="flex-1 grid grid-cols-1 md:grid-cols-2 gap-2 p-2">
                <Readouts/>
                <DialSliders/>
            </main>
            <ManualOverlay/>
            <SettingsOverlay/>
        </div>
    }
}
