mod top_bar;
mod readouts;
mod dial_slider;
mod overlay_frame;
mod manual_overlay;
mod settings_overlay;

pub use top_bar::TopBar;
pub use readouts::Readouts;
pub use dial_slider::DialSliders;
pub use manual_overlay::ManualOverlay;
pub use settings_overlay::SettingsOverlay;

use leptos::prelude::*;
use satfinder::{Trigger, UiEvent};

use crate::websocket::DishConnection;

pub(crate) fn use_dish() -> DishConnection {
    use_context::<DishConnection>().expect("DishConnection not found")
}

/// Click handler that dispatches the clicked element's id.
pub(crate) fn click(dish: DishConnection, element_id: &'static str) -> impl Fn(web_sys::MouseEvent) + Clone {
    move |_| dish.ui(UiEvent::Trigger(Trigger::Clicked(element_id.to_string())))
}
