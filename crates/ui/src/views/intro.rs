use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::routes::{Route, StartRoute};

#[component]
pub fn IntroView() -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        let Some(start) = try_consume_context::<StartRoute>() else {
            return;
        };
        if let Some(route) = start.take().filter(|route| *route != Route::Intro {}) {
            tracing::info!(path = %route, "opening start route");
            navigator.replace(route);
        }
    });

    rsx! {
        div { class: "page intro",
            h1 { "Bounce" }
            p { "Walk the playground and step through the exit to open the next level." }
            Link { class: "primary", to: Route::Home {}, "Choose a track" }
        }
    }
}
