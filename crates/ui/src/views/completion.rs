use bounce_core::registry::resolve_track_id;
use bounce_core::route::{AppRoute, Navigation};
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::sessions::{choose_another_track, retry_track};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::navigate;
use crate::views::ViewError;

#[component]
pub fn CourseCompleteView(track: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<ViewError>);
    let resolved = resolve_track_id(Some(&track));

    use_effect(use_reactive!(|(resolved,)| {
        if resolved.is_none() {
            navigate(navigator, Navigation::replace(AppRoute::Home));
        }
    }));

    let Some(track) = resolved else {
        return rsx! {};
    };
    let level_count = ctx.progress().registry().level_count(track);

    let store = ctx.progress();
    let retry = move |_| {
        let store = store.clone();
        spawn(async move {
            match retry_track(&store, track).await {
                Ok(Some(navigation)) => navigate(navigator, navigation),
                Ok(None) => navigate(navigator, choose_another_track()),
                Err(err) => {
                    warn!(error = %err, %track, "could not restart track");
                    error.set(Some(ViewError::Storage));
                }
            }
        });
    };

    rsx! {
        div { class: "page completion",
            h2 { "Course complete!" }
            p { "You finished all {level_count} levels of {track.label()}." }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            div { class: "actions",
                button { class: "primary", r#type: "button", onclick: retry, "Retry track" }
                button {
                    r#type: "button",
                    onclick: move |_| navigate(navigator, choose_another_track()),
                    "Choose another track"
                }
            }
        }
    }
}
