use bounce_core::model::TrackId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::sessions::start_track;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::navigate;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TrackCardVm, map_track_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<ViewError>);

    let progress = ctx.progress();
    let catalog = ctx.catalog();
    let resource = use_resource(move || {
        let progress = progress.clone();
        let catalog = catalog.clone();
        async move {
            let completed = progress.read_completed_levels().await;
            let stored = progress.load_stored_progress().await;
            Ok::<_, ViewError>(map_track_cards(
                progress.registry(),
                &catalog,
                &completed,
                stored.as_ref(),
            ))
        }
    });
    let state = view_state_from_resource(&resource);

    let store = ctx.progress();
    let start = move |track: TrackId| {
        let store = store.clone();
        spawn(async move {
            match start_track(&store, track).await {
                Ok(Some(navigation)) => navigate(navigator, navigation),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, %track, "could not start track");
                    error.set(Some(ViewError::Storage));
                }
            }
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Tracks" }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { "Loading tracks..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(cards) => rsx! {
                    div { class: "track-grid",
                        for card in cards {
                            TrackCard {
                                key: "{card.track}",
                                card: card.clone(),
                                on_start: {
                                    let start = start.clone();
                                    move |track: TrackId| start(track)
                                },
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TrackCard(card: TrackCardVm, on_start: EventHandler<TrackId>) -> Element {
    let track = card.track;
    rsx! {
        article { class: "track-card",
            h3 { "{card.label}" }
            p { class: "muted", "{card.completed_count} of {card.level_count} levels complete" }
            if let Some(title) = card.resume_title.as_ref() {
                p { "Resume at {title}" }
            }
            button {
                class: "primary",
                r#type: "button",
                onclick: move |_| on_start.call(track),
                "{card.cta()}"
            }
        }
    }
}
