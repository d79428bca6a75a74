use dioxus::prelude::*;
use services::ReviewDraft;
use services::review_board::MAX_RATING;
use tracing::warn;

use crate::context::AppContext;
use crate::views::user::use_current_user;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReviewCardVm, map_review_cards};

#[component]
pub fn ReviewsView() -> Element {
    let ctx = use_context::<AppContext>();
    let user = use_current_user();
    let mut rating = use_signal(|| MAX_RATING);
    let mut text = use_signal(String::new);
    let mut suggestions = use_signal(String::new);
    let mut message = use_signal(|| None::<String>);

    let board = ctx.reviews();
    let mut resource = use_resource(move || {
        let board = board.clone();
        async move { Ok::<_, ViewError>(map_review_cards(&board.list().await)) }
    });
    let state = view_state_from_resource(&resource);

    let board = ctx.reviews();
    let submit = move |_| {
        let Some(author) = user() else {
            return;
        };
        let board = board.clone();
        let extra = suggestions().trim().to_string();
        let draft = ReviewDraft {
            rating: rating(),
            text: text(),
            suggestions: (!extra.is_empty()).then_some(extra),
        };
        spawn(async move {
            match board.submit(&author, draft).await {
                Ok(_) => {
                    text.set(String::new());
                    suggestions.set(String::new());
                    message.set(None);
                    resource.restart();
                }
                Err(err) => {
                    warn!(error = %err, "review rejected");
                    message.set(Some(err.to_string()));
                }
            }
        });
    };

    let board = ctx.reviews();
    let like = move |id: String| {
        let board = board.clone();
        spawn(async move {
            match board.like(&id).await {
                Ok(_) => resource.restart(),
                Err(err) => warn!(error = %err, %id, "could not like review"),
            }
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Reviews" }
            if user.read().is_some() {
                div { class: "review-form",
                    div { class: "rating",
                        for star in 1..=MAX_RATING {
                            button {
                                key: "{star}",
                                r#type: "button",
                                class: if star <= rating() { "star star--on" } else { "star" },
                                onclick: move |_| rating.set(star),
                                "★"
                            }
                        }
                    }
                    textarea {
                        placeholder: "What did you think?",
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                    }
                    textarea {
                        placeholder: "Suggestions (optional)",
                        value: "{suggestions}",
                        oninput: move |evt| suggestions.set(evt.value()),
                    }
                    if let Some(message) = message() {
                        p { class: "error", "{message}" }
                    }
                    button { class: "primary", r#type: "button", onclick: submit, "Post review" }
                }
            } else {
                p { class: "muted", "Sign in from a course profile to leave a review." }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { "Loading reviews..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(cards) if cards.is_empty() => rsx! { p { class: "muted", "No reviews yet." } },
                ViewState::Ready(cards) => rsx! {
                    ul { class: "reviews",
                        for card in cards {
                            ReviewCard {
                                key: "{card.id}",
                                card: card.clone(),
                                on_like: {
                                    let like = like.clone();
                                    move |id: String| like(id)
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
fn ReviewCard(card: ReviewCardVm, on_like: EventHandler<String>) -> Element {
    let id = card.id.clone();
    rsx! {
        li { class: "review-card",
            header {
                strong { "{card.author}" }
                span { class: "stars", "{card.stars}" }
                span { class: "muted", "{card.date_str}" }
            }
            p { "{card.text}" }
            if let Some(suggestions) = card.suggestions.as_ref() {
                p { class: "muted", "Suggestions: {suggestions}" }
            }
            button {
                r#type: "button",
                onclick: move |_| on_like.call(id.clone()),
                "♥ {card.likes}"
            }
        }
    }
}
