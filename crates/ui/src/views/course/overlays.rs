use bounce_core::model::{CodeSnippet, LevelId, Quiz, UserProfile};
use dioxus::prelude::*;
use services::Overlay;
use services::api::{CreateCommentRequest, LevelComment};
use tracing::warn;

use super::account::ProfileOverlay;
use super::handle::CourseHandle;
use crate::context::AppContext;
use crate::views::user::use_current_user;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseScreenVm, RoadmapEntryVm};

#[component]
pub(super) fn OverlayLayer(vm: CourseScreenVm) -> Element {
    let Some(overlay) = vm.overlay else {
        return rsx! {};
    };
    let handle = use_context::<CourseHandle>();
    let close = handle.clone();

    let body = match overlay {
        Overlay::Quiz => match vm.quiz.clone() {
            Some(quiz) => rsx! { QuizOverlay { quiz } },
            None => rsx! {},
        },
        Overlay::CodeViewer => match vm.snippet.clone() {
            Some(snippet) => rsx! { CodeOverlay { snippet } },
            None => rsx! {},
        },
        Overlay::Roadmap => rsx! { RoadmapOverlay { entries: vm.roadmap.clone() } },
        Overlay::Chat => rsx! { DiscussionOverlay { level: vm.level } },
        Overlay::Profile => rsx! { ProfileOverlay {} },
    };

    rsx! {
        div { class: "overlay",
            div { class: "overlay-card",
                if overlay != Overlay::Quiz {
                    button {
                        class: "overlay-close",
                        r#type: "button",
                        onclick: move |_| close.close_overlay(),
                        "×"
                    }
                }
                {body}
            }
        }
    }
}

#[component]
fn QuizOverlay(quiz: Quiz) -> Element {
    let handle = use_context::<CourseHandle>();
    let mut chosen = use_signal(|| None::<usize>);
    let feedback = chosen().map(|choice| quiz.check(choice));

    rsx! {
        h3 { "Quick check" }
        p { "{quiz.question}" }
        ol { class: "quiz-options",
            for (index, option) in quiz.options.iter().enumerate() {
                li { key: "{index}",
                    button {
                        r#type: "button",
                        class: match feedback {
                            Some(f) if f.correct_index == index => "quiz-option quiz-option--correct",
                            Some(_) if chosen() == Some(index) => "quiz-option quiz-option--wrong",
                            _ => "quiz-option",
                        },
                        disabled: feedback.is_some(),
                        onclick: move |_| chosen.set(Some(index)),
                        "{option}"
                    }
                }
            }
        }
        if let Some(feedback) = feedback {
            p { class: "quiz-feedback",
                if feedback.correct { "Correct! " } else { "Not quite. " }
                "{quiz.explanation}"
            }
            button {
                class: "primary",
                r#type: "button",
                onclick: move |_| handle.close_quiz(),
                "Continue"
            }
        }
    }
}

#[component]
fn CodeOverlay(snippet: CodeSnippet) -> Element {
    rsx! {
        h3 { "{snippet.title}" }
        p { "{snippet.description}" }
        pre { class: "code language-{snippet.language}",
            code { "{snippet.code}" }
        }
    }
}

#[component]
fn RoadmapOverlay(entries: Vec<RoadmapEntryVm>) -> Element {
    let handle = use_context::<CourseHandle>();
    rsx! {
        h3 { "Roadmap" }
        ol { class: "roadmap",
            for entry in entries {
                li {
                    key: "{entry.index}",
                    class: if entry.current { "roadmap-entry roadmap-entry--current" } else { "roadmap-entry" },
                    button {
                        r#type: "button",
                        onclick: {
                            let handle = handle.clone();
                            move |_| handle.jump(entry.index)
                        },
                        if entry.completed { "✓ " }
                        "{entry.title}"
                        if entry.capstone { " (capstone)" }
                    }
                }
            }
        }
    }
}

#[component]
fn DiscussionOverlay(level: LevelId) -> Element {
    let ctx = use_context::<AppContext>();
    let user = use_current_user();
    let mut draft = use_signal(String::new);

    let comments = ctx.comments();
    let mut resource = use_resource(use_reactive!(|(level,)| {
        let comments = comments.clone();
        async move {
            comments.list(level).await.map_err(|err| {
                warn!(error = %err, %level, "could not load comments");
                ViewError::Unknown
            })
        }
    }));
    let state = view_state_from_resource(&resource);

    let client = ctx.comments();
    let post = move |_| {
        let Some(author) = user() else {
            return;
        };
        let content = draft().trim().to_string();
        if content.is_empty() {
            return;
        }
        let client = client.clone();
        spawn(async move {
            let request = CreateCommentRequest {
                content,
                level_id: level,
                author: author.name,
                author_email: Some(author.email),
                author_avatar: author.avatar,
            };
            match client.create(&request).await {
                Ok(_) => {
                    draft.set(String::new());
                    resource.restart();
                }
                Err(err) => warn!(error = %err, "could not post comment"),
            }
        });
    };

    let client = ctx.comments();
    let remove = move |id: i64| {
        let client = client.clone();
        spawn(async move {
            match client.delete(id).await {
                Ok(()) => resource.restart(),
                Err(err) => warn!(error = %err, id, "could not delete comment"),
            }
        });
    };

    rsx! {
        h3 { "Discussion" }
        match state {
            ViewState::Idle | ViewState::Loading => rsx! { p { "Loading comments..." } },
            ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
            ViewState::Ready(list) => rsx! {
                CommentList { comments: list, viewer: user(), on_delete: remove }
            },
        }
        if user.read().is_some() {
            textarea {
                value: "{draft}",
                placeholder: "Share a thought about this level",
                oninput: move |evt| draft.set(evt.value()),
            }
            button { r#type: "button", onclick: post, "Post" }
        } else {
            p { class: "muted", "Sign in from your profile to join the discussion." }
        }
    }
}

#[component]
fn CommentList(
    comments: Vec<LevelComment>,
    viewer: Option<UserProfile>,
    on_delete: EventHandler<i64>,
) -> Element {
    if comments.is_empty() {
        return rsx! { p { class: "muted", "No comments yet." } };
    }
    rsx! {
        ul { class: "comments",
            for comment in comments {
                li { key: "{comment.id}",
                    strong { "{comment.author}" }
                    p { "{comment.content}" }
                    if viewer.as_ref().is_some_and(|user| comment.is_owned_by(user)) {
                        button {
                            class: "comment-delete",
                            r#type: "button",
                            onclick: move |_| on_delete.call(comment.id),
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
