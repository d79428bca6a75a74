use bounce_core::playground::{AVATAR_SIZE, EXIT_ZONE_WIDTH, HeldKeys, OBSTACLES};
use dioxus::prelude::*;

use super::handle::CourseHandle;
use crate::vm::apply_key;

/// `/course/:track`: the avatar roams until it walks into the exit.
#[component]
pub fn CourseView(track: String) -> Element {
    let handle = use_context::<CourseHandle>();
    let apply = handle.clone();
    use_effect(move || apply.apply_route(None));

    let enter = handle.clone();
    let Some(vm) = handle.screen() else {
        return rsx! {};
    };
    let held = handle.keys();

    rsx! {
        section { class: "playground", "data-track": "{track}",
            p { class: "playground-hint",
                "Use the arrow keys or WASD. Walk through the glowing edge to open "
                strong { "{vm.level_title}" }
                "."
            }
            for obstacle in OBSTACLES {
                div {
                    key: "{obstacle.id}",
                    class: "obstacle",
                    style: "left: {obstacle.rect.x}px; top: {obstacle.rect.y}px; width: {obstacle.rect.w}px; height: {obstacle.rect.h}px;",
                }
            }
            div { class: "exit-zone", style: "width: {EXIT_ZONE_WIDTH}px;" }
            div {
                class: "avatar",
                style: "{vm.avatar_style} width: {AVATAR_SIZE}px; height: {AVATAR_SIZE}px;",
            }
            DirectionPad { held }
            button {
                class: "playground-skip",
                r#type: "button",
                onclick: move |_| enter.enter_level(),
                "Open level"
            }
        }
    }
}

/// On-screen controls for pointer users.
#[component]
fn DirectionPad(held: Signal<HeldKeys>) -> Element {
    let mut held = held;
    let pad = [("▲", "ArrowUp"), ("◀", "ArrowLeft"), ("▼", "ArrowDown"), ("▶", "ArrowRight")];
    rsx! {
        div { class: "pad",
            for (label, key) in pad {
                button {
                    key: "{key}",
                    r#type: "button",
                    onmousedown: move |_| {
                        let next = apply_key(*held.peek(), key, true);
                        held.set(next);
                    },
                    onmouseup: move |_| {
                        let next = apply_key(*held.peek(), key, false);
                        held.set(next);
                    },
                    onmouseleave: move |_| {
                        let next = apply_key(*held.peek(), key, false);
                        held.set(next);
                    },
                    "{label}"
                }
            }
        }
    }
}
