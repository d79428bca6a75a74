use bounce_core::playground::{TICK_INTERVAL, Viewport};
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, use_navigator, use_route};
use services::{Overlay, SessionController};

use super::handle::CourseHandle;
use super::overlays::OverlayLayer;
use super::slot::ControllerSlot;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{CourseScreenVm, apply_key};

/// Course screen for one track, shared by the playground and level pages.
#[component]
pub fn CourseShell(track: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let controller = use_signal(ControllerSlot::<Box<SessionController>>::default);
    let screen = use_signal(|| None::<CourseScreenVm>);
    let keys = use_signal(Default::default);
    let error = use_signal(|| None);
    let catalog = ctx.catalog();
    let handle = use_context_provider(|| {
        CourseHandle::new(controller, screen, keys, error, catalog, navigator)
    });

    let deps = ctx.session_deps();
    let mount_handle = handle.clone();
    let resource = use_resource(use_reactive!(|(track,)| {
        let deps = deps.clone();
        let handle = mount_handle.clone();
        let level = match &route {
            Route::CourseLevel { level_id, .. } => Some(level_id.clone()),
            _ => None,
        };
        async move { handle.mount(deps, track, level).await }
    }));

    let tick_handle = handle.clone();
    use_future(move || {
        let handle = tick_handle.clone();
        async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                handle.tick(Viewport::default()).await;
            }
        }
    });

    let state = view_state_from_resource(&resource);
    let mut held = handle.keys();

    rsx! {
        div {
            class: "course",
            tabindex: 0,
            autofocus: true,
            onkeydown: move |evt| {
                let next = apply_key(*held.peek(), &evt.key().to_string(), true);
                held.set(next);
            },
            onkeyup: move |evt| {
                let next = apply_key(*held.peek(), &evt.key().to_string(), false);
                held.set(next);
            },

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading course..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to tracks" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = handle.screen() {
                        CourseTopBar { vm: vm.clone() }
                        if let Some(err) = handle.error() {
                            p { class: "error", "{err.message()}" }
                        }
                        Outlet::<Route> {}
                        OverlayLayer { vm }
                    }
                },
            }
        }
    }
}

#[component]
fn CourseTopBar(vm: CourseScreenVm) -> Element {
    let handle = use_context::<CourseHandle>();
    let roadmap = handle.clone();
    let profile = handle.clone();

    rsx! {
        header { class: "course-top",
            Link { class: "course-back", to: Route::Home {}, "← Tracks" }
            div { class: "course-title",
                span { class: "course-track", "{vm.track_label}" }
                span { class: "course-level", "{vm.level_label}: {vm.level_title}" }
            }
            div { class: "course-progress",
                div { class: "course-progress-bar", style: "width: {vm.percent}%;" }
                span { "{vm.percent}%" }
            }
            button {
                r#type: "button",
                onclick: move |_| roadmap.open_overlay(Overlay::Roadmap),
                "Roadmap"
            }
            button {
                r#type: "button",
                onclick: move |_| profile.open_overlay(Overlay::Profile),
                "Profile"
            }
        }
    }
}
