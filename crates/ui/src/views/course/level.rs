use bounce_core::model::SectionProgress;
use dioxus::prelude::*;
use services::Overlay;

use super::handle::CourseHandle;

/// `/course/:track/level/:level_id`: lesson content for one level.
#[component]
pub fn CourseLevelView(track: String, level_id: String) -> Element {
    let handle = use_context::<CourseHandle>();
    let apply = handle.clone();
    use_effect(use_reactive!(|(level_id,)| {
        apply.apply_route(Some(level_id));
    }));

    let Some(vm) = handle.screen() else {
        return rsx! {};
    };
    if !vm.in_level() {
        return rsx! {};
    }

    let total = u32::try_from(vm.sections.len()).unwrap_or(u32::MAX);
    let next_section = u32::try_from(vm.section_index + 1).unwrap_or(u32::MAX);
    let read = handle.clone();
    let code = handle.clone();
    let chat = handle.clone();
    let complete = handle.clone();

    rsx! {
        article { class: "level", "data-track": "{track}",
            p { class: "level-category", "{vm.category}" }
            h2 { "{vm.level_title}" }
            for (index, section) in vm.sections.iter().take(vm.section_index + 1).enumerate() {
                p { key: "{index}", class: "level-section", "{section}" }
            }
            div { class: "level-actions",
                if vm.has_next_section() {
                    button {
                        r#type: "button",
                        onclick: move |_| read.read_section(SectionProgress::new(next_section, total)),
                        "Continue reading"
                    }
                }
                if vm.snippet.is_some() {
                    button {
                        r#type: "button",
                        onclick: move |_| code.open_overlay(Overlay::CodeViewer),
                        "View code"
                    }
                }
                button {
                    r#type: "button",
                    onclick: move |_| chat.open_overlay(Overlay::Chat),
                    "Discussion"
                }
                button {
                    class: "primary",
                    r#type: "button",
                    onclick: move |_| complete.complete(),
                    "Complete level"
                }
            }
        }
    }
}
