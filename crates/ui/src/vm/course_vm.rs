use bounce_core::model::{CodeSnippet, CourseCatalog, LevelContent, LevelId, Quiz};
use bounce_core::registry::is_capstone;
use services::{CourseMode, Overlay, SessionController};

#[derive(Clone, Debug, PartialEq)]
pub struct RoadmapEntryVm {
    pub index: usize,
    pub title: String,
    pub completed: bool,
    pub current: bool,
    pub capstone: bool,
}

/// Everything the course screen renders for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseScreenVm {
    pub track_label: &'static str,
    pub level: LevelId,
    pub level_title: String,
    pub level_label: String,
    pub percent: u8,
    pub mode: CourseMode,
    pub overlay: Option<Overlay>,
    pub avatar_style: String,
    pub roadmap: Vec<RoadmapEntryVm>,
    pub description: String,
    pub category: String,
    /// Reading sections of the open level; the first is the description.
    pub sections: Vec<String>,
    pub section_index: usize,
    pub snippet: Option<CodeSnippet>,
    pub quiz: Option<Quiz>,
}

impl CourseScreenVm {
    #[must_use]
    pub fn in_level(&self) -> bool {
        !self.mode.is_playground()
    }

    #[must_use]
    pub fn has_next_section(&self) -> bool {
        self.section_index + 1 < self.sections.len()
    }
}

fn sections_for(content: Option<&LevelContent>) -> Vec<String> {
    let Some(content) = content else {
        return Vec::new();
    };
    std::iter::once(content.description.clone())
        .chain(content.topics.iter().cloned())
        .collect()
}

#[must_use]
pub fn map_course_screen(controller: &SessionController, catalog: &CourseCatalog) -> CourseScreenVm {
    let progress = controller.progress();
    let level = controller.level();
    let content = controller.content();
    let position = controller.avatar().position();
    let sections = sections_for(content);
    let section_index = controller
        .section()
        .map_or(0, |s| usize::try_from(s.section_index).unwrap_or(usize::MAX))
        .min(sections.len().saturating_sub(1));

    let roadmap = controller
        .levels()
        .iter()
        .enumerate()
        .map(|(index, entry)| RoadmapEntryVm {
            index,
            title: catalog.title(*entry).to_string(),
            completed: controller.completed().contains(*entry),
            current: index == controller.level_index(),
            capstone: is_capstone(*entry),
        })
        .collect();

    CourseScreenVm {
        track_label: controller.track().label(),
        level,
        level_title: catalog.title(level).to_string(),
        level_label: format!("Level {} of {}", progress.level_number, progress.level_count),
        percent: progress.percent(),
        mode: controller.mode(),
        overlay: controller.overlay(),
        avatar_style: format!(
            "left: {:.0}px; top: {:.0}px; transform: rotate({:.0}deg);",
            position.x,
            position.y,
            controller.avatar().rotation()
        ),
        roadmap,
        description: content.map(|c| c.description.clone()).unwrap_or_default(),
        category: content.map(|c| c.category.clone()).unwrap_or_default(),
        sections,
        section_index,
        snippet: content.and_then(|c| c.code_snippet.clone()),
        quiz: content.and_then(|c| c.quiz.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounce_core::model::{LevelId, SectionProgress, TrackId};
    use bounce_core::time::fixed_clock;
    use services::{AppServices, MountOutcome};

    async fn controller(track: &str, level: Option<&str>) -> (AppServices, Box<SessionController>) {
        let services = AppServices::in_memory(fixed_clock()).await.unwrap();
        let outcome = SessionController::mount(services.session_deps(), Some(track), level)
            .await
            .unwrap();
        let MountOutcome::Ready(controller, _) = outcome else {
            panic!("expected the course to mount");
        };
        (services, controller)
    }

    #[tokio::test]
    async fn playground_screen_lists_roadmap() {
        let (services, controller) = controller("system-design", None).await;
        let vm = map_course_screen(&controller, &services.catalog());

        assert_eq!(vm.track_label, TrackId::SystemDesign.label());
        assert_eq!(vm.level_label, "Level 1 of 13");
        assert!(!vm.in_level());
        assert_eq!(vm.roadmap.len(), 13);
        assert!(vm.roadmap[0].current);
        assert!(vm.roadmap[12].capstone);
        assert_eq!(vm.avatar_style, "left: 50px; top: 300px; transform: rotate(0deg);");
    }

    #[tokio::test]
    async fn level_screen_tracks_reading_position() {
        let (services, mut controller) =
            controller("system-design", Some(LevelId::Caching.as_str())).await;
        let total = u32::try_from(
            services
                .catalog()
                .get(LevelId::Caching)
                .map_or(0, |c| c.topics.len() + 1),
        )
        .unwrap();
        controller.record_section_progress(SectionProgress::new(1, total));

        let vm = map_course_screen(&controller, &services.catalog());
        assert!(vm.in_level());
        assert_eq!(vm.section_index, 1);
        assert_eq!(vm.sections.len(), total as usize);
        assert!(vm.quiz.is_some());
    }
}
