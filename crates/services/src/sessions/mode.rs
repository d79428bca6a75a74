use bounce_core::model::LevelId;

/// What the course screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseMode {
    /// The avatar roams freely; no lesson content.
    Playground,
    /// Lesson content, quiz and discussion for one level.
    InLevel(LevelId),
}

impl CourseMode {
    #[must_use]
    pub fn level(&self) -> Option<LevelId> {
        match self {
            CourseMode::Playground => None,
            CourseMode::InLevel(level) => Some(*level),
        }
    }

    #[must_use]
    pub fn is_playground(&self) -> bool {
        matches!(self, CourseMode::Playground)
    }
}

/// Modal layered over the course screen. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Quiz,
    CodeViewer,
    Roadmap,
    Chat,
    Profile,
}

impl Overlay {
    /// Overlays that only make sense while a level is open.
    #[must_use]
    pub fn requires_level(self) -> bool {
        matches!(self, Overlay::Quiz | Overlay::CodeViewer)
    }
}
