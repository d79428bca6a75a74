mod controller;
mod debounce;
mod launch;
mod mode;
mod progress;

// Public API of the course session subsystem.
pub use crate::error::SessionError;
pub use controller::{CompletionStep, MountOutcome, SessionController, SessionDeps, TickOutcome};
pub use debounce::{PendingSection, SECTION_FLUSH_DELAY_MS, SectionDebouncer};
pub use launch::{choose_another_track, retry_track, start_track};
pub use mode::{CourseMode, Overlay};
pub use progress::CourseProgress;
