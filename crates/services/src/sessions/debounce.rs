use chrono::{DateTime, Duration, Utc};

use bounce_core::model::{LevelId, SectionProgress, TrackId};

/// Quiet period before a section update is written.
pub const SECTION_FLUSH_DELAY_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSection {
    pub track: TrackId,
    pub level: LevelId,
    pub section: SectionProgress,
}

/// Trailing-edge debounce for section progress writes.
///
/// Each update restarts the window and replaces the previous one; only the
/// last update of a window is ever handed out.
#[derive(Debug, Clone)]
pub struct SectionDebouncer {
    delay: Duration,
    pending: Option<(PendingSection, DateTime<Utc>)>,
}

impl Default for SectionDebouncer {
    fn default() -> Self {
        Self::new(Duration::milliseconds(SECTION_FLUSH_DELAY_MS))
    }
}

impl SectionDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn record(&mut self, update: PendingSection, now: DateTime<Utc>) {
        self.pending = Some((update, now + self.delay));
    }

    /// Hand out the pending update once its window has elapsed.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<PendingSection> {
        match self.pending {
            Some((update, deadline)) if now >= deadline => {
                self.pending = None;
                Some(update)
            }
            _ => None,
        }
    }

    /// Drop whatever is pending without writing it.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
