use std::sync::Arc;

use bounce_core::Clock;
use bounce_core::model::{CompletedLevels, CourseCatalog, LevelContent, LevelId, SectionProgress, TrackId};
use bounce_core::playground::{Avatar, HeldKeys, StepOutcome, Viewport};
use bounce_core::registry::resolve_track_id;
use bounce_core::route::{AppRoute, Navigation};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::level_resolver::{LevelSource, resolve_initial_level};
use crate::progress_store::ProgressStore;

use super::debounce::{PendingSection, SectionDebouncer};
use super::mode::{CourseMode, Overlay};
use super::progress::CourseProgress;

/// Shared collaborators handed to every course screen.
#[derive(Clone)]
pub struct SessionDeps {
    pub store: ProgressStore,
    pub catalog: Arc<CourseCatalog>,
    pub clock: Clock,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of mounting the course screen for a route.
pub enum MountOutcome {
    /// The screen can render; apply the navigation first when present.
    Ready(Box<SessionController>, Option<Navigation>),
    /// Track unknown or unplayable; leave the screen.
    Redirect(Navigation),
}

/// What happened on one playground tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not roaming, or an overlay is open.
    Suspended,
    Moved,
    Blocked,
    /// The avatar walked through the exit and the current level opened.
    EnteredLevel(Navigation),
}

/// What a "complete" action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionStep {
    /// Nothing to complete in the current state.
    Ignored,
    /// The level's quiz is now showing; closing it advances.
    QuizShown,
    Advanced { next: LevelId, navigation: Navigation },
    /// The last level of the track was finished.
    CourseComplete(Navigation),
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// State machine behind the course screen for one track.
///
/// The controller owns the current level pointer, the playground avatar and
/// the single open overlay. Every level change goes through the progress
/// store, and every change of URL is reported back as a [`Navigation`].
pub struct SessionController {
    deps: SessionDeps,
    track: TrackId,
    level: LevelId,
    level_index: usize,
    mode: CourseMode,
    overlay: Option<Overlay>,
    quiz_shown: bool,
    avatar: Avatar,
    section: Option<SectionProgress>,
    debouncer: SectionDebouncer,
    completed: CompletedLevels,
}

impl SessionController {
    /// Build the controller for `/course/:track[/level/:level]`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the resolved position cannot be persisted.
    pub async fn mount(
        deps: SessionDeps,
        track_param: Option<&str>,
        level_param: Option<&str>,
    ) -> Result<MountOutcome, SessionError> {
        let Some(track) = resolve_track_id(track_param) else {
            debug!(track = ?track_param, "unknown track, redirecting home");
            return Ok(MountOutcome::Redirect(Navigation::replace(AppRoute::Home)));
        };

        let store = &deps.store;
        let stored = store.load_stored_progress().await;
        let Some(resolved) =
            resolve_initial_level(store.registry(), track, level_param, stored.as_ref())
        else {
            debug!(%track, "track has no levels, redirecting home");
            return Ok(MountOutcome::Redirect(Navigation::replace(AppRoute::Home)));
        };

        let section = stored
            .as_ref()
            .filter(|record| record.track() == track && record.level() == resolved.level)
            .and_then(|record| {
                Some(SectionProgress::new(
                    record.section_index()?,
                    record.total_sections()?,
                ))
            });
        store.persist_progress(track, resolved.level, section).await?;
        let completed = store.read_completed_levels().await;

        let (mode, navigation) = if resolved.source == LevelSource::Url {
            let canonical = AppRoute::course_level(track, resolved.level);
            let nav = (track_param != Some(track.as_str())).then(|| Navigation::replace(canonical));
            (CourseMode::InLevel(resolved.level), nav)
        } else {
            let canonical_track = track_param == Some(track.as_str());
            let nav = (level_param.is_some() || !canonical_track)
                .then(|| Navigation::replace(AppRoute::course(track)));
            (CourseMode::Playground, nav)
        };

        info!(%track, level = %resolved.level, source = ?resolved.source, "course mounted");
        let controller = Self {
            deps,
            track,
            level: resolved.level,
            level_index: resolved.index,
            mode,
            overlay: None,
            quiz_shown: false,
            avatar: Avatar::new(),
            section,
            debouncer: SectionDebouncer::default(),
            completed,
        };
        Ok(MountOutcome::Ready(Box::new(controller), navigation))
    }

    /// React to a URL change within the same track.
    ///
    /// A valid level opens it directly; an invalid one is replaced by the
    /// bare course route; no level returns to the playground.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if a newly selected level cannot be persisted.
    pub async fn apply_route(
        &mut self,
        level_param: Option<&str>,
    ) -> Result<Option<Navigation>, SessionError> {
        let registry = self.deps.store.registry();
        match (level_param, registry.validate_level_for_track(self.track, level_param)) {
            (_, Some(level)) => {
                if self.mode == CourseMode::InLevel(level) {
                    return Ok(None);
                }
                let Some(index) = registry.level_index(self.track, level) else {
                    return Ok(None);
                };
                self.open_level_at(index, level).await?;
                Ok(None)
            }
            (Some(raw), None) => {
                debug!(track = %self.track, level = raw, "level not in track, dropping it from the url");
                self.return_to_playground();
                Ok(Some(Navigation::replace(AppRoute::course(self.track))))
            }
            (None, None) => {
                self.return_to_playground();
                Ok(None)
            }
        }
    }

    /// Advance the playground by one tick.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if entering the level fails to persist.
    pub async fn tick(
        &mut self,
        keys: HeldKeys,
        viewport: Viewport,
    ) -> Result<TickOutcome, SessionError> {
        if !self.mode.is_playground() || self.overlay.is_some() {
            return Ok(TickOutcome::Suspended);
        }
        match self.avatar.step(keys, viewport) {
            StepOutcome::Moved => Ok(TickOutcome::Moved),
            StepOutcome::Blocked => Ok(TickOutcome::Blocked),
            StepOutcome::ReachedExit => {
                let navigation = self.enter_current_level().await?;
                Ok(TickOutcome::EnteredLevel(navigation))
            }
        }
    }

    /// Open the current level's content.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the position cannot be persisted.
    pub async fn enter_current_level(&mut self) -> Result<Navigation, SessionError> {
        let level = self.level;
        self.mode = CourseMode::InLevel(level);
        self.overlay = None;
        self.quiz_shown = false;
        self.deps
            .store
            .persist_progress(self.track, level, self.section)
            .await?;
        debug!(track = %self.track, %level, "entered level");
        Ok(Navigation::push(AppRoute::course_level(self.track, level)))
    }

    /// The learner pressed "complete" on the open level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if completion or the next position cannot be persisted.
    pub async fn complete_level(&mut self) -> Result<CompletionStep, SessionError> {
        let CourseMode::InLevel(level) = self.mode else {
            return Ok(CompletionStep::Ignored);
        };
        if self.overlay == Some(Overlay::Quiz) {
            return Ok(CompletionStep::Ignored);
        }

        let has_quiz = self.deps.catalog.quiz(level).is_some();
        if has_quiz && !self.quiz_shown {
            self.completed = self.deps.store.mark_level_complete(level).await?;
            self.quiz_shown = true;
            self.overlay = Some(Overlay::Quiz);
            return Ok(CompletionStep::QuizShown);
        }
        self.advance(level).await
    }

    /// Close the quiz overlay and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the next position cannot be persisted.
    pub async fn close_quiz(&mut self) -> Result<CompletionStep, SessionError> {
        match (self.mode, self.overlay) {
            (CourseMode::InLevel(level), Some(Overlay::Quiz)) => {
                self.overlay = None;
                self.advance(level).await
            }
            _ => Ok(CompletionStep::Ignored),
        }
    }

    async fn advance(&mut self, level: LevelId) -> Result<CompletionStep, SessionError> {
        let store = &self.deps.store;
        self.completed = store.mark_level_complete(level).await?;
        self.debouncer.discard();
        self.overlay = None;

        let Some(next) = store.registry().next_level(self.track, level) else {
            info!(track = %self.track, "track finished");
            return Ok(CompletionStep::CourseComplete(Navigation::push(
                AppRoute::CourseComplete { track: self.track },
            )));
        };

        store.persist_progress(self.track, next, None).await?;
        self.level = next;
        self.level_index += 1;
        self.section = None;
        self.quiz_shown = false;
        self.avatar.reset();
        self.mode = CourseMode::Playground;
        debug!(track = %self.track, %next, "advanced to next level");
        Ok(CompletionStep::Advanced {
            next,
            navigation: Navigation::push(AppRoute::course(self.track)),
        })
    }

    /// Jump straight into the level at `index`. Out of range is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the new position cannot be persisted.
    pub async fn jump_to_level(&mut self, index: usize) -> Result<Option<Navigation>, SessionError> {
        let Some(level) = self.deps.store.registry().level_at(self.track, index) else {
            debug!(track = %self.track, index, "roadmap jump out of range ignored");
            return Ok(None);
        };
        self.open_level_at(index, level).await?;
        Ok(Some(Navigation::push(AppRoute::course_level(self.track, level))))
    }

    async fn open_level_at(&mut self, index: usize, level: LevelId) -> Result<(), SessionError> {
        if index != self.level_index {
            self.debouncer.discard();
            self.section = None;
        }
        self.level = level;
        self.level_index = index;
        self.mode = CourseMode::InLevel(level);
        self.overlay = None;
        self.quiz_shown = false;
        self.deps
            .store
            .persist_progress(self.track, level, self.section)
            .await?;
        Ok(())
    }

    fn return_to_playground(&mut self) {
        if !self.mode.is_playground() {
            self.mode = CourseMode::Playground;
            self.overlay = self.overlay.filter(|overlay| !overlay.requires_level());
        }
    }

    /// Open `overlay`, replacing any other. Returns `false` when it needs an
    /// open level and none is open.
    pub fn open_overlay(&mut self, overlay: Overlay) -> bool {
        if overlay.requires_level() && self.mode.is_playground() {
            return false;
        }
        self.overlay = Some(overlay);
        true
    }

    /// Close whatever overlay is open. A quiz closed this way does not advance;
    /// use [`SessionController::close_quiz`] for that.
    pub fn close_overlay(&mut self) -> Option<Overlay> {
        self.overlay.take()
    }

    /// Remember how far the learner scrolled; written after a quiet period.
    pub fn record_section_progress(&mut self, section: SectionProgress) {
        let CourseMode::InLevel(level) = self.mode else {
            return;
        };
        self.section = Some(section);
        self.debouncer.record(
            PendingSection {
                track: self.track,
                level,
                section,
            },
            self.deps.clock.now(),
        );
    }

    /// Write the pending section update if its window has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the write fails.
    pub async fn flush_section_progress(&mut self) -> Result<bool, SessionError> {
        let Some(pending) = self.debouncer.take_due(self.deps.clock.now()) else {
            return Ok(false);
        };
        self.deps
            .store
            .persist_progress(pending.track, pending.level, Some(pending.section))
            .await?;
        Ok(true)
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn progress(&self) -> CourseProgress {
        let levels = self.levels();
        CourseProgress {
            level_number: self.level_index + 1,
            level_count: levels.len(),
            section_ratio: self.section.map_or(0.0, |s| s.ratio()),
            completed_in_track: levels
                .iter()
                .filter(|level| self.completed.contains(**level))
                .count(),
        }
    }

    #[must_use]
    pub fn track(&self) -> TrackId {
        self.track
    }

    #[must_use]
    pub fn levels(&self) -> &[LevelId] {
        self.deps.store.registry().track_levels(self.track)
    }

    /// The level the learner is on, whether or not it is open.
    #[must_use]
    pub fn level(&self) -> LevelId {
        self.level
    }

    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    #[must_use]
    pub fn content(&self) -> Option<&LevelContent> {
        self.deps.catalog.get(self.level())
    }

    #[must_use]
    pub fn mode(&self) -> CourseMode {
        self.mode
    }

    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    #[must_use]
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    #[must_use]
    pub fn section(&self) -> Option<SectionProgress> {
        self.section
    }

    #[must_use]
    pub fn completed(&self) -> &CompletedLevels {
        &self.completed
    }

    #[must_use]
    pub fn has_pending_section(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.deps.clock
    }
}
