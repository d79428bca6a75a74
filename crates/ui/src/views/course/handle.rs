use std::sync::Arc;
use std::time::Duration;

use bounce_core::model::{CourseCatalog, SectionProgress};
use bounce_core::playground::{HeldKeys, Viewport};
use bounce_core::route::Navigation;
use dioxus::prelude::*;
use dioxus_router::Navigator;
use services::{
    CompletionStep, MountOutcome, Overlay, SessionController, SessionDeps, SessionError,
    TickOutcome,
};
use tracing::{debug, warn};

use super::slot::{ControllerSlot, Lease};
use crate::routes::navigate;
use crate::views::ViewError;
use crate::vm::{CourseScreenVm, map_course_screen};

const ACQUIRE_ATTEMPTS: usize = 20;
const ACQUIRE_BACKOFF: Duration = Duration::from_millis(10);

/// Shared access to the course controller for the shell, its pages and overlays.
///
/// The controller lives in a signal and is taken out for the duration of each
/// action, then put back. Actions wait for it; ticks skip when it is out.
/// A remount replaces it outright and stale leases are discarded.
#[derive(Clone)]
pub(super) struct CourseHandle {
    controller: Signal<ControllerSlot<Box<SessionController>>>,
    screen: Signal<Option<CourseScreenVm>>,
    keys: Signal<HeldKeys>,
    error: Signal<Option<ViewError>>,
    catalog: Arc<CourseCatalog>,
    navigator: Navigator,
}

impl CourseHandle {
    pub(super) fn new(
        controller: Signal<ControllerSlot<Box<SessionController>>>,
        screen: Signal<Option<CourseScreenVm>>,
        keys: Signal<HeldKeys>,
        error: Signal<Option<ViewError>>,
        catalog: Arc<CourseCatalog>,
        navigator: Navigator,
    ) -> Self {
        Self {
            controller,
            screen,
            keys,
            error,
            catalog,
            navigator,
        }
    }

    pub(super) fn screen(&self) -> Option<CourseScreenVm> {
        self.screen.read().clone()
    }

    pub(super) fn error(&self) -> Option<ViewError> {
        *self.error.read()
    }

    pub(super) fn keys(&self) -> Signal<HeldKeys> {
        self.keys
    }

    fn take(&self) -> Option<Lease<Box<SessionController>>> {
        let mut controller = self.controller;
        controller.write().lease()
    }

    /// Wait briefly for an in-flight action to hand the controller back.
    async fn acquire(&self) -> Option<Lease<Box<SessionController>>> {
        for _ in 0..ACQUIRE_ATTEMPTS {
            if let Some(controller) = self.take() {
                return Some(controller);
            }
            tokio::time::sleep(ACQUIRE_BACKOFF).await;
        }
        warn!("course controller busy, dropping action");
        None
    }

    fn publish(&self, controller: &SessionController) {
        let vm = map_course_screen(controller, &self.catalog);
        let mut screen = self.screen;
        if screen.peek().as_ref() != Some(&vm) {
            screen.set(Some(vm));
        }
    }

    /// Hand a leased controller back. Returns false when a remount replaced
    /// it meanwhile; the caller then skips its follow-up navigation.
    fn restore(&self, lease: Lease<Box<SessionController>>) -> bool {
        let mut slot = self.controller;
        if slot.peek().is_stale(&lease) {
            debug!("dropping controller from before remount");
            return false;
        }
        self.publish(&lease.value);
        slot.write().give_back(lease)
    }

    fn install(&self, controller: Box<SessionController>) {
        self.publish(&controller);
        let mut slot = self.controller;
        slot.write().install(controller);
    }

    fn fail(&self, err: &SessionError) {
        warn!(error = %err, "course action failed");
        let mut error = self.error;
        error.set(Some(ViewError::Storage));
    }

    fn go(&self, navigation: Navigation) {
        navigate(self.navigator, navigation);
    }

    pub(super) async fn mount(
        &self,
        deps: SessionDeps,
        track: String,
        level: Option<String>,
    ) -> Result<(), ViewError> {
        let outcome = SessionController::mount(deps, Some(&track), level.as_deref())
            .await
            .map_err(|err| {
                warn!(error = %err, %track, "course could not be mounted");
                ViewError::Storage
            })?;
        match outcome {
            MountOutcome::Ready(controller, navigation) => {
                self.install(controller);
                if let Some(navigation) = navigation {
                    self.go(navigation);
                }
            }
            MountOutcome::Redirect(navigation) => self.go(navigation),
        }
        Ok(())
    }

    /// One playground tick plus any due section write.
    pub(super) async fn tick(&self, viewport: Viewport) {
        let Some(mut lease) = self.take() else {
            return;
        };
        let keys = *self.keys.peek();
        let ticked = lease.value.tick(keys, viewport).await;
        let flushed = lease.value.flush_section_progress().await;
        if !self.restore(lease) {
            return;
        }

        match ticked {
            Ok(TickOutcome::EnteredLevel(navigation)) => {
                let mut held = self.keys;
                held.set(HeldKeys::default());
                self.go(navigation);
            }
            Ok(_) => {}
            Err(err) => self.fail(&err),
        }
        if let Err(err) = flushed {
            self.fail(&err);
        }
    }

    pub(super) fn apply_route(&self, level: Option<String>) {
        let handle = self.clone();
        spawn(async move {
            let Some(mut lease) = handle.acquire().await else {
                return;
            };
            let result = lease.value.apply_route(level.as_deref()).await;
            if !handle.restore(lease) {
                return;
            }
            match result {
                Ok(Some(navigation)) => handle.go(navigation),
                Ok(None) => {}
                Err(err) => handle.fail(&err),
            }
        });
    }

    pub(super) fn enter_level(&self) {
        let handle = self.clone();
        spawn(async move {
            let Some(mut lease) = handle.acquire().await else {
                return;
            };
            let result = lease.value.enter_current_level().await;
            if !handle.restore(lease) {
                return;
            }
            match result {
                Ok(navigation) => handle.go(navigation),
                Err(err) => handle.fail(&err),
            }
        });
    }

    pub(super) fn complete(&self) {
        let handle = self.clone();
        spawn(async move {
            let Some(mut lease) = handle.acquire().await else {
                return;
            };
            let result = lease.value.complete_level().await;
            if !handle.restore(lease) {
                return;
            }
            handle.after_completion(result);
        });
    }

    pub(super) fn close_quiz(&self) {
        let handle = self.clone();
        spawn(async move {
            let Some(mut lease) = handle.acquire().await else {
                return;
            };
            let result = lease.value.close_quiz().await;
            if !handle.restore(lease) {
                return;
            }
            handle.after_completion(result);
        });
    }

    fn after_completion(&self, result: Result<CompletionStep, SessionError>) {
        match result {
            Ok(
                CompletionStep::Advanced { navigation, .. }
                | CompletionStep::CourseComplete(navigation),
            ) => self.go(navigation),
            Ok(CompletionStep::QuizShown | CompletionStep::Ignored) => {}
            Err(err) => self.fail(&err),
        }
    }

    pub(super) fn jump(&self, index: usize) {
        let handle = self.clone();
        spawn(async move {
            let Some(mut lease) = handle.acquire().await else {
                return;
            };
            let result = lease.value.jump_to_level(index).await;
            if !handle.restore(lease) {
                return;
            }
            match result {
                Ok(Some(navigation)) => handle.go(navigation),
                Ok(None) => {}
                Err(err) => handle.fail(&err),
            }
        });
    }

    fn with_controller(&self, f: impl FnOnce(&mut SessionController) + 'static) {
        let handle = self.clone();
        spawn(async move {
            if let Some(mut lease) = handle.acquire().await {
                f(&mut lease.value);
                handle.restore(lease);
            }
        });
    }

    pub(super) fn open_overlay(&self, overlay: Overlay) {
        self.with_controller(move |controller| {
            controller.open_overlay(overlay);
        });
    }

    pub(super) fn close_overlay(&self) {
        self.with_controller(|controller| {
            controller.close_overlay();
        });
    }

    pub(super) fn read_section(&self, section: SectionProgress) {
        self.with_controller(move |controller| controller.record_section_progress(section));
    }
}
