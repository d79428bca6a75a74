use bounce_core::model::{SectionProgress, TrackId};
use bounce_core::route::{AppRoute, Navigation};
use tracing::info;

use crate::error::ProgressStoreError;
use crate::progress_store::ProgressStore;

/// Enter `track` from the home screen, resuming where the learner left off.
///
/// Returns `None` when the track has no levels.
///
/// # Errors
///
/// Returns `ProgressStoreError` if the resume point cannot be persisted.
pub async fn start_track(
    store: &ProgressStore,
    track: TrackId,
) -> Result<Option<Navigation>, ProgressStoreError> {
    let Some(level) = store.load_track_progress(track).await else {
        return Ok(None);
    };
    let section = match store.load_stored_progress().await {
        Some(record) if record.track() == track && record.level() == level => record
            .section_index()
            .zip(record.total_sections())
            .map(|(index, total)| SectionProgress::new(index, total)),
        _ => None,
    };
    store.persist_progress(track, level, section).await?;
    info!(%track, %level, "track started");
    Ok(Some(Navigation::push(AppRoute::course(track))))
}

/// Play a finished track again from its first level.
///
/// Completion history is kept; only the position moves back.
///
/// # Errors
///
/// Returns `ProgressStoreError` if the reset cannot be persisted.
pub async fn retry_track(
    store: &ProgressStore,
    track: TrackId,
) -> Result<Option<Navigation>, ProgressStoreError> {
    let Some(level) = store.reset_track_progress(track).await? else {
        return Ok(None);
    };
    info!(%track, %level, "track restarted");
    Ok(Some(Navigation::push(AppRoute::course(track))))
}

/// Leave the completion screen to pick another track.
#[must_use]
pub fn choose_another_track() -> Navigation {
    Navigation::push(AppRoute::Home)
}
