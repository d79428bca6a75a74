//! Persisted learner progress: the current track/level pointer and the set of
//! finished levels.
//!
//! Read paths never fail. Absent keys, malformed JSON, unknown ids, records
//! that break the "level belongs to track" invariant, and backend read errors
//! all read as "no data". Writes overwrite unconditionally.

use std::sync::Arc;

use bounce_core::TrackRegistry;
use bounce_core::model::{CompletedLevels, LevelId, ProgressRecord, SectionProgress, TrackId};
use storage::keys;
use storage::repository::KeyValueRepository;
use tracing::{debug, info, warn};

use crate::error::ProgressStoreError;

#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueRepository>,
    registry: Arc<TrackRegistry>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>, registry: Arc<TrackRegistry>) -> Self {
        Self { kv, registry }
    }

    #[must_use]
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.kv.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "storage read failed, treating as absent");
                None
            }
        }
    }

    /// The stored progress record, if present and valid.
    pub async fn load_stored_progress(&self) -> Option<ProgressRecord> {
        let raw = self.read_raw(keys::PROGRESS).await?;
        let record = ProgressRecord::from_json(&raw, &self.registry);
        if record.is_none() {
            warn!(key = keys::PROGRESS, "discarding invalid stored progress");
        }
        record
    }

    /// Where `track` should resume: the stored level when the record belongs
    /// to this track, otherwise the track's first level.
    pub async fn load_track_progress(&self, track: TrackId) -> Option<LevelId> {
        match self.load_stored_progress().await {
            Some(record) if record.track() == track => Some(record.level()),
            _ => self.registry.default_level(track),
        }
    }

    /// Section to resume inside `level`, when the stored record points at it.
    pub async fn load_section_index(&self, track: TrackId, level: LevelId) -> Option<u32> {
        self.load_stored_progress()
            .await
            .filter(|record| record.track() == track && record.level() == level)
            .and_then(|record| record.section_index())
    }

    /// Overwrite the single global progress record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the record cannot be encoded or stored.
    pub async fn persist_progress(
        &self,
        track: TrackId,
        level: LevelId,
        section: Option<SectionProgress>,
    ) -> Result<(), ProgressStoreError> {
        let record = ProgressRecord::new(track, level).with_sections(
            section.map(|s| s.section_index),
            section.map(|s| s.total_sections),
        );
        self.kv.set(keys::PROGRESS, &record.to_json()?).await?;
        debug!(%track, %level, ?section, "progress persisted");
        Ok(())
    }

    /// Finished levels; empty when missing or malformed.
    pub async fn read_completed_levels(&self) -> CompletedLevels {
        self.read_raw(keys::COMPLETED_LEVELS)
            .await
            .map(|raw| CompletedLevels::from_json(&raw))
            .unwrap_or_default()
    }

    /// Add `level` to the finished set. Writes only when it was not there yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the updated set cannot be stored.
    pub async fn mark_level_complete(
        &self,
        level: LevelId,
    ) -> Result<CompletedLevels, ProgressStoreError> {
        let mut completed = self.read_completed_levels().await;
        if completed.insert(level) {
            self.write_completed(&completed).await?;
            debug!(%level, "level marked complete");
        }
        Ok(completed)
    }

    /// Point progress back at the first level of `track`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the record cannot be stored.
    pub async fn reset_track_progress(
        &self,
        track: TrackId,
    ) -> Result<Option<LevelId>, ProgressStoreError> {
        let first = self.registry.default_level(track);
        if let Some(level) = first {
            self.persist_progress(track, level, None).await?;
        }
        Ok(first)
    }

    /// Forget completion of every level in `track`; other tracks are untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the updated set cannot be stored.
    pub async fn reset_track_completed_levels(
        &self,
        track: TrackId,
    ) -> Result<CompletedLevels, ProgressStoreError> {
        let mut completed = self.read_completed_levels().await;
        completed.remove_all(self.registry.track_levels(track));
        self.write_completed(&completed).await?;
        Ok(completed)
    }

    /// Reset both the position and the completion history of `track`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if either write fails.
    pub async fn full_reset_track(&self, track: TrackId) -> Result<(), ProgressStoreError> {
        self.reset_track_progress(track).await?;
        self.reset_track_completed_levels(track).await?;
        info!(%track, "track progress fully reset");
        Ok(())
    }

    async fn write_completed(&self, completed: &CompletedLevels) -> Result<(), ProgressStoreError> {
        self.kv
            .set(keys::COMPLETED_LEVELS, &completed.to_json()?)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn store_with(repo: &InMemoryRepository) -> ProgressStore {
        ProgressStore::new(Arc::new(repo.clone()), Arc::new(TrackRegistry::builtin()))
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo);
        store
            .persist_progress(TrackId::Cybersecurity, LevelId::CyberAes, None)
            .await
            .unwrap();

        let record = store.load_stored_progress().await.unwrap();
        assert_eq!(record.track(), TrackId::Cybersecurity);
        assert_eq!(record.level(), LevelId::CyberAes);
    }

    #[tokio::test]
    async fn section_index_only_resumes_matching_level() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo);
        store
            .persist_progress(
                TrackId::GameDev,
                LevelId::GameLoop,
                Some(SectionProgress::new(3, 7)),
            )
            .await
            .unwrap();

        assert_eq!(
            store.load_section_index(TrackId::GameDev, LevelId::GameLoop).await,
            Some(3)
        );
        assert_eq!(
            store.load_section_index(TrackId::GameDev, LevelId::GameIntro).await,
            None
        );
    }

    #[tokio::test]
    async fn corrupt_blobs_read_as_absent() {
        let repo = InMemoryRepository::new();
        repo.set(keys::PROGRESS, "{\"track\":").await.unwrap();
        repo.set(keys::COMPLETED_LEVELS, "{\"not\":\"an array\"}")
            .await
            .unwrap();
        let store = store_with(&repo);

        assert!(store.load_stored_progress().await.is_none());
        assert!(store.read_completed_levels().await.is_empty());
        assert_eq!(
            store.load_track_progress(TrackId::GameDev).await,
            Some(LevelId::GameIntro)
        );
    }

    #[tokio::test]
    async fn mark_complete_skips_write_when_present() {
        let repo = InMemoryRepository::new();
        let store = store_with(&repo);
        store.mark_level_complete(LevelId::Docker).await.unwrap();
        repo.set(keys::COMPLETED_LEVELS, "[\"LEVEL_DOCKER\",\"CASE_UBER\"]")
            .await
            .unwrap();

        let completed = store.mark_level_complete(LevelId::Docker).await.unwrap();
        assert_eq!(completed.as_slice(), &[LevelId::Docker, LevelId::CaseUber]);
    }

    #[tokio::test]
    async fn unknown_completed_ids_are_preserved_across_writes() {
        let repo = InMemoryRepository::new();
        repo.set(keys::COMPLETED_LEVELS, "[\"LEVEL_FROM_NEWER_BUILD\",\"CASE_UBER\"]")
            .await
            .unwrap();
        let store = store_with(&repo);

        store.mark_level_complete(LevelId::Docker).await.unwrap();
        store
            .reset_track_completed_levels(TrackId::GameDev)
            .await
            .unwrap();

        assert_eq!(
            repo.get(keys::COMPLETED_LEVELS).await.unwrap().as_deref(),
            Some("[\"LEVEL_FROM_NEWER_BUILD\",\"CASE_UBER\",\"LEVEL_DOCKER\"]")
        );

        store
            .reset_track_completed_levels(TrackId::CaseStudies)
            .await
            .unwrap();
        assert_eq!(
            repo.get(keys::COMPLETED_LEVELS).await.unwrap().as_deref(),
            Some("[\"LEVEL_FROM_NEWER_BUILD\",\"LEVEL_DOCKER\"]")
        );
    }

    #[tokio::test]
    async fn reset_on_empty_track_persists_nothing() {
        let repo = InMemoryRepository::new();
        let store = ProgressStore::new(
            Arc::new(repo.clone()),
            Arc::new(TrackRegistry::from_tracks([(TrackId::GameDev, vec![])])),
        );
        assert_eq!(store.reset_track_progress(TrackId::GameDev).await.unwrap(), None);
        assert_eq!(repo.get(keys::PROGRESS).await.unwrap(), None);
    }
}
