use bounce_core::TrackRegistry;
use bounce_core::model::{CompletedLevels, CourseCatalog, ProgressRecord, TrackId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackCardVm {
    pub track: TrackId,
    pub label: &'static str,
    pub level_count: usize,
    pub completed_count: usize,
    /// Title of the level the track would resume at, when it has progress.
    pub resume_title: Option<String>,
}

impl TrackCardVm {
    #[must_use]
    pub fn cta(&self) -> &'static str {
        if self.resume_title.is_some() {
            "Continue"
        } else {
            "Start"
        }
    }
}

#[must_use]
pub fn map_track_cards(
    registry: &TrackRegistry,
    catalog: &CourseCatalog,
    completed: &CompletedLevels,
    stored: Option<&ProgressRecord>,
) -> Vec<TrackCardVm> {
    TrackId::ALL
        .iter()
        .filter(|track| registry.level_count(**track) > 0)
        .map(|&track| {
            let levels = registry.track_levels(track);
            TrackCardVm {
                track,
                label: track.label(),
                level_count: levels.len(),
                completed_count: levels.iter().filter(|l| completed.contains(**l)).count(),
                resume_title: stored
                    .filter(|record| record.track() == track)
                    .map(|record| catalog.title(record.level()).to_string()),
            }
        })
        .collect()
}
