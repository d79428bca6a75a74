use bounce_core::TrackRegistry;
use bounce_core::model::{LevelId, ProgressRecord, TrackId};

/// Which input decided the initial level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    Url,
    Stored,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLevel {
    pub level: LevelId,
    pub index: usize,
    pub source: LevelSource,
}

/// Pick the authoritative level for `track`.
///
/// Precedence: a URL level that belongs to the track, then a stored record
/// for this exact track, then the track's first level. `None` means the track
/// has no levels and cannot be played.
#[must_use]
pub fn resolve_initial_level(
    registry: &TrackRegistry,
    track: TrackId,
    url_level: Option<&str>,
    stored: Option<&ProgressRecord>,
) -> Option<ResolvedLevel> {
    let candidates = [
        (
            registry.validate_level_for_track(track, url_level),
            LevelSource::Url,
        ),
        (
            stored
                .filter(|record| record.track() == track)
                .map(ProgressRecord::level)
                .filter(|level| registry.contains(track, *level)),
            LevelSource::Stored,
        ),
        (registry.default_level(track), LevelSource::Default),
    ];

    candidates.into_iter().find_map(|(level, source)| {
        let level = level?;
        let index = registry.level_index(track, level)?;
        Some(ResolvedLevel {
            level,
            index,
            source,
        })
    })
}
