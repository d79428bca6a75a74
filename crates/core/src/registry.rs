//! Track registry: which levels belong to which track, and in what order.
//!
//! All lookups are pure and total. Unknown input yields `None` or an empty
//! slice, never an error.

use std::collections::HashMap;

use crate::model::{LevelId, TrackId};

const SYSTEM_DESIGN_LEVELS: &[LevelId] = &[
    LevelId::BackendLanguages,
    LevelId::ClientServer,
    LevelId::LoadBalancer,
    LevelId::ApiGateway,
    LevelId::Caching,
    LevelId::DbSharding,
    LevelId::ConsistentHashing,
    LevelId::DbInternals,
    LevelId::DbMigrations,
    LevelId::Docker,
    LevelId::MessageQueues,
    LevelId::DevopsLoop,
    // capstone stays last
    LevelId::HldLld,
];

const GAME_ENGINEERING_LEVELS: &[LevelId] = &[
    LevelId::GameIntro,
    LevelId::GameLoop,
    LevelId::GameNetworking,
    LevelId::GamePhysics,
    LevelId::GameArch,
    LevelId::OrderBook,
];

const CYBER_LEVELS: &[LevelId] = &[
    LevelId::CyberEncryption,
    LevelId::CyberSqli,
    LevelId::CyberAes,
    LevelId::CyberRsa,
    LevelId::CyberSha,
    LevelId::CyberBcrypt,
];

const CASE_STUDY_LEVELS: &[LevelId] = &[
    LevelId::CaseUrlShortener,
    LevelId::CaseInstagram,
    LevelId::CaseUber,
    LevelId::QuadtreeDeepDive,
];

/// Ordered level lists keyed by track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRegistry {
    tracks: HashMap<TrackId, Vec<LevelId>>,
}

impl TrackRegistry {
    /// The registry shipped with the course.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_tracks([
            (TrackId::SystemDesign, SYSTEM_DESIGN_LEVELS.to_vec()),
            (TrackId::GameDev, GAME_ENGINEERING_LEVELS.to_vec()),
            (TrackId::Cybersecurity, CYBER_LEVELS.to_vec()),
            (TrackId::CaseStudies, CASE_STUDY_LEVELS.to_vec()),
        ])
    }

    /// Build a registry from explicit track lists. Tracks not listed have no levels.
    #[must_use]
    pub fn from_tracks(tracks: impl IntoIterator<Item = (TrackId, Vec<LevelId>)>) -> Self {
        Self {
            tracks: tracks.into_iter().collect(),
        }
    }

    /// Ordered levels of `track`; empty when the track has none.
    #[must_use]
    pub fn track_levels(&self, track: TrackId) -> &[LevelId] {
        self.tracks.get(&track).map_or(&[], Vec::as_slice)
    }

    /// First level of `track`, if any.
    #[must_use]
    pub fn default_level(&self, track: TrackId) -> Option<LevelId> {
        self.track_levels(track).first().copied()
    }

    #[must_use]
    pub fn contains(&self, track: TrackId, level: LevelId) -> bool {
        self.track_levels(track).contains(&level)
    }

    /// Returns the level named by `raw` when it belongs to `track`.
    #[must_use]
    pub fn validate_level_for_track(&self, track: TrackId, raw: Option<&str>) -> Option<LevelId> {
        let level = raw?.parse::<LevelId>().ok()?;
        self.contains(track, level).then_some(level)
    }

    /// Position of `level` within `track`.
    #[must_use]
    pub fn level_index(&self, track: TrackId, level: LevelId) -> Option<usize> {
        self.track_levels(track).iter().position(|l| *l == level)
    }

    /// Level at `index` within `track`, bounds-checked.
    #[must_use]
    pub fn level_at(&self, track: TrackId, index: usize) -> Option<LevelId> {
        self.track_levels(track).get(index).copied()
    }

    /// The level following `level`, or `None` when `level` is last (or foreign).
    #[must_use]
    pub fn next_level(&self, track: TrackId, level: LevelId) -> Option<LevelId> {
        let index = self.level_index(track, level)?;
        self.level_at(track, index + 1)
    }

    #[must_use]
    pub fn is_last_level(&self, track: TrackId, level: LevelId) -> bool {
        self.track_levels(track).last() == Some(&level)
    }

    #[must_use]
    pub fn level_count(&self, track: TrackId) -> usize {
        self.track_levels(track).len()
    }
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolve a free-form track name (URL segment, menu alias) to a track.
///
/// Matching is case-insensitive and accepts the short aliases used in links.
#[must_use]
pub fn resolve_track_id(raw: Option<&str>) -> Option<TrackId> {
    let normalized = raw?.trim().to_lowercase();
    match normalized.as_str() {
        "system-design" | "system" => Some(TrackId::SystemDesign),
        "game-dev" | "game" => Some(TrackId::GameDev),
        "cybersecurity" | "cyber" => Some(TrackId::Cybersecurity),
        "case-studies" | "cases" | "lld" => Some(TrackId::CaseStudies),
        _ => None,
    }
}

/// Whether `level` is the system-design capstone.
#[must_use]
pub fn is_capstone(level: LevelId) -> bool {
    level == LevelId::HldLld
}
