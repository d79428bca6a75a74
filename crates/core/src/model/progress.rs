use serde::{Deserialize, Serialize};

use crate::model::{LevelId, TrackId};
use crate::registry::TrackRegistry;

/// Pointer to the learner's current track and level, plus an optional
/// position inside a sectioned lesson.
///
/// Serialized shape: `{ track, levelId, sectionIndex?, totalSections? }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    track: TrackId,
    level_id: LevelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_sections: Option<u32>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(track: TrackId, level: LevelId) -> Self {
        Self {
            track,
            level_id: level,
            section_index: None,
            total_sections: None,
        }
    }

    #[must_use]
    pub fn with_sections(mut self, section_index: Option<u32>, total_sections: Option<u32>) -> Self {
        self.section_index = section_index;
        self.total_sections = total_sections;
        self
    }

    /// Parse a persisted blob and enforce the membership invariant.
    ///
    /// Malformed JSON, missing fields, unknown ids and levels that do not
    /// belong to the stored track all yield `None`.
    #[must_use]
    pub fn from_json(raw: &str, registry: &TrackRegistry) -> Option<Self> {
        let record: Self = serde_json::from_str(raw).ok()?;
        registry
            .contains(record.track, record.level_id)
            .then_some(record)
    }

    /// Serialize to the persisted JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn track(&self) -> TrackId {
        self.track
    }

    #[must_use]
    pub fn level(&self) -> LevelId {
        self.level_id
    }

    #[must_use]
    pub fn section_index(&self) -> Option<u32> {
        self.section_index
    }

    #[must_use]
    pub fn total_sections(&self) -> Option<u32> {
        self.total_sections
    }
}

/// Position inside a scroll-driven lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionProgress {
    pub section_index: u32,
    pub total_sections: u32,
}

impl SectionProgress {
    #[must_use]
    pub fn new(section_index: u32, total_sections: u32) -> Self {
        Self {
            section_index,
            total_sections,
        }
    }

    /// Fraction of the lesson passed, `0.0` when the lesson has no sections.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.total_sections == 0 {
            return 0.0;
        }
        f64::from(self.section_index) / f64::from(self.total_sections)
    }
}

/// Insertion-ordered set of finished levels.
///
/// Wire ids this build does not recognise are carried along untouched, so a
/// write never loses completions recorded by a newer catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLevels {
    entries: Vec<String>,
    levels: Vec<LevelId>,
}

impl CompletedLevels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted JSON array.
    ///
    /// Anything that is not an array becomes the empty set; non-string
    /// entries and duplicates are dropped.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) else {
            return Self::new();
        };
        let mut completed = Self::new();
        for raw in items.iter().filter_map(serde_json::Value::as_str) {
            if completed.entries.iter().any(|entry| entry == raw) {
                continue;
            }
            completed.entries.push(raw.to_string());
            if let Ok(level) = raw.parse::<LevelId>() {
                completed.levels.push(level);
            }
        }
        completed
    }

    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Adds `level`; returns `false` when it was already present.
    pub fn insert(&mut self, level: LevelId) -> bool {
        if self.levels.contains(&level) {
            return false;
        }
        self.levels.push(level);
        self.entries.push(level.as_str().to_string());
        true
    }

    /// Drops every level contained in `levels`, keeping the order of the rest.
    /// Unrecognised entries are never removed.
    pub fn remove_all(&mut self, levels: &[LevelId]) {
        self.levels.retain(|level| !levels.contains(level));
        self.entries
            .retain(|raw| !matches!(raw.parse::<LevelId>(), Ok(level) if levels.contains(&level)));
    }

    #[must_use]
    pub fn contains(&self, level: LevelId) -> bool {
        self.levels.contains(&level)
    }

    /// Known levels in completion order.
    #[must_use]
    pub fn as_slice(&self) -> &[LevelId] {
        &self.levels
    }

    /// Stored ids that do not name a level in this build.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|raw| raw.parse::<LevelId>().is_err())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<LevelId> for CompletedLevels {
    fn from_iter<I: IntoIterator<Item = LevelId>>(iter: I) -> Self {
        let mut completed = Self::new();
        for level in iter {
            completed.insert(level);
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_wire_shape() {
        let record = ProgressRecord::new(TrackId::GameDev, LevelId::GameLoop)
            .with_sections(Some(2), Some(5));
        let json = record.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"track":"game-dev","levelId":"LEVEL_GAME_LOOP","sectionIndex":2,"totalSections":5}"#
        );
    }

    #[test]
    fn record_without_sections_omits_them() {
        let json = ProgressRecord::new(TrackId::GameDev, LevelId::GameLoop)
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"track":"game-dev","levelId":"LEVEL_GAME_LOOP"}"#);
    }

    #[test]
    fn from_json_rejects_bad_blobs() {
        let registry = TrackRegistry::builtin();
        assert!(ProgressRecord::from_json("not json", &registry).is_none());
        assert!(ProgressRecord::from_json(r#"{"track":"game-dev"}"#, &registry).is_none());
        assert!(
            ProgressRecord::from_json(r#"{"track":"game-dev","levelId":"LEVEL_NOPE"}"#, &registry)
                .is_none()
        );
        // level exists, but belongs to another track
        assert!(
            ProgressRecord::from_json(
                r#"{"track":"game-dev","levelId":"LEVEL_CACHING"}"#,
                &registry
            )
            .is_none()
        );
    }

    #[test]
    fn from_json_accepts_valid_record() {
        let registry = TrackRegistry::builtin();
        let record = ProgressRecord::from_json(
            r#"{"track":"cybersecurity","levelId":"LEVEL_CYBER_RSA","sectionIndex":1}"#,
            &registry,
        )
        .unwrap();
        assert_eq!(record.level(), LevelId::CyberRsa);
        assert_eq!(record.section_index(), Some(1));
        assert_eq!(record.total_sections(), None);
    }

    #[test]
    fn section_ratio_handles_zero_sections() {
        assert!((SectionProgress::new(3, 0).ratio()).abs() < f64::EPSILON);
        assert!((SectionProgress::new(1, 4).ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn completed_levels_parse_leniently() {
        assert!(CompletedLevels::from_json("{}").is_empty());
        assert!(CompletedLevels::from_json("oops").is_empty());
        let parsed =
            CompletedLevels::from_json(r#"["CASE_UBER", 7, "UNKNOWN", "CASE_UBER", "LEVEL_DOCKER"]"#);
        assert_eq!(parsed.as_slice(), &[LevelId::CaseUber, LevelId::Docker]);
        assert_eq!(parsed.unrecognized().collect::<Vec<_>>(), ["UNKNOWN"]);
    }

    #[test]
    fn unrecognized_ids_survive_writes() {
        let mut completed =
            CompletedLevels::from_json(r#"["LEVEL_FROM_NEWER_BUILD","CASE_UBER"]"#);
        completed.insert(LevelId::Docker);
        completed.remove_all(&[LevelId::CaseUber]);
        assert_eq!(
            completed.to_json().unwrap(),
            r#"["LEVEL_FROM_NEWER_BUILD","LEVEL_DOCKER"]"#
        );
    }

    #[test]
    fn completed_levels_insert_is_idempotent() {
        let mut once = CompletedLevels::new();
        once.insert(LevelId::Docker);
        let mut twice = once.clone();
        assert!(!twice.insert(LevelId::Docker));
        assert_eq!(once, twice);
        assert_eq!(twice.to_json().unwrap(), r#"["LEVEL_DOCKER"]"#);
    }
}
