use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::model::LevelId;

const BUILTIN_CATALOG: &str = include_str!("../../assets/course_content.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course content is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("course content lists {0} twice")]
    DuplicateLevel(LevelId),

    #[error("quiz for {level} points at option {index} of {len}")]
    QuizAnswerOutOfRange {
        level: LevelId,
        index: usize,
        len: usize,
    },
}

/// Source listing attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeSnippet {
    pub language: String,
    pub title: String,
    pub description: String,
    pub code: String,
}

/// Single multiple-choice question shown after a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizFeedback {
    pub correct: bool,
    pub correct_index: usize,
}

impl Quiz {
    /// Grade a chosen option. Out-of-range choices are simply wrong.
    #[must_use]
    pub fn check(&self, choice: usize) -> QuizFeedback {
        QuizFeedback {
            correct: choice == self.correct_index,
            correct_index: self.correct_index,
        }
    }
}

/// Descriptive content of one level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevelContent {
    pub id: LevelId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub code_snippet: Option<CodeSnippet>,
    #[serde(default)]
    pub quiz: Option<Quiz>,
}

impl LevelContent {
    #[must_use]
    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }
}

/// Lesson content keyed by level id.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    levels: HashMap<LevelId, LevelContent>,
}

impl CourseCatalog {
    /// Content bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled JSON is inconsistent.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON, duplicate ids, or a quiz
    /// whose answer index is outside its options.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<LevelContent> = serde_json::from_str(raw)?;
        Self::from_levels(entries)
    }

    /// # Errors
    ///
    /// Same as [`CourseCatalog::from_json`], minus parsing.
    pub fn from_levels(entries: Vec<LevelContent>) -> Result<Self, CatalogError> {
        let mut levels = HashMap::with_capacity(entries.len());
        for entry in entries {
            if let Some(quiz) = &entry.quiz {
                if quiz.correct_index >= quiz.options.len() {
                    return Err(CatalogError::QuizAnswerOutOfRange {
                        level: entry.id,
                        index: quiz.correct_index,
                        len: quiz.options.len(),
                    });
                }
            }
            let id = entry.id;
            if levels.insert(id, entry).is_some() {
                return Err(CatalogError::DuplicateLevel(id));
            }
        }
        Ok(Self { levels })
    }

    #[must_use]
    pub fn get(&self, level: LevelId) -> Option<&LevelContent> {
        self.levels.get(&level)
    }

    #[must_use]
    pub fn quiz(&self, level: LevelId) -> Option<&Quiz> {
        self.get(level).and_then(|content| content.quiz.as_ref())
    }

    /// Title of `level`, falling back to its wire id when content is missing.
    #[must_use]
    pub fn title(&self, level: LevelId) -> &str {
        self.get(level)
            .map_or(level.as_str(), |content| content.title.as_str())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_every_level() {
        let catalog = CourseCatalog::builtin().unwrap();
        for level in LevelId::all() {
            assert!(catalog.get(level).is_some(), "missing content for {level}");
        }
        assert_eq!(catalog.len(), 30);
    }

    #[test]
    fn quiz_presence_matches_content() {
        let catalog = CourseCatalog::builtin().unwrap();
        assert!(catalog.get(LevelId::CaseUber).unwrap().has_quiz());
        assert!(!catalog.get(LevelId::QuadtreeDeepDive).unwrap().has_quiz());
        let quiz = catalog.quiz(LevelId::CaseUber).unwrap();
        assert!(quiz.check(2).correct);
        assert!(!quiz.check(0).correct);
        assert!(!quiz.check(42).correct);
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let raw = r#"[{"id":"CASE_UBER","title":"t","description":"d","category":"c",
            "quiz":{"question":"q","options":["a"],"correct_index":3,"explanation":"e"}}]"#;
        assert!(matches!(
            CourseCatalog::from_json(raw),
            Err(CatalogError::QuizAnswerOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let raw = r#"[{"id":"CASE_UBER","title":"t","description":"d","category":"c"},
            {"id":"CASE_UBER","title":"t","description":"d","category":"c"}]"#;
        assert!(matches!(
            CourseCatalog::from_json(raw),
            Err(CatalogError::DuplicateLevel(LevelId::CaseUber))
        ));
    }

    #[test]
    fn title_falls_back_to_wire_id() {
        let catalog = CourseCatalog::default();
        assert_eq!(catalog.title(LevelId::Docker), "LEVEL_DOCKER");
    }
}
