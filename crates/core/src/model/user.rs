use serde::{Deserialize, Serialize};

/// Signed-in learner as cached under `bounce_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Parse a cached profile; malformed blobs read as signed out.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Two-letter badge: first and last word initials, or the first two
    /// characters of a single-word name.
    #[must_use]
    pub fn initials(&self) -> String {
        let parts: Vec<&str> = self.name.split_whitespace().collect();
        let raw: String = match parts.as_slice() {
            [] => String::new(),
            [single] => single.chars().take(2).collect(),
            [first, .., last] => first
                .chars()
                .take(1)
                .chain(last.chars().take(1))
                .collect(),
        };
        raw.to_uppercase()
    }
}
