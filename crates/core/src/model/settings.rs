use thiserror::Error;
use url::Url;

/// Hosted comment/auth service used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://bounce-bvtj.onrender.com/api";

/// Where the collaborator services live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiSettings {
    base_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct ApiSettingsDraft {
    pub base_url: Option<String>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `ApiSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<ApiSettings, ApiSettingsError> {
        let base_url = self
            .base_url
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if Url::parse(&base_url).is_err() {
            return Err(ApiSettingsError::InvalidBaseUrl(base_url));
        }

        Ok(ApiSettings { base_url })
    }
}

impl ApiSettings {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` (with or without a leading slash) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_hosted_default() {
        let settings = ApiSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, ApiSettings::default());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let settings = ApiSettingsDraft {
            base_url: Some(" http://localhost:8080/api/ ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(settings.endpoint("/level-comments"), "http://localhost:8080/api/level-comments");
    }

    #[test]
    fn rejects_garbage_url() {
        let err = ApiSettingsDraft {
            base_url: Some("not a url".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ApiSettingsError::InvalidBaseUrl(_)));
    }
}
