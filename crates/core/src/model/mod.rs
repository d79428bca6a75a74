mod catalog;
mod ids;
mod progress;
mod settings;
mod user;

pub use catalog::{CatalogError, CodeSnippet, CourseCatalog, LevelContent, Quiz, QuizFeedback};
pub use ids::{LevelId, ParseIdError, TrackId};
pub use progress::{CompletedLevels, ProgressRecord, SectionProgress};
pub use settings::{ApiSettings, ApiSettingsDraft, ApiSettingsError, DEFAULT_API_BASE_URL};
pub use user::UserProfile;
