//! Keys of the persisted key-value layout.

/// Current track/level pointer, JSON object.
pub const PROGRESS: &str = "bounce_progress_v2";

/// Finished levels, JSON array of level ids.
pub const COMPLETED_LEVELS: &str = "bounce_completed_levels";

/// Cached signed-in user, JSON object.
pub const USER: &str = "bounce_user";

/// Course reviews, JSON array, newest first.
pub const REVIEWS: &str = "bounce_reviews";
