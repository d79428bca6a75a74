//! Learner reviews of the course, kept under `bounce_reviews`.

use std::sync::Arc;

use bounce_core::Clock;
use bounce_core::model::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::keys;
use storage::repository::KeyValueRepository;
use tracing::{debug, warn};

use crate::error::ReviewBoardError;

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: i64,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub rating: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
}

/// Unvalidated review form input.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub rating: u8,
    pub text: String,
    pub suggestions: Option<String>,
}

#[derive(Clone)]
pub struct ReviewBoard {
    kv: Arc<dyn KeyValueRepository>,
    clock: Clock,
}

impl ReviewBoard {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>, clock: Clock) -> Self {
        Self { kv, clock }
    }

    /// Reviews, newest first. Missing or malformed data reads as empty.
    pub async fn list(&self) -> Vec<Review> {
        let raw = match self.kv.get(keys::REVIEWS).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "could not read reviews");
                None
            }
        };
        raw.and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Post a review as `author`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewBoardError` if the draft is invalid or cannot be stored.
    pub async fn submit(
        &self,
        author: &UserProfile,
        draft: ReviewDraft,
    ) -> Result<Review, ReviewBoardError> {
        if !(1..=MAX_RATING).contains(&draft.rating) {
            return Err(ReviewBoardError::InvalidRating(draft.rating));
        }
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(ReviewBoardError::EmptyText);
        }

        let now = self.clock.now();
        let mut reviews = self.list().await;
        let review = Review {
            id: unique_id(&reviews, now.timestamp_millis()),
            user_id: author.id,
            user_name: author.name.clone(),
            user_avatar: author.avatar.clone(),
            rating: draft.rating,
            text: text.to_string(),
            suggestions: draft
                .suggestions
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            date: now,
            likes: 0,
        };

        reviews.insert(0, review.clone());
        self.write(&reviews).await?;
        debug!(review_id = %review.id, rating = review.rating, "review posted");
        Ok(review)
    }

    /// Add a like to review `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ReviewBoardError` if the updated list cannot be stored.
    pub async fn like(&self, id: &str) -> Result<Option<u32>, ReviewBoardError> {
        let mut reviews = self.list().await;
        let Some(review) = reviews.iter_mut().find(|review| review.id == id) else {
            return Ok(None);
        };
        review.likes = review.likes.saturating_add(1);
        let likes = review.likes;
        self.write(&reviews).await?;
        Ok(Some(likes))
    }

    async fn write(&self, reviews: &[Review]) -> Result<(), ReviewBoardError> {
        let raw = serde_json::to_string(reviews)?;
        self.kv.set(keys::REVIEWS, &raw).await?;
        Ok(())
    }
}

/// Millisecond id, suffixed with a counter when that millisecond is taken.
fn unique_id(existing: &[Review], millis: i64) -> String {
    let base = millis.to_string();
    let taken = |candidate: &str| existing.iter().any(|review| review.id == candidate);
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounce_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn author() -> UserProfile {
        UserProfile {
            id: 9,
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            avatar: None,
        }
    }

    fn draft(rating: u8, text: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: text.into(),
            suggestions: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn submit_prepends_and_persists() {
        let repo = InMemoryRepository::new();
        let mut clock = fixed_clock();
        let board = ReviewBoard::new(Arc::new(repo.clone()), clock);
        board.submit(&author(), draft(4, "first")).await.unwrap();

        clock.advance(chrono::Duration::seconds(1));
        let board = ReviewBoard::new(Arc::new(repo), clock);
        let second = board.submit(&author(), draft(5, " second ")).await.unwrap();
        assert_eq!(second.text, "second");
        assert_eq!(second.suggestions, None);

        let texts: Vec<String> = board.list().await.into_iter().map(|r| r.text).collect();
        assert_eq!(texts, ["second", "first"]);
    }

    #[tokio::test]
    async fn rejects_bad_drafts() {
        let board = ReviewBoard::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        assert!(matches!(
            board.submit(&author(), draft(0, "meh")).await,
            Err(ReviewBoardError::InvalidRating(0))
        ));
        assert!(matches!(
            board.submit(&author(), draft(3, "   ")).await,
            Err(ReviewBoardError::EmptyText)
        ));
        assert!(board.list().await.is_empty());
    }

    #[tokio::test]
    async fn like_counts_up_and_ignores_unknown() {
        let board = ReviewBoard::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        let review = board.submit(&author(), draft(5, "great")).await.unwrap();
        assert_eq!(board.like(&review.id).await.unwrap(), Some(1));
        assert_eq!(board.like(&review.id).await.unwrap(), Some(2));
        assert_eq!(board.like("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn reviews_in_the_same_millisecond_get_distinct_ids() {
        let board = ReviewBoard::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        let first = board.submit(&author(), draft(4, "first")).await.unwrap();
        let second = board.submit(&author(), draft(5, "second")).await.unwrap();
        let third = board.submit(&author(), draft(3, "third")).await.unwrap();
        assert_eq!(second.id, format!("{}-1", first.id));
        assert_eq!(third.id, format!("{}-2", first.id));

        assert_eq!(board.like(&second.id).await.unwrap(), Some(1));
        let likes: Vec<(String, u32)> = board
            .list()
            .await
            .into_iter()
            .map(|r| (r.text, r.likes))
            .collect();
        assert_eq!(
            likes,
            [("third".into(), 0), ("second".into(), 1), ("first".into(), 0)]
        );
    }
}
