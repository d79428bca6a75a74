use bounce_core::model::{LevelId, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiTransport, ensure_success};
use crate::error::ApiError;

/// A discussion entry under a level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelComment {
    pub id: i64,
    pub content: String,
    pub level_id: String,
    pub author: String,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl LevelComment {
    /// Only the author, matched by email, may delete a comment.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserProfile) -> bool {
        self.author_email
            .as_deref()
            .is_some_and(|email| email.eq_ignore_ascii_case(&user.email))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub level_id: LevelId,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
}

/// Client for `/level-comments`.
#[derive(Clone, Debug)]
pub struct CommentClient {
    transport: ApiTransport,
}

impl CommentClient {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Comments posted under `level`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the service rejects it.
    pub async fn list(&self, level: LevelId) -> Result<Vec<LevelComment>, ApiError> {
        let url = self
            .transport
            .url(&format!("level-comments/{}", level.as_str()));
        let response = self.transport.client().get(url).send().await?;
        let comments: Vec<LevelComment> = ensure_success(response).await?.json().await?;
        debug!(%level, count = comments.len(), "comments loaded");
        Ok(comments)
    }

    /// Post a new comment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the service rejects it.
    pub async fn create(&self, request: &CreateCommentRequest) -> Result<LevelComment, ApiError> {
        let response = self
            .transport
            .client()
            .post(self.transport.url("level-comments"))
            .json(request)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Delete comment `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the service rejects it.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .transport
            .client()
            .delete(self.transport.url(&format!("level-comments/{id}")))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
