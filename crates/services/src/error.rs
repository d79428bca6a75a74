//! Shared error types for the services crate.

use thiserror::Error;

use bounce_core::model::{ApiSettingsError, CatalogError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore` write paths. Reads never fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Progress(#[from] ProgressStoreError),
}

/// Errors emitted by `IdentityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode user: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `ReviewBoard`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReviewBoardError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("review text is empty")]
    EmptyText,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode reviews: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by the comment and auth clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    ApiSettings(#[from] ApiSettingsError),
}
