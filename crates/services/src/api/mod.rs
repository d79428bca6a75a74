//! HTTP clients for the hosted comment and auth services.

mod auth;
mod comments;

pub use auth::{AuthClient, AuthResponse, MessageResponse, RemoteUser, VerifyOtpRequest};
pub use comments::{CommentClient, CreateCommentRequest, LevelComment};

use bounce_core::model::ApiSettings;
use reqwest::{Client, Response};

use crate::error::ApiError;

/// Shared transport: one connection pool plus the configured base URL.
#[derive(Clone, Debug)]
pub struct ApiTransport {
    client: Client,
    settings: ApiSettings,
}

impl ApiTransport {
    #[must_use]
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.settings.endpoint(path)
    }
}

/// Turn a non-2xx response into `ApiError::HttpStatus` carrying the body text.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::HttpStatus { status, message })
}
