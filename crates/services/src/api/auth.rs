use bounce_core::model::UserProfile;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ApiTransport, ensure_success};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Identity returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<AuthResponse> for UserProfile {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            avatar: value.avatar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<RemoteUser> for UserProfile {
    fn from(value: RemoteUser) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            avatar: value.avatar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmailExists {
    #[serde(default)]
    exists: bool,
}

/// Client for the OTP-based `/auth` endpoints.
#[derive(Clone, Debug)]
pub struct AuthClient {
    transport: ApiTransport,
}

impl AuthClient {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .transport
            .client()
            .post(self.transport.url(path))
            .json(body)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Email a one-time code for registration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the service rejects it.
    pub async fn send_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.post("auth/send-otp", &EmailBody { email }).await
    }

    /// Confirm the code and create the account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the code is rejected.
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<AuthResponse, ApiError> {
        self.post("auth/verify-otp", request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post("auth/login", &LoginBody { email, password }).await
    }

    /// Email a one-time code for a password reset.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the service rejects it.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.post("auth/forgot-password", &EmailBody { email }).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the code is rejected.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = ResetPasswordBody {
            email,
            otp,
            new_password,
        };
        self.post("auth/reset-password", &body).await
    }

    /// Look a user up by email. Any failure reads as "no such user".
    pub async fn get_user_by_email(&self, email: &str) -> Option<RemoteUser> {
        match self.fetch_user(email).await {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "user lookup failed");
                None
            }
        }
    }

    /// Whether an account exists for `email`. Any failure reads as `false`.
    pub async fn check_email_exists(&self, email: &str) -> bool {
        match self.fetch_email_exists(email).await {
            Ok(body) => body.exists,
            Err(err) => {
                warn!(error = %err, "email check failed");
                false
            }
        }
    }

    async fn fetch_user(&self, email: &str) -> Result<RemoteUser, ApiError> {
        let base = self.transport.url("auth/user");
        let mut url =
            reqwest::Url::parse(&base).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(base.clone()))?
            .push(email);
        let response = self.transport.client().get(url).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn fetch_email_exists(&self, email: &str) -> Result<EmailExists, ApiError> {
        let response = self
            .transport
            .client()
            .get(self.transport.url("auth/check-email"))
            .query(&[("email", email)])
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounce_core::model::ApiSettingsDraft;

    fn unreachable_client() -> AuthClient {
        let settings = ApiSettingsDraft {
            base_url: Some("http://127.0.0.1:9/api".into()),
        }
        .validate()
        .unwrap();
        AuthClient::new(ApiTransport::new(settings))
    }

    #[test]
    fn reset_body_uses_camel_case() {
        let body = ResetPasswordBody {
            email: "a@b.c",
            otp: "123456",
            new_password: "hunter22",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["newPassword"], "hunter22");
    }

    #[test]
    fn auth_response_becomes_profile() {
        let raw = r#"{"id":3,"email":"a@b.c","name":"Ada Lovelace","message":"ok"}"#;
        let response: AuthResponse = serde_json::from_str(raw).unwrap();
        let profile = UserProfile::from(response);
        assert_eq!(profile.initials(), "AL");
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn remote_user_refreshes_profile() {
        let raw = r#"{"id":9,"email":"a@b.c","name":"Ada","avatar":"a.png","createdAt":"2024-01-01"}"#;
        let user: RemoteUser = serde_json::from_str(raw).unwrap();
        let profile = UserProfile::from(user);
        assert_eq!(profile.id, 9);
        assert_eq!(profile.avatar.as_deref(), Some("a.png"));
    }

    #[tokio::test]
    async fn lookups_degrade_when_service_is_down() {
        let client = unreachable_client();
        assert!(!client.check_email_exists("a@b.c").await);
        assert_eq!(client.get_user_by_email("a@b.c").await, None);
    }
}
