//! Authentication endpoints.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use canteen::users::User;

use crate::api::{ApiClient, ApiError};

/// The authentication seam the session depends on, mockable in tests.
#[automock]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Authenticates and installs the issued token pair.
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// Revokes the refresh token and discards the stored pair.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Resolves the currently authenticated account.
    async fn me(&self) -> Result<User, ApiError>;
}

/// Access/refresh token pair as the backend issues it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,

    /// Long-lived token exchanged for new pairs.
    pub refresh_token: String,
}

/// Payload of a successful `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The authenticated account.
    pub user: User,

    /// The issued token pair.
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Typed wrapper over the `/auth` endpoints.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenBody {
    refresh_token: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthApi {
    /// Creates the wrapper over a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticates and installs the issued token pair on the client.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection message or a transport error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response: LoginResponse = self
            .client
            .post("/auth/login", &LoginBody { email, password })
            .await?;

        self.client.set_tokens(response.tokens).await;

        Ok(response.user)
    }

    /// Revokes the refresh token and discards the stored pair. The stored
    /// pair is discarded even when revocation fails, so a dead backend
    /// cannot pin a session locally.
    ///
    /// # Errors
    ///
    /// Returns the revocation failure after local state has been cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let refresh_token = self.client.refresh_token().await;

        let result = match refresh_token {
            Some(refresh_token) => {
                self.client
                    .post_empty("/auth/logout", &RefreshTokenBody { refresh_token })
                    .await
            }
            None => Ok(()),
        };

        self.client.clear_tokens().await;

        result
    }

    /// The currently authenticated account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] when no token pair is held,
    /// and backend/transport errors otherwise.
    pub async fn me(&self) -> Result<User, ApiError> {
        if !self.client.has_tokens().await {
            return Err(ApiError::Unauthenticated);
        }

        self.client.get("/auth/me", &[]).await
    }
}

#[async_trait]
impl AuthBackend for AuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        AuthApi::login(self, email, password).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        AuthApi::logout(self).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        AuthApi::me(self).await
    }
}
