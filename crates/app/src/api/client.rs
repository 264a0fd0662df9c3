//! HTTP client for the backend REST API.
//!
//! Wraps `reqwest` with the response envelope, bearer authentication, and a
//! single refresh-and-retry when an access token has expired.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, Envelope, TokenPair},
    storage::TokenStorage,
};

/// Configuration for reaching the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, e.g. `"http://localhost:3000/api"`.
    pub base_url: String,
}

/// Shared API client. Cloning is cheap; clones share the token pair.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<RwLock<Option<TokenPair>>>,
    token_store: Arc<dyn TokenStorage>,
}

impl ApiClient {
    /// Creates a client, restoring any persisted token pair.
    #[must_use]
    pub fn new(config: ApiConfig, token_store: Arc<dyn TokenStorage>) -> Self {
        let tokens = token_store.load();

        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(RwLock::new(tokens)),
            token_store,
        }
    }

    /// GET `path`, unwrapping the envelope into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a backend-reported error, or
    /// an undecodable payload.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        self.dispatch(Method::GET, path, query, None).await
    }

    /// GET `path`, unwrapping the envelope into a list. A successful
    /// response without a payload yields an empty list.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get`].
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let Envelope {
            success,
            data,
            count,
            message,
            error,
        } = self.dispatch_envelope(Method::GET, path, query, None).await?;

        let envelope = Envelope {
            success,
            data: data
                .map(serde_json::from_value::<Vec<T>>)
                .transpose()
                .map_err(ApiError::Decode)?,
            count,
            message,
            error,
        };

        envelope.into_list()
    }

    /// POST `body` to `path`, unwrapping the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get`], plus body encoding failures.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.dispatch(Method::POST, path, &[], Some(body)).await
    }

    /// PUT `body` to `path`, unwrapping the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::post`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.dispatch(Method::PUT, path, &[], Some(body)).await
    }

    /// PATCH `body` to `path`, unwrapping the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::post`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.dispatch(Method::PATCH, path, &[], Some(body)).await
    }

    /// POST `body` to `path`, expecting no payload.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::post`].
    pub async fn post_empty(&self, path: &str, body: &impl Serialize) -> Result<(), ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.dispatch_envelope(Method::POST, path, &[], Some(body))
            .await?
            .into_unit()
    }

    /// DELETE `path`, expecting no payload.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch_envelope(Method::DELETE, path, &[], None)
            .await?
            .into_unit()
    }

    /// Installs a token pair and persists it.
    pub async fn set_tokens(&self, tokens: TokenPair) {
        if let Err(error) = self.token_store.save(&tokens) {
            warn!("failed to persist tokens: {error}");
        }

        *self.tokens.write().await = Some(tokens);
    }

    /// Discards the held token pair and its persisted copy.
    pub async fn clear_tokens(&self) {
        if let Err(error) = self.token_store.clear() {
            warn!("failed to clear persisted tokens: {error}");
        }

        *self.tokens.write().await = None;
    }

    /// Whether a token pair is currently held.
    pub async fn has_tokens(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// The held refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|tokens| tokens.refresh_token.clone())
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let envelope = self.dispatch_envelope(method, path, query, body).await?;

        let data = envelope.into_data()?;

        serde_json::from_value(data).map_err(ApiError::Decode)
    }

    async fn dispatch_envelope(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<Envelope<Value>, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut retried = false;

        loop {
            let mut request = self.http.request(method.clone(), &url);

            if !query.is_empty() {
                request = request.query(query);
            }

            if let Some(body) = &body {
                request = request.json(body);
            }

            if let Some(tokens) = self.tokens.read().await.as_ref() {
                request = request.bearer_auth(&tokens.access_token);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && !retried {
                retried = true;

                if self.refresh().await {
                    debug!("retrying {method} {path} after token refresh");
                    continue;
                }
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();

                return Err(failure_from_body(status, &text));
            }

            return Ok(response.json::<Envelope<Value>>().await?);
        }
    }

    /// Exchanges the held refresh token for a new pair. Returns whether the
    /// exchange succeeded; failures are logged, never propagated, so the
    /// original request's 401 surfaces instead.
    async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.refresh_token().await else {
            return false;
        };

        let url = format!("{}/auth/refresh", self.base_url);
        let body = serde_json::json!({ "refreshToken": refresh_token });

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!("token refresh failed: {error}");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!("token refresh rejected with status {}", response.status());
            return false;
        }

        match response.json::<Envelope<TokenPair>>().await {
            Ok(envelope) => match envelope.into_data() {
                Ok(tokens) => {
                    self.set_tokens(tokens).await;
                    true
                }
                Err(error) => {
                    warn!("token refresh returned no tokens: {error}");
                    false
                }
            },
            Err(error) => {
                warn!("failed to decode refresh response: {error}");
                false
            }
        }
    }
}

/// Maps a non-2xx response to an error, preferring the envelope's own
/// message when the body carries one.
fn failure_from_body(status: StatusCode, text: &str) -> ApiError {
    if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(text) {
        if let Some(error) = envelope.error {
            return ApiError::Backend(error);
        }

        if let Some(message) = envelope.message {
            return ApiError::Backend(message);
        }
    }

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthenticated;
    }

    ApiError::Backend(format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryTokenStorage;

    use super::*;

    fn client(store: Arc<MemoryTokenStorage>) -> ApiClient {
        ApiClient::new(
            ApiConfig {
                base_url: "http://localhost:9/api/".to_string(),
            },
            store,
        )
    }

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[tokio::test]
    async fn tokens_install_and_clear_through_the_store() {
        let store = Arc::new(MemoryTokenStorage::default());
        let client = client(Arc::clone(&store));

        assert!(!client.has_tokens().await, "fresh client must hold no tokens");

        client.set_tokens(pair()).await;

        assert_eq!(client.refresh_token().await.as_deref(), Some("refresh"));
        assert!(store.load().is_some(), "pair must be written through");

        client.clear_tokens().await;

        assert!(!client.has_tokens().await);
        assert!(store.load().is_none(), "cleared pair must not persist");
    }

    #[tokio::test]
    async fn construction_restores_persisted_tokens() {
        let store = Arc::new(MemoryTokenStorage::default());
        store
            .save(&pair())
            .unwrap_or_else(|error| panic!("save failed: {error}"));

        let client = client(store);

        assert!(client.has_tokens().await, "persisted pair must be restored");
    }

    #[test]
    fn failure_prefers_envelope_error_message() {
        let error = failure_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "error": "Order cannot be deleted"}"#,
        );

        assert!(
            matches!(error, ApiError::Backend(ref message) if message == "Order cannot be deleted"),
            "expected verbatim backend message, got {error:?}"
        );
    }

    #[test]
    fn failure_without_envelope_reports_status() {
        let error = failure_from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

        assert!(
            matches!(error, ApiError::Backend(ref message) if message.contains("502")),
            "expected status-derived message, got {error:?}"
        );
    }

    #[test]
    fn unauthorized_without_envelope_maps_to_unauthenticated() {
        let error = failure_from_body(StatusCode::UNAUTHORIZED, "");

        assert!(
            matches!(error, ApiError::Unauthenticated),
            "expected Unauthenticated, got {error:?}"
        );
    }
}
