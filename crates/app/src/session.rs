//! Staff session and admin gating.
//!
//! Admin checks always resolve the authenticated identity first and only
//! then consult the capability table, so a gate can never fire before the
//! session state is known.

use thiserror::Error;

use canteen::{
    access::{AdminAction, Role},
    users::User,
};

use crate::api::{ApiError, AuthApi, AuthBackend};

/// Errors produced by gated admin access.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No session is held; the caller must log in first.
    #[error("not authenticated; run `login` first")]
    NotAuthenticated,

    /// The resolved role lacks the required capability.
    #[error("access denied: role {role} may not perform this action")]
    Denied {
        /// The caller's resolved role.
        role: Role,
    },

    /// Identity resolution failed.
    #[error(transparent)]
    Api(ApiError),
}

/// The staff session: login, logout, and capability-gated identity.
#[derive(Clone)]
pub struct Session<A = AuthApi> {
    auth: A,
}

impl<A: AuthBackend> Session<A> {
    /// Creates a session over an auth backend.
    #[must_use]
    pub fn new(auth: A) -> Self {
        Self { auth }
    }

    /// Authenticates and stores the issued tokens.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection or a transport error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.auth.login(email, password).await
    }

    /// Revokes the refresh token and discards stored tokens.
    ///
    /// # Errors
    ///
    /// Returns the revocation failure; local tokens are cleared regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.auth.logout().await
    }

    /// Resolves the authenticated account.
    ///
    /// # Errors
    ///
    /// [`AccessError::NotAuthenticated`] when no tokens are held or they
    /// no longer authenticate; other API failures pass through.
    pub async fn current_user(&self) -> Result<User, AccessError> {
        match self.auth.me().await {
            Ok(user) => Ok(user),
            Err(ApiError::Unauthenticated) => Err(AccessError::NotAuthenticated),
            Err(error) => Err(AccessError::Api(error)),
        }
    }

    /// Resolves the identity, then requires `action` of its role.
    ///
    /// # Errors
    ///
    /// [`AccessError::Denied`] when the capability table does not grant
    /// the action, plus everything [`Session::current_user`] returns.
    pub async fn authorize(&self, action: AdminAction) -> Result<User, AccessError> {
        let user = self.current_user().await?;

        if !user.role.may(action) {
            return Err(AccessError::Denied { role: user.role });
        }

        Ok(user)
    }
}
