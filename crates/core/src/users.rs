//! User Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Role;

/// Staff account as `GET /auth/me` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identity.
    pub id: Uuid,

    /// Login email.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role driving admin capabilities.
    pub role: Role,

    /// Whether the account is active.
    pub is_active: bool,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
