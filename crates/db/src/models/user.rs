//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchflow_core::types::{DbId, JsonObject, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub google_id: Option<String>,
    pub avatar_url: Option<String>,
    pub nickname: Option<String>,
    /// Free-form UI preferences (chart visibility, chart types, ...).
    pub preferences: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile returned by the identity provider after a successful sign-in.
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// DTO for `PUT /api/users/me`. Omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub nickname: Option<String>,
    pub preferences: Option<JsonObject>,
}
