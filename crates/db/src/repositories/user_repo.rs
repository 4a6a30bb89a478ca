//! Repository for the `users` table.

use sqlx::PgPool;
use stitchflow_core::types::DbId;

use crate::models::user::{ExternalProfile, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, google_id, avatar_url, nickname, preferences, \
                       created_at, updated_at";

/// Provides lookups and profile maintenance for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The earliest registered user, if any. The dashboard falls back to
    /// this account when no session is presented.
    pub async fn find_first(pool: &PgPool) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id LIMIT 1");
        sqlx::query_as::<_, User>(&query).fetch_optional(pool).await
    }

    /// Find a user by external identity, falling back to email.
    ///
    /// A Google id match wins over an email match.
    pub async fn find_by_google_or_email(
        pool: &PgPool,
        google_id: &str,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE google_id = $1 OR email = $2
             ORDER BY (google_id = $1) DESC NULLS LAST
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(google_id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Create a user from an identity-provider profile.
    pub async fn create_from_profile(
        pool: &PgPool,
        profile: &ExternalProfile,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, google_id, avatar_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.google_id)
            .bind(&profile.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Attach an external identity to an existing account. The stored avatar
    /// is only replaced when the account has none.
    pub async fn link_google(
        pool: &PgPool,
        id: DbId,
        profile: &ExternalProfile,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                google_id = $2,
                avatar_url = COALESCE(avatar_url, $3),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&profile.google_id)
            .bind(&profile.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar_url = COALESCE($4, avatar_url),
                nickname = COALESCE($5, nickname),
                preferences = COALESCE($6, preferences),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.avatar_url)
            .bind(&input.nickname)
            .bind(input.preferences.clone().map(serde_json::Value::Object))
            .fetch_optional(pool)
            .await
    }
}
