//! Repository for the `clients` table.

use sqlx::{PgConnection, PgPool};
use stitchflow_core::types::DbId;

use crate::models::client::{Client, ClientOrder, CreateClient, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, address, status, avatar_url, member_since, \
                       last_order_date, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `Active`.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone, address, status, avatar_url)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'Active'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.status)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a client by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients, most recent customer first. Clients that never
    /// ordered come last, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             ORDER BY last_order_date DESC NULLS LAST, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// A client's orders, most recent order date first.
    pub async fn orders_for(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientOrder>, sqlx::Error> {
        sqlx::query_as::<_, ClientOrder>(
            "SELECT o.id, o.fabric_id, f.name AS fabric_name, o.dress_name, o.quantity,
                    o.status, o.order_date, o.selling_price
             FROM orders o
             LEFT JOIN fabrics f ON f.id = o.fabric_id
             WHERE o.client_id = $1
             ORDER BY o.order_date DESC, o.created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                status = COALESCE($6, status),
                avatar_url = COALESCE($7, avatar_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.status)
            .bind(&input.avatar_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while the client still has orders.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp the client's last order date. Returns `false` if the client
    /// does not exist.
    pub async fn touch_last_order(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE clients SET last_order_date = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
