//! Repository for the `fabrics` table, including the stock ledger.
//!
//! Stock only moves through single in-place statements
//! (`meters_available = meters_available - $1`). When run on an order's
//! transaction the updated row stays locked until commit, so concurrent
//! orders against one fabric queue up instead of overwriting each other.

use sqlx::{PgConnection, PgPool};
use stitchflow_core::inventory::{StockPolicy, LOW_STOCK_THRESHOLD_METERS};
use stitchflow_core::types::{Amount, DbId};

use crate::models::fabric::{CreateFabric, Fabric, UpdateFabric};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, meters_available, meters_per_outfit, price_per_meter, \
                       status, image_url, created_at, updated_at";

/// Result of a stock deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductOutcome {
    /// Stock was reduced; carries the new level.
    Deducted(Amount),
    /// Strict policy only: the fabric has fewer meters than requested.
    Insufficient { available: Amount },
    /// No fabric with that id.
    Missing,
}

/// Provides CRUD and stock movements for fabrics.
pub struct FabricRepo;

impl FabricRepo {
    /// Insert a new fabric, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFabric) -> Result<Fabric, sqlx::Error> {
        let query = format!(
            "INSERT INTO fabrics
                (name, color, meters_available, meters_per_outfit, price_per_meter,
                 status, image_url)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0),
                     COALESCE($6, 'In Stock'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.meters_available)
            .bind(input.meters_per_outfit)
            .bind(input.price_per_meter)
            .bind(&input.status)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a fabric by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fabric>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fabrics WHERE id = $1");
        sqlx::query_as::<_, Fabric>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all fabrics, scarcest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fabric>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fabrics ORDER BY meters_available ASC, id ASC");
        sqlx::query_as::<_, Fabric>(&query).fetch_all(pool).await
    }

    /// Fabrics below the low-stock threshold, scarcest first.
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<Fabric>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fabrics
             WHERE meters_available < $1
             ORDER BY meters_available ASC, id ASC"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(Amount::from(LOW_STOCK_THRESHOLD_METERS))
            .fetch_all(pool)
            .await
    }

    /// Update a fabric. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFabric,
    ) -> Result<Option<Fabric>, sqlx::Error> {
        let query = format!(
            "UPDATE fabrics SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                meters_available = COALESCE($4, meters_available),
                meters_per_outfit = COALESCE($5, meters_per_outfit),
                price_per_meter = COALESCE($6, price_per_meter),
                status = COALESCE($7, status),
                image_url = COALESCE($8, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.meters_available)
            .bind(input.meters_per_outfit)
            .bind(input.price_per_meter)
            .bind(&input.status)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Set the stock level to an absolute value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_stock(
        pool: &PgPool,
        id: DbId,
        meters: Amount,
    ) -> Result<Option<Fabric>, sqlx::Error> {
        let query = format!(
            "UPDATE fabrics SET meters_available = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabric>(&query)
            .bind(id)
            .bind(meters)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fabric by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while orders reference the fabric.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fabrics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Current stock of a fabric, read on the caller's connection.
    pub async fn available(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Amount>, sqlx::Error> {
        sqlx::query_scalar::<_, Amount>("SELECT meters_available FROM fabrics WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Remove `meters` from a fabric's stock on the caller's connection.
    ///
    /// Under [`StockPolicy::Strict`] the row is only touched when enough
    /// stock is present; otherwise [`DeductOutcome::Insufficient`] reports
    /// the current level and nothing changes.
    pub async fn deduct(
        conn: &mut PgConnection,
        id: DbId,
        meters: Amount,
        policy: StockPolicy,
    ) -> Result<DeductOutcome, sqlx::Error> {
        let query = match policy {
            StockPolicy::Permissive => {
                "UPDATE fabrics SET meters_available = meters_available - $1, updated_at = NOW()
                 WHERE id = $2
                 RETURNING meters_available"
            }
            StockPolicy::Strict => {
                "UPDATE fabrics SET meters_available = meters_available - $1, updated_at = NOW()
                 WHERE id = $2 AND meters_available >= $1
                 RETURNING meters_available"
            }
        };
        let remaining = sqlx::query_scalar::<_, Amount>(query)
            .bind(meters)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(level) = remaining {
            return Ok(DeductOutcome::Deducted(level));
        }
        match Self::available(conn, id).await? {
            Some(available) => Ok(DeductOutcome::Insufficient { available }),
            None => Ok(DeductOutcome::Missing),
        }
    }

    /// Return `meters` to a fabric's stock on the caller's connection.
    /// Returns `false` if the fabric no longer exists.
    pub async fn restore(
        conn: &mut PgConnection,
        id: DbId,
        meters: Amount,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE fabrics SET meters_available = meters_available + $1, updated_at = NOW()
             WHERE id = $2",
        )
        .bind(meters)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
