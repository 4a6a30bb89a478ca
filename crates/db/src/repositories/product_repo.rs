//! Repository for the `products` table.

use sqlx::PgPool;
use stitchflow_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Product columns joined with the default fabric's name. Expects the
/// product row aliased as `p` and a `LEFT JOIN fabrics f`.
const COLUMNS: &str = "p.id, p.name, p.default_fabric_id, f.name AS default_fabric_name, \
                       p.base_price, p.description, p.created_at";

/// Provides CRUD operations for catalog products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// Fails with a unique violation (`uq_products_name`) on a duplicate name.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO products (name, default_fabric_id, base_price, description)
                VALUES ($1, $2, COALESCE($3, 0), $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM p LEFT JOIN fabrics f ON f.id = p.default_fabric_id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.default_fabric_id)
            .bind(input.base_price)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             LEFT JOIN fabrics f ON f.id = p.default_fabric_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products p
             LEFT JOIN fabrics f ON f.id = p.default_fabric_id
             ORDER BY p.name ASC"
        );
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE products SET
                    name = COALESCE($2, name),
                    default_fabric_id = COALESCE($3, default_fabric_id),
                    base_price = COALESCE($4, base_price),
                    description = COALESCE($5, description)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM p LEFT JOIN fabrics f ON f.id = p.default_fabric_id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.default_fabric_id)
            .bind(input.base_price)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    ///
    /// Order items that referenced the product keep their own copy of the
    /// dress name; their `product_id` is cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
