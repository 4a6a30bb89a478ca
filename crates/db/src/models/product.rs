//! Catalog product (dress type) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchflow_core::types::{Amount, DbId, Timestamp};

/// A row from the `products` table joined with its default fabric's name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub default_fabric_id: Option<DbId>,
    pub default_fabric_name: Option<String>,
    pub base_price: Amount,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a product. `name` must be unique.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub default_fabric_id: Option<DbId>,
    /// Defaults to 0 if omitted.
    pub base_price: Option<Amount>,
    pub description: Option<String>,
}

/// DTO for updating a product. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub default_fabric_id: Option<DbId>,
    pub base_price: Option<Amount>,
    pub description: Option<String>,
}
