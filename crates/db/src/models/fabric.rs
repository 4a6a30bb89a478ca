//! Fabric (inventory) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchflow_core::types::{Amount, DbId, Timestamp};

/// A row from the `fabrics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    /// May be negative under the permissive stock policy.
    pub meters_available: Amount,
    pub meters_per_outfit: Amount,
    pub price_per_meter: Amount,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    /// Last stock movement or edit; shown as "last updated" in the UI.
    pub updated_at: Timestamp,
}

/// DTO for creating a fabric.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFabric {
    pub name: String,
    pub color: Option<String>,
    pub meters_available: Option<Amount>,
    pub meters_per_outfit: Option<Amount>,
    pub price_per_meter: Option<Amount>,
    /// Defaults to `In Stock` if omitted.
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating a fabric. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFabric {
    pub name: Option<String>,
    pub color: Option<String>,
    pub meters_available: Option<Amount>,
    pub meters_per_outfit: Option<Amount>,
    pub price_per_meter: Option<Amount>,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for `PATCH /api/fabrics/{id}/stock`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStock {
    pub meters_available: Amount,
}
