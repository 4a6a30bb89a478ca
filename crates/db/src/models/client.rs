//! Client entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchflow_core::types::{Amount, Date, DbId, Timestamp};

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub avatar_url: Option<String>,
    pub member_since: Timestamp,
    /// Refreshed by every new order placed for this client.
    pub last_order_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Defaults to `Active` if omitted.
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

/// DTO for updating a client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

/// One of a client's orders, as listed on the client detail page.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrder {
    pub id: String,
    pub fabric_id: Option<DbId>,
    pub fabric_name: Option<String>,
    pub dress_name: Option<String>,
    pub quantity: i32,
    pub status: String,
    pub order_date: Date,
    pub selling_price: Amount,
}

/// Client plus its order history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub recent_orders: Vec<ClientOrder>,
}
