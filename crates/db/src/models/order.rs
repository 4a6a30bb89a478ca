//! Order header, line items and their DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchflow_core::order::{FinancialInputs, LineFigures};
use stitchflow_core::types::{Amount, Date, DbId, Timestamp};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_id: DbId,
    pub status: String,
    pub order_date: Date,
    pub delivery_date: Option<Date>,
    pub selling_price: Amount,
    pub stitching_cost: Amount,
    pub fabric_cost: Amount,
    pub courier_cost_from_me: Amount,
    pub courier_cost_to_me: Amount,
    pub total_cost: Amount,
    pub profit: Amount,
    pub remarks: Option<String>,
    // Single-item snapshot of the line items.
    pub fabric_id: Option<DbId>,
    pub dress_name: Option<String>,
    pub size_chart: Option<String>,
    pub quantity: i32,
    pub fabric_required: Amount,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: String,
    pub product_id: Option<DbId>,
    pub dress_name: String,
    pub fabric_id: Option<DbId>,
    pub quantity: i32,
    pub size_chart: Option<String>,
    pub fabric_required: Amount,
    pub fabric_cost: Amount,
    pub stitching_cost: Amount,
    pub selling_price: Amount,
    pub remarks: Option<String>,
}

/// Line item joined with its fabric's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: OrderItem,
    pub fabric_name: Option<String>,
}

/// Order list row (`GET /api/orders`, dashboard recent orders).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub client_id: DbId,
    pub client_name: String,
    pub fabric_id: Option<DbId>,
    pub fabric_name: Option<String>,
    pub dress_name: Option<String>,
    pub quantity: i32,
    pub status: String,
    pub order_date: Date,
    pub delivery_date: Option<Date>,
    pub selling_price: Amount,
    pub total_cost: Amount,
    pub profit: Amount,
}

/// Order header joined with client and snapshot fabric details.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub client_name: String,
    pub client_email: Option<String>,
    pub fabric_name: Option<String>,
    pub fabric_color: Option<String>,
}

/// Full order as served by `GET /api/orders/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub items: Vec<OrderItemView>,
}

fn default_quantity() -> i32 {
    1
}

/// One line of a new order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub product_id: Option<DbId>,
    pub dress_name: String,
    pub fabric_id: Option<DbId>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub size_chart: Option<String>,
    #[serde(default)]
    pub fabric_required: Amount,
    #[serde(default)]
    pub fabric_cost: Amount,
    #[serde(default)]
    pub stitching_cost: Amount,
    #[serde(default)]
    pub selling_price: Amount,
    pub remarks: Option<String>,
}

impl CreateOrderItem {
    pub fn figures(&self) -> LineFigures<'_> {
        LineFigures {
            dress_name: &self.dress_name,
            fabric_id: self.fabric_id,
            size_chart: self.size_chart.as_deref(),
            quantity: self.quantity,
            fabric_required: self.fabric_required,
            fabric_cost: self.fabric_cost,
            stitching_cost: self.stitching_cost,
            selling_price: self.selling_price,
        }
    }
}

/// DTO for `POST /api/orders`.
///
/// Any `id` in the request body is ignored; order ids are generated on write.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub client_id: DbId,
    /// Defaults to `Pending` if omitted.
    pub status: Option<String>,
    /// Defaults to today if omitted.
    pub order_date: Option<Date>,
    pub delivery_date: Option<Date>,
    pub remarks: Option<String>,
    pub selling_price: Option<Amount>,
    pub stitching_cost: Option<Amount>,
    pub fabric_cost: Option<Amount>,
    pub courier_cost_from_me: Option<Amount>,
    pub courier_cost_to_me: Option<Amount>,
    #[serde(default)]
    pub items: Vec<CreateOrderItem>,
}

impl CreateOrder {
    pub fn lines(&self) -> Vec<LineFigures<'_>> {
        self.items.iter().map(CreateOrderItem::figures).collect()
    }

    pub fn financial_inputs(&self) -> FinancialInputs {
        FinancialInputs {
            selling_price: self.selling_price,
            stitching_cost: self.stitching_cost,
            fabric_cost: self.fabric_cost,
            courier_cost_from_me: self.courier_cost_from_me,
            courier_cost_to_me: self.courier_cost_to_me,
        }
    }
}

/// DTO for `PUT /api/orders/{id}`. Header only; line items and stock are
/// not touched. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    pub client_id: Option<DbId>,
    pub status: Option<String>,
    pub order_date: Option<Date>,
    pub delivery_date: Option<Date>,
    pub selling_price: Option<Amount>,
    pub stitching_cost: Option<Amount>,
    pub fabric_cost: Option<Amount>,
    pub courier_cost_from_me: Option<Amount>,
    pub courier_cost_to_me: Option<Amount>,
    pub remarks: Option<String>,
    pub fabric_id: Option<DbId>,
    pub dress_name: Option<String>,
    pub size_chart: Option<String>,
    pub quantity: Option<i32>,
    pub fabric_required: Option<Amount>,
}

impl UpdateOrder {
    pub fn financial_inputs(&self) -> FinancialInputs {
        FinancialInputs {
            selling_price: self.selling_price,
            stitching_cost: self.stitching_cost,
            fabric_cost: self.fabric_cost,
            courier_cost_from_me: self.courier_cost_from_me,
            courier_cost_to_me: self.courier_cost_to_me,
        }
    }
}
