//! Dashboard aggregate rows.

use serde::Serialize;
use sqlx::FromRow;
use stitchflow_core::types::{Amount, Date};

use super::fabric::Fabric;
use super::order::OrderSummary;

/// All-time headline figures.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTotals {
    /// Sum of `selling_price` over non-cancelled orders.
    pub revenue: Amount,
    /// Sum of `profit` over non-cancelled orders.
    pub profit: Amount,
    /// Count of non-cancelled orders.
    pub active_orders: i64,
}

/// Raw trend bucket as returned by the database.
#[derive(Debug, Clone, FromRow)]
pub struct TrendBucket {
    pub bucket: Date,
    pub revenue: Amount,
    pub profit: Amount,
}

/// One point of the revenue/profit chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub bucket: Date,
    pub revenue: Amount,
    pub profit: Amount,
}

/// Order count for one status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub name: String,
    pub value: i64,
}

/// Outfits made from one fabric within the usage window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FabricUsage {
    pub name: String,
    pub amount: i64,
}

/// Everything the dashboard shows except the signed-in user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub totals: FinancialTotals,
    pub chart_data: Vec<ChartPoint>,
    pub status_data: Vec<StatusCount>,
    pub fabric_usage_data: Vec<FabricUsage>,
    pub low_stock_fabrics: Vec<Fabric>,
    pub recent_orders: Vec<OrderSummary>,
}
