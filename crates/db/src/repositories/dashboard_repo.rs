//! Aggregate queries behind the dashboard.
//!
//! Every query tolerates an empty database: sums are coalesced to zero and
//! grouped queries simply return no rows.

use sqlx::PgPool;
use stitchflow_core::order::STATUS_CANCELLED;
use stitchflow_core::reporting::{
    TrendRange, FABRIC_USAGE_WINDOW_DAYS, RECENT_ORDERS_LIMIT, TOP_FABRICS_LIMIT,
};

use crate::models::dashboard::{
    ChartPoint, DashboardSnapshot, FabricUsage, FinancialTotals, StatusCount, TrendBucket,
};
use crate::repositories::{FabricRepo, OrderRepo};

/// Provides read-only dashboard aggregates.
pub struct DashboardRepo;

impl DashboardRepo {
    /// All-time revenue, profit and order count, cancelled orders excluded.
    pub async fn totals(pool: &PgPool) -> Result<FinancialTotals, sqlx::Error> {
        sqlx::query_as::<_, FinancialTotals>(
            "SELECT COALESCE(SUM(selling_price), 0) AS revenue,
                    COALESCE(SUM(profit), 0) AS profit,
                    COUNT(*) AS active_orders
             FROM orders
             WHERE status <> $1",
        )
        .bind(STATUS_CANCELLED)
        .fetch_one(pool)
        .await
    }

    /// Revenue and profit per bucket inside the range window, oldest first.
    pub async fn trend(pool: &PgPool, range: TrendRange) -> Result<Vec<ChartPoint>, sqlx::Error> {
        let bucket_size = range.bucket_size();
        let rows = sqlx::query_as::<_, TrendBucket>(
            "SELECT DATE_TRUNC($1, order_date::timestamp)::date AS bucket,
                    COALESCE(SUM(selling_price), 0) AS revenue,
                    COALESCE(SUM(profit), 0) AS profit
             FROM orders
             WHERE status <> $2
               AND order_date > CURRENT_DATE - $3::interval
             GROUP BY 1
             ORDER BY 1 ASC",
        )
        .bind(bucket_size.trunc_unit())
        .bind(STATUS_CANCELLED)
        .bind(range.interval())
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ChartPoint {
                name: bucket_size.label(row.bucket),
                bucket: row.bucket,
                revenue: row.revenue,
                profit: row.profit,
            })
            .collect())
    }

    /// Order count per status over all orders.
    pub async fn status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status AS name, COUNT(*) AS value
             FROM orders
             GROUP BY status
             ORDER BY value DESC, status ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Most-used fabrics by item quantity over the recent usage window.
    pub async fn fabric_usage(pool: &PgPool) -> Result<Vec<FabricUsage>, sqlx::Error> {
        sqlx::query_as::<_, FabricUsage>(
            "SELECT f.name, SUM(i.quantity)::BIGINT AS amount
             FROM order_items i
             JOIN orders o ON o.id = i.order_id
             JOIN fabrics f ON f.id = i.fabric_id
             WHERE o.order_date > CURRENT_DATE - make_interval(days => $1)
             GROUP BY f.id, f.name
             ORDER BY amount DESC, f.name ASC
             LIMIT $2",
        )
        .bind(FABRIC_USAGE_WINDOW_DAYS)
        .bind(TOP_FABRICS_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Collect every dashboard aggregate.
    pub async fn snapshot(
        pool: &PgPool,
        range: TrendRange,
    ) -> Result<DashboardSnapshot, sqlx::Error> {
        Ok(DashboardSnapshot {
            totals: Self::totals(pool).await?,
            chart_data: Self::trend(pool, range).await?,
            status_data: Self::status_counts(pool).await?,
            fabric_usage_data: Self::fabric_usage(pool).await?,
            low_stock_fabrics: FabricRepo::list_low_stock(pool).await?,
            recent_orders: OrderRepo::list_recent(pool, RECENT_ORDERS_LIMIT).await?,
        })
    }
}
