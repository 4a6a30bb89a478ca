//! Repository for `orders` and `order_items`.
//!
//! [`OrderRepo::place`] is the only way orders are created: header, items,
//! stock deductions and the client's last-order stamp are written on one
//! transaction, so either all of them land or none do.

use sqlx::PgPool;
use stitchflow_core::inventory::{planned_deduction, StockPolicy};
use stitchflow_core::order::{
    compatibility_snapshot, generate_order_id, OrderFinancials, STATUS_PENDING,
};
use stitchflow_core::types::{round_amount, Amount, DbId};

use crate::models::order::{
    CreateOrder, Order, OrderDetail, OrderHeader, OrderItemView, OrderSummary, UpdateOrder,
};
use crate::repositories::{ClientRepo, DeductOutcome, FabricRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, status, order_date, delivery_date, selling_price, \
                       stitching_cost, fabric_cost, courier_cost_from_me, courier_cost_to_me, \
                       total_cost, profit, remarks, fabric_id, dress_name, size_chart, quantity, \
                       fabric_required, created_at, updated_at";

/// Same columns qualified with the `o` alias, for joined queries.
const JOINED_COLUMNS: &str = "o.id, o.client_id, o.status, o.order_date, o.delivery_date, \
                              o.selling_price, o.stitching_cost, o.fabric_cost, \
                              o.courier_cost_from_me, o.courier_cost_to_me, o.total_cost, \
                              o.profit, o.remarks, o.fabric_id, o.dress_name, o.size_chart, \
                              o.quantity, o.fabric_required, o.created_at, o.updated_at";

const SUMMARY_COLUMNS: &str = "o.id, o.client_id, c.name AS client_name, o.fabric_id, \
                               f.name AS fabric_name, o.dress_name, o.quantity, o.status, \
                               o.order_date, o.delivery_date, o.selling_price, o.total_cost, \
                               o.profit";

const ITEM_COLUMNS: &str = "i.id, i.order_id, i.product_id, i.dress_name, i.fabric_id, \
                            i.quantity, i.size_chart, i.fabric_required, i.fabric_cost, \
                            i.stitching_cost, i.selling_price, i.remarks, \
                            f.name AS fabric_name";

/// Foreign key from `orders.client_id` to `clients.id`.
const CLIENT_FK: &str = "orders_client_id_fkey";

/// Errors from [`OrderRepo::place`].
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    #[error("Client {0} not found")]
    ClientNotFound(DbId),

    #[error(
        "Insufficient stock for fabric {fabric_id}: requested {requested}m, available {available}m"
    )]
    InsufficientStock {
        fabric_id: DbId,
        requested: Amount,
        available: Amount,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides order placement, queries and maintenance.
pub struct OrderRepo;

impl OrderRepo {
    /// Place a new order.
    ///
    /// Inserts the header (with its compatibility snapshot and derived
    /// financials), then each item followed by its stock deduction, then
    /// stamps the client's `last_order_date`, all on one transaction. Any
    /// error drops the transaction, rolling everything back.
    ///
    /// The input is expected to have passed `validate_lines` and
    /// `FinancialInputs::validate`.
    pub async fn place(
        pool: &PgPool,
        input: &CreateOrder,
        policy: StockPolicy,
    ) -> Result<Order, PlaceOrderError> {
        let lines = input.lines();
        let snapshot = compatibility_snapshot(&lines);
        let financials = OrderFinancials::derive(&input.financial_inputs(), &lines);
        let id = generate_order_id();

        let mut tx = pool.begin().await?;

        let header_query = format!(
            "INSERT INTO orders
                (id, client_id, status, order_date, delivery_date,
                 selling_price, stitching_cost, fabric_cost,
                 courier_cost_from_me, courier_cost_to_me, total_cost, profit, remarks,
                 fabric_id, dress_name, size_chart, quantity, fabric_required)
             VALUES ($1, $2, COALESCE($3, '{STATUS_PENDING}'), COALESCE($4, CURRENT_DATE), $5,
                     $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&header_query)
            .bind(&id)
            .bind(input.client_id)
            .bind(&input.status)
            .bind(input.order_date)
            .bind(input.delivery_date)
            .bind(financials.selling_price)
            .bind(financials.stitching_cost)
            .bind(financials.fabric_cost)
            .bind(financials.courier_cost_from_me)
            .bind(financials.courier_cost_to_me)
            .bind(financials.total_cost)
            .bind(financials.profit)
            .bind(&input.remarks)
            .bind(snapshot.fabric_id)
            .bind(&snapshot.dress_name)
            .bind(&snapshot.size_chart)
            .bind(snapshot.quantity)
            .bind(snapshot.fabric_required)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_fk_violation(&e, CLIENT_FK) {
                    PlaceOrderError::ClientNotFound(input.client_id)
                } else {
                    PlaceOrderError::Database(e)
                }
            })?;

        for item in &input.items {
            sqlx::query(
                "INSERT INTO order_items
                    (order_id, product_id, dress_name, fabric_id, quantity, size_chart,
                     fabric_required, fabric_cost, stitching_cost, selling_price, remarks)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(&id)
            .bind(item.product_id)
            .bind(&item.dress_name)
            .bind(item.fabric_id)
            .bind(item.quantity)
            .bind(&item.size_chart)
            .bind(round_amount(item.fabric_required))
            .bind(round_amount(item.fabric_cost))
            .bind(round_amount(item.stitching_cost))
            .bind(round_amount(item.selling_price))
            .bind(&item.remarks)
            .execute(&mut *tx)
            .await?;

            let Some((fabric_id, meters)) = planned_deduction(item.fabric_id, item.fabric_required)
            else {
                continue;
            };
            match FabricRepo::deduct(&mut tx, fabric_id, meters, policy).await? {
                DeductOutcome::Deducted(remaining) => {
                    tracing::debug!(
                        order_id = %id,
                        fabric_id,
                        %meters,
                        %remaining,
                        "Stock deducted"
                    );
                }
                DeductOutcome::Insufficient { available } => {
                    return Err(PlaceOrderError::InsufficientStock {
                        fabric_id,
                        requested: meters,
                        available,
                    });
                }
                DeductOutcome::Missing => {
                    // The item insert already enforces the fabric FK.
                    tracing::warn!(order_id = %id, fabric_id, "Deduction skipped, fabric missing");
                }
            }
        }

        if !ClientRepo::touch_last_order(&mut tx, input.client_id).await? {
            return Err(PlaceOrderError::ClientNotFound(input.client_id));
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Find an order header by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Order header with client/fabric names and all line items.
    pub async fn find_detail(pool: &PgPool, id: &str) -> Result<Option<OrderDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, c.name AS client_name, c.email AS client_email,
                    f.name AS fabric_name, f.color AS fabric_color
             FROM orders o
             JOIN clients c ON c.id = o.client_id
             LEFT JOIN fabrics f ON f.id = o.fabric_id
             WHERE o.id = $1"
        );
        let Some(header) = sqlx::query_as::<_, OrderHeader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let items = Self::items_for(pool, id).await?;
        Ok(Some(OrderDetail { header, items }))
    }

    /// Line items of one order in insertion order.
    pub async fn items_for(
        pool: &PgPool,
        order_id: &str,
    ) -> Result<Vec<OrderItemView>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS}
             FROM order_items i
             LEFT JOIN fabrics f ON f.id = i.fabric_id
             WHERE i.order_id = $1
             ORDER BY i.id ASC"
        );
        sqlx::query_as::<_, OrderItemView>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// All orders, newest order date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OrderSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM orders o
             JOIN clients c ON c.id = o.client_id
             LEFT JOIN fabrics f ON f.id = o.fabric_id
             ORDER BY o.order_date DESC, o.created_at DESC"
        );
        sqlx::query_as::<_, OrderSummary>(&query).fetch_all(pool).await
    }

    /// The `limit` newest orders.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<OrderSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM orders o
             JOIN clients c ON c.id = o.client_id
             LEFT JOIN fabrics f ON f.id = o.fabric_id
             ORDER BY o.order_date DESC, o.created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, OrderSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update an order header and recompute `total_cost` and `profit`.
    ///
    /// Line items and fabric stock are left untouched. Returns `None` if no
    /// order with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Order>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let inputs = input.financial_inputs();
        let financials = OrderFinancials::from_parts(
            inputs.selling_price.unwrap_or(current.selling_price),
            inputs.stitching_cost.unwrap_or(current.stitching_cost),
            inputs.fabric_cost.unwrap_or(current.fabric_cost),
            inputs.courier_cost_from_me.unwrap_or(current.courier_cost_from_me),
            inputs.courier_cost_to_me.unwrap_or(current.courier_cost_to_me),
        );

        let query = format!(
            "UPDATE orders SET
                client_id = COALESCE($2, client_id),
                status = COALESCE($3, status),
                order_date = COALESCE($4, order_date),
                delivery_date = COALESCE($5, delivery_date),
                selling_price = $6,
                stitching_cost = $7,
                fabric_cost = $8,
                courier_cost_from_me = $9,
                courier_cost_to_me = $10,
                total_cost = $11,
                profit = $12,
                remarks = COALESCE($13, remarks),
                fabric_id = COALESCE($14, fabric_id),
                dress_name = COALESCE($15, dress_name),
                size_chart = COALESCE($16, size_chart),
                quantity = COALESCE($17, quantity),
                fabric_required = COALESCE($18, fabric_required),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(&input.status)
            .bind(input.order_date)
            .bind(input.delivery_date)
            .bind(financials.selling_price)
            .bind(financials.stitching_cost)
            .bind(financials.fabric_cost)
            .bind(financials.courier_cost_from_me)
            .bind(financials.courier_cost_to_me)
            .bind(financials.total_cost)
            .bind(financials.profit)
            .bind(&input.remarks)
            .bind(input.fabric_id)
            .bind(&input.dress_name)
            .bind(&input.size_chart)
            .bind(input.quantity)
            .bind(input.fabric_required.map(round_amount))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    /// Delete an order; its items go with it via `ON DELETE CASCADE`.
    ///
    /// With `restock`, every item's fabric requirement is returned to its
    /// fabric on the same transaction first. Returns `false` if no order with
    /// the given `id` exists.
    pub async fn delete(pool: &PgPool, id: &str, restock: bool) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked =
            sqlx::query_scalar::<_, String>("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(false);
        }

        if restock {
            let lines = sqlx::query_as::<_, (Option<DbId>, Amount)>(
                "SELECT fabric_id, fabric_required FROM order_items WHERE order_id = $1",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

            for (fabric_id, fabric_required) in lines {
                if let Some((fabric_id, meters)) = planned_deduction(fabric_id, fabric_required) {
                    FabricRepo::restore(&mut tx, fabric_id, meters).await?;
                }
            }
        }

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

fn is_fk_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation() && db.constraint() == Some(constraint))
}
