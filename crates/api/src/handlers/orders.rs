//! Handlers for the `/orders` resource.
//!
//! Creation goes through [`OrderRepo::place`], which writes the header, its
//! items and the stock deductions on one transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::error::CoreError;
use stitchflow_core::order::{
    compatibility_snapshot, validate_amount, validate_lines, validate_status, OrderFinancials,
    MAX_LINE_QUANTITY,
};
use stitchflow_core::validation::{
    max_length_if_present, require_text_if_present, NAME_MAX_LEN, SIZE_CHART_MAX_LEN,
};
use stitchflow_db::models::order::{CreateOrder, Order, OrderDetail, OrderSummary, UpdateOrder};
use stitchflow_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Query parameters for `DELETE /api/orders/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteOrderParams {
    /// Return each item's fabric to stock before deleting.
    pub restock: Option<bool>,
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let order = OrderRepo::find_detail(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", &id))?;
    Ok(Json(order))
}

/// POST /api/orders
///
/// Validates the items, the header figures and the totals derived from them,
/// then places the order under the configured stock policy. A missing client
/// is a 404; insufficient stock under the strict policy is a 409.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let lines = input.lines();
    validate_lines(&lines)?;
    let inputs = input.financial_inputs();
    inputs.validate()?;
    compatibility_snapshot(&lines).validate()?;
    OrderFinancials::derive(&inputs, &lines).validate()?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }

    let order = OrderRepo::place(&state.pool, &input, state.config.stock_policy).await?;
    tracing::info!(
        order_id = %order.id,
        client_id = order.client_id,
        items = input.items.len(),
        "Order placed"
    );

    state.activity.record(
        ActivityAction::Create,
        EntityKind::Order,
        &order.id,
        json!({
            "clientId": order.client_id,
            "items": input.items.len(),
            "total": order.selling_price,
        }),
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/{id}
///
/// Header fields only; `totalCost` and `profit` are recomputed.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<Json<Order>> {
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(quantity) = input.quantity {
        if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
            return Err(CoreError::Validation(format!(
                "quantity must be between 1 and {MAX_LINE_QUANTITY} (got {quantity})"
            ))
            .into());
        }
    }
    require_text_if_present("dressName", input.dress_name.as_deref())?;
    max_length_if_present("dressName", input.dress_name.as_deref(), NAME_MAX_LEN)?;
    max_length_if_present("sizeChart", input.size_chart.as_deref(), SIZE_CHART_MAX_LEN)?;
    if let Some(meters) = input.fabric_required {
        validate_amount("fabricRequired", meters)?;
    }
    let inputs = input.financial_inputs();
    inputs.validate()?;

    // Totals merge the new figures with the stored ones.
    let current = OrderRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", &id))?;
    OrderFinancials::from_parts(
        inputs.selling_price.unwrap_or(current.selling_price),
        inputs.stitching_cost.unwrap_or(current.stitching_cost),
        inputs.fabric_cost.unwrap_or(current.fabric_cost),
        inputs.courier_cost_from_me.unwrap_or(current.courier_cost_from_me),
        inputs.courier_cost_to_me.unwrap_or(current.courier_cost_to_me),
    )
    .validate()?;

    let order = OrderRepo::update(&state.pool, &id, &input)
        .await
        .map_err(|e| AppError::on_fk_violation(e, "Referenced client or fabric does not exist."))?
        .ok_or_else(|| CoreError::not_found("Order", &id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Order,
        &id,
        json!({ "status": order.status, "quantity": order.quantity }),
    );

    Ok(Json(order))
}

/// DELETE /api/orders/{id}
///
/// Items are removed with the header. Pass `?restock=true` to give their
/// fabric back to inventory first.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteOrderParams>,
) -> AppResult<Json<MessageResponse>> {
    let restock = params.restock.unwrap_or(false);
    if !OrderRepo::delete(&state.pool, &id, restock).await? {
        return Err(CoreError::not_found("Order", &id).into());
    }

    tracing::info!(order_id = %id, restock, "Order deleted");
    state.activity.record(
        ActivityAction::Delete,
        EntityKind::Order,
        &id,
        json!({ "restocked": restock }),
    );

    Ok(Json(MessageResponse::new("Order deleted")))
}
