//! Handlers for the `/products` catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::error::CoreError;
use stitchflow_core::order::validate_amount;
use stitchflow_core::types::DbId;
use stitchflow_core::validation::{
    max_length, max_length_if_present, require_text, require_text_if_present, NAME_MAX_LEN,
};
use stitchflow_db::models::product::{CreateProduct, Product, UpdateProduct};
use stitchflow_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

const DEFAULT_FABRIC_MISSING: &str = "Default fabric does not exist.";

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", id))?;
    Ok(Json(product))
}

/// POST /api/products
///
/// A duplicate name is a 400 with code `DUPLICATE`.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    require_text("name", &input.name)?;
    max_length("name", &input.name, NAME_MAX_LEN)?;
    if let Some(price) = input.base_price {
        validate_amount("basePrice", price)?;
    }

    let product = ProductRepo::create(&state.pool, &input)
        .await
        .map_err(|e| AppError::on_fk_violation(e, DEFAULT_FABRIC_MISSING))?;

    state.activity.record(
        ActivityAction::Create,
        EntityKind::Product,
        product.id,
        json!({ "name": product.name }),
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    require_text_if_present("name", input.name.as_deref())?;
    max_length_if_present("name", input.name.as_deref(), NAME_MAX_LEN)?;
    if let Some(price) = input.base_price {
        validate_amount("basePrice", price)?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await
        .map_err(|e| AppError::on_fk_violation(e, DEFAULT_FABRIC_MISSING))?
        .ok_or_else(|| CoreError::not_found("Product", id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Product,
        id,
        json!({ "name": product.name }),
    );

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Product", id).into());
    }

    state
        .activity
        .record(ActivityAction::Delete, EntityKind::Product, id, json!({}));

    Ok(Json(MessageResponse::new("Product deleted")))
}
