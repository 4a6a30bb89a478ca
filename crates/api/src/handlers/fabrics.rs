//! Handlers for the `/fabrics` resource and its stock endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::error::CoreError;
use stitchflow_core::inventory::validate_stock_level;
use stitchflow_core::order::validate_amount;
use stitchflow_core::types::{Amount, DbId};
use stitchflow_core::validation::{
    max_length_if_present, require_text, require_text_if_present, COLOR_MAX_LEN, NAME_MAX_LEN,
    SHORT_TEXT_MAX_LEN,
};
use stitchflow_db::models::fabric::{CreateFabric, Fabric, SetStock, UpdateFabric};
use stitchflow_db::repositories::FabricRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

fn validate_figures(
    meters_per_outfit: Option<Amount>,
    price_per_meter: Option<Amount>,
) -> Result<(), CoreError> {
    if let Some(value) = meters_per_outfit {
        validate_amount("metersPerOutfit", value)?;
    }
    if let Some(value) = price_per_meter {
        validate_amount("pricePerMeter", value)?;
    }
    Ok(())
}

fn validate_lengths(
    name: Option<&str>,
    color: Option<&str>,
    status: Option<&str>,
) -> Result<(), CoreError> {
    max_length_if_present("name", name, NAME_MAX_LEN)?;
    max_length_if_present("color", color, COLOR_MAX_LEN)?;
    max_length_if_present("status", status, SHORT_TEXT_MAX_LEN)
}

/// GET /api/fabrics
///
/// Scarcest fabrics first.
pub async fn list_fabrics(State(state): State<AppState>) -> AppResult<Json<Vec<Fabric>>> {
    let fabrics = FabricRepo::list(&state.pool).await?;
    Ok(Json(fabrics))
}

/// GET /api/fabrics/{id}
pub async fn get_fabric(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fabric>> {
    let fabric = FabricRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Fabric", id))?;
    Ok(Json(fabric))
}

/// POST /api/fabrics
pub async fn create_fabric(
    State(state): State<AppState>,
    Json(input): Json<CreateFabric>,
) -> AppResult<(StatusCode, Json<Fabric>)> {
    require_text("name", &input.name)?;
    validate_lengths(
        Some(&input.name),
        input.color.as_deref(),
        input.status.as_deref(),
    )?;
    if let Some(meters) = input.meters_available {
        validate_stock_level(meters)?;
    }
    validate_figures(input.meters_per_outfit, input.price_per_meter)?;

    let fabric = FabricRepo::create(&state.pool, &input).await?;
    tracing::info!(fabric_id = fabric.id, "Fabric created");

    state.activity.record(
        ActivityAction::Create,
        EntityKind::Fabric,
        fabric.id,
        json!({ "name": fabric.name, "color": fabric.color }),
    );

    Ok((StatusCode::CREATED, Json(fabric)))
}

/// PUT /api/fabrics/{id}
pub async fn update_fabric(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFabric>,
) -> AppResult<Json<Fabric>> {
    require_text_if_present("name", input.name.as_deref())?;
    validate_lengths(
        input.name.as_deref(),
        input.color.as_deref(),
        input.status.as_deref(),
    )?;
    if let Some(meters) = input.meters_available {
        validate_stock_level(meters)?;
    }
    validate_figures(input.meters_per_outfit, input.price_per_meter)?;

    let fabric = FabricRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Fabric", id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Fabric,
        id,
        json!({
            "name": fabric.name,
            "color": fabric.color,
            "metersAvailable": fabric.meters_available,
        }),
    );

    Ok(Json(fabric))
}

/// PATCH /api/fabrics/{id}/stock
///
/// Manual stock correction to an absolute level.
pub async fn set_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStock>,
) -> AppResult<Json<Fabric>> {
    validate_stock_level(input.meters_available)?;

    let fabric = FabricRepo::set_stock(&state.pool, id, input.meters_available)
        .await?
        .ok_or_else(|| CoreError::not_found("Fabric", id))?;
    tracing::info!(fabric_id = id, meters = %fabric.meters_available, "Fabric stock set");

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Fabric,
        id,
        json!({ "metersAvailable": fabric.meters_available }),
    );

    Ok(Json(fabric))
}

/// DELETE /api/fabrics/{id}
///
/// Rejected with 400 while any order references the fabric.
pub async fn delete_fabric(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = FabricRepo::delete(&state.pool, id).await.map_err(|e| {
        AppError::on_fk_violation(e, "Cannot delete fabric because it is used in existing orders.")
    })?;
    if !deleted {
        return Err(CoreError::not_found("Fabric", id).into());
    }

    tracing::info!(fabric_id = id, "Fabric deleted");
    state
        .activity
        .record(ActivityAction::Delete, EntityKind::Fabric, id, json!({}));

    Ok(Json(MessageResponse::new("Fabric deleted")))
}
