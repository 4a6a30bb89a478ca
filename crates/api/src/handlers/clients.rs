//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::error::CoreError;
use stitchflow_core::types::DbId;
use stitchflow_core::validation::{
    max_length_if_present, require_text, require_text_if_present, NAME_MAX_LEN,
    SHORT_TEXT_MAX_LEN,
};
use stitchflow_db::models::client::{Client, ClientDetail, CreateClient, UpdateClient};
use stitchflow_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

fn validate_lengths(
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    status: Option<&str>,
) -> Result<(), CoreError> {
    max_length_if_present("name", name, NAME_MAX_LEN)?;
    max_length_if_present("email", email, NAME_MAX_LEN)?;
    max_length_if_present("phone", phone, SHORT_TEXT_MAX_LEN)?;
    max_length_if_present("status", status, SHORT_TEXT_MAX_LEN)
}

/// GET /api/clients
///
/// Most recent customers first; clients without orders last.
pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/clients/{id}
///
/// Client record plus its order history.
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientDetail>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", id))?;
    let recent_orders = ClientRepo::orders_for(&state.pool, id).await?;
    Ok(Json(ClientDetail {
        client,
        recent_orders,
    }))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    require_text("name", &input.name)?;
    validate_lengths(
        Some(&input.name),
        input.email.as_deref(),
        input.phone.as_deref(),
        input.status.as_deref(),
    )?;

    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = client.id, "Client created");

    state.activity.record(
        ActivityAction::Create,
        EntityKind::Client,
        client.id,
        json!({ "name": client.name }),
    );

    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    require_text_if_present("name", input.name.as_deref())?;
    validate_lengths(
        input.name.as_deref(),
        input.email.as_deref(),
        input.phone.as_deref(),
        input.status.as_deref(),
    )?;

    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Client,
        id,
        json!({ "name": client.name, "status": client.status }),
    );

    Ok(Json(client))
}

/// DELETE /api/clients/{id}
///
/// Rejected with 400 while the client still has orders.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ClientRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::on_fk_violation(e, "Cannot delete client with active orders."))?;
    if !deleted {
        return Err(CoreError::not_found("Client", id).into());
    }

    tracing::info!(client_id = id, "Client deleted");
    state
        .activity
        .record(ActivityAction::Delete, EntityKind::Client, id, json!({}));

    Ok(Json(MessageResponse::new("Client deleted")))
}
