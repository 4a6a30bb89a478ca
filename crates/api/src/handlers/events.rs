//! Handlers for the `/events` calendar.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::calendar::{validate_kind, validate_title};
use stitchflow_core::error::CoreError;
use stitchflow_core::types::DbId;
use stitchflow_db::models::event::{CreateEvent, Event, UpdateEvent};
use stitchflow_db::repositories::EventRepo;

use crate::error::AppResult;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/events
///
/// Ordered by event date, earliest first.
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Event", id))?;
    Ok(Json(event))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    validate_title(&input.title)?;
    if let Some(kind) = &input.kind {
        validate_kind(kind)?;
    }

    let event = EventRepo::create(&state.pool, &input).await?;

    state.activity.record(
        ActivityAction::Create,
        EntityKind::Event,
        event.id,
        json!({ "title": event.title, "type": event.kind }),
    );

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(kind) = &input.kind {
        validate_kind(kind)?;
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Event", id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::Event,
        id,
        json!({ "title": event.title }),
    );

    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Event", id).into());
    }

    state
        .activity
        .record(ActivityAction::Delete, EntityKind::Event, id, json!({}));

    Ok(Json(MessageResponse::new("Event deleted")))
}
