//! Handlers for the `/events` resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use quad_core::change::EventPatch;
use quad_core::error::CoreError;
use quad_core::types::DbId;
use quad_db::models::event::{CreateEvent, Event, EventSearchFilters};
use quad_db::repositories::{EventRepo, RegistrationRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{bearer_token, AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Event detail plus the caller's registration status.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub is_registered: bool,
}

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/search
pub async fn search(
    State(state): State<AppState>,
    Query(filters): Query<EventSearchFilters>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::search(&state.pool, &filters).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
///
/// Public detail view. When the caller presents a valid bearer token the
/// response also reports whether they are registered; anonymous callers
/// get `is_registered = false` without a registration lookup.
pub async fn get_by_id(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EventDetail>>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    let is_registered = match caller {
        Some(user_id) => RegistrationRepo::is_registered(&state.pool, id, user_id).await?,
        None => false,
    };

    Ok(Json(DataResponse {
        data: EventDetail {
            event,
            is_registered,
        },
    }))
}

/// POST /api/v1/events
///
/// The owner is the verified caller; every field except `speaker` is
/// required and must be non-blank.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    validate_create(&input)?;
    let event = EventRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(event_id = event.id, owner = auth.user_id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/events/{id}
///
/// The bearer credential is handed to the orchestrator untouched:
/// verification, the ownership-scoped lookup, the partial write, change
/// detection, and subscriber notification all happen inside
/// [`UpdateOrchestrator::update_event`](crate::updates::UpdateOrchestrator::update_event).
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(patch): Json<EventPatch>,
) -> AppResult<Json<DataResponse<Event>>> {
    let bearer = bearer_token(&headers);
    let event = state.updates.update_event(bearer, id, patch).await?;
    Ok(Json(DataResponse { data: event }))
}

/// GET /api/v1/events/mine
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/mine/{id}
///
/// Ownership-scoped detail: an event that exists but belongs to someone
/// else is indistinguishable from a missing one.
pub async fn get_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::find_by_id_and_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    Ok(Json(DataResponse { data: event }))
}

/// Required-field validation for event creation.
fn validate_create(input: &CreateEvent) -> Result<(), AppError> {
    let fields = [
        ("title", &input.title),
        ("description", &input.description),
        ("location", &input.location),
        ("category", &input.category),
        ("poster_url", &input.poster_url),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{name} must not be empty"
        ))));
    }
    Ok(())
}
