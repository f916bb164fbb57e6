//! Handlers for event registrations (sign up, attendance history).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quad_core::error::CoreError;
use quad_core::types::DbId;
use quad_db::models::registration::{Registration, RegistrationWithEvent};
use quad_db::repositories::{EventRepo, RegistrationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/events/{id}/register
///
/// Idempotent: registering twice returns the existing registration with
/// 200 instead of 201. Registering for a missing event is a 404, not a
/// foreign-key error.
pub async fn register(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    let (registration, created) = RegistrationRepo::register(&state.pool, id, auth.user_id).await?;
    let status = if created {
        tracing::info!(event_id = id, user_id = auth.user_id, "Registration created");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: registration })))
}

/// GET /api/v1/events/history
pub async fn history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RegistrationWithEvent>>>> {
    let entries = RegistrationRepo::list_history_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
