//! Bearer-token authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use quad_core::error::CoreError;
use quad_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header, if any.
///
/// Returns `None` for a missing header, a non-UTF-8 value, or a scheme
/// other than `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authenticated caller extracted from a JWT bearer token.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Missing or malformed Authorization header. Expected: Bearer <token>".into(),
            ))
        })?;

        let user_id = state.verifier.verify(token)?;

        Ok(AuthUser { user_id })
    }
}

/// Caller identity when a valid bearer token is present, `None` otherwise.
///
/// Never rejects. Endpoints that render differently for signed-in callers
/// (e.g. the event detail's registration flag) use this so anonymous
/// requests still succeed; an invalid token counts as no token.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<DbId>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id =
            bearer_token(&parts.headers).and_then(|token| state.verifier.verify(token).ok());
        Ok(MaybeAuthUser(user_id))
    }
}
