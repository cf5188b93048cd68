//! Authentication middleware.
//!
//! Resolves `Authorization: Bearer <token>` against the session store and
//! attaches the caller's [`SessionInfo`] to the request. Role checks happen in
//! the handlers that need them.

use crate::app_state::AppState;
use crate::handlers::error::{bounded, CatalogError};
use crate::session::{self, SessionInfo};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, CatalogError> {
    // ---
    let header = headers
        .get("authorization")
        .ok_or(CatalogError::Unauthenticated("No Authorization header provided"))?
        .to_str()
        .map_err(|_| CatalogError::Unauthenticated("Invalid Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(CatalogError::Unauthenticated(
            "Invalid Authorization header format",
        ))
}

/// Rejects requests without a live session; otherwise stores the
/// [`SessionInfo`] in the request extensions for downstream handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, CatalogError> {
    // ---
    let token = bearer_token(request.headers())?.to_string();

    let info: SessionInfo = bounded(
        &state,
        "error occurred while validating session",
        session::validate_session(state.sessions().as_ref(), &token),
    )
    .await?
    .ok_or_else(|| {
        tracing::debug!("Rejected unknown or expired session token");
        CatalogError::Unauthenticated("Invalid or expired session")
    })?;

    request.extensions_mut().insert(info);
    Ok(next.run(request).await)
}
