//! Request-scoped failures and their HTTP mapping.
//!
//! Every handler returns `Result<_, CatalogError>`. Errors are converted into an
//! error [`Envelope`] at the point they surface; nothing here ever terminates
//! the process.

use crate::app_state::AppState;
use crate::handlers::shared_types::Envelope;
use crate::session::RoleDenied;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::BTreeMap;
use std::future::Future;
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No usable bearer token on the request.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Caller is authenticated but lacks the required role.
    #[error(transparent)]
    AuthorizationDenied(#[from] RoleDenied),

    /// Body was not valid JSON for the expected shape.
    #[error("{0}")]
    Decode(String),

    /// Body decoded but failed field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A document with the same unique value already exists.
    #[error("this {resource} name already exists")]
    Duplicate { resource: &'static str, count: u64 },

    #[error("{0}")]
    NotFound(&'static str),

    /// Required search parameter missing or empty.
    #[error("Invalid Search Index")]
    InvalidSearch,

    /// Storage failed or timed out. Carries a caller-safe description.
    #[error("{0}")]
    Database(&'static str),
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        // ---
        CatalogError::Decode(rejection.body_text())
    }
}

impl CatalogError {
    // ---
    pub fn status(&self) -> StatusCode {
        // ---
        match self {
            CatalogError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            CatalogError::AuthorizationDenied(_)
            | CatalogError::Decode(_)
            | CatalogError::Validation(_)
            | CatalogError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) | CatalogError::InvalidSearch => StatusCode::NOT_FOUND,
            CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Field name to violated constraint codes, e.g. `{"name": ["length"]}`.
fn field_codes(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    // ---
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs.iter().map(|e| e.code.to_string()).collect();
            (field.to_string(), codes)
        })
        .collect()
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        let data = match &self {
            CatalogError::Validation(errors) => json!({
                "error": self.to_string(),
                "fields": field_codes(errors),
            }),
            CatalogError::Duplicate { count, .. } => json!({
                "error": self.to_string(),
                "count": count,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        Envelope::error(status, data).into_response()
    }
}

/// Runs one storage call under the per-request timeout.
///
/// Failures and timeouts are logged with their detail and surface to the
/// caller only as `context`.
pub(crate) async fn bounded<T, F>(
    state: &AppState,
    context: &'static str,
    operation: F,
) -> Result<T, CatalogError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    // ---
    match tokio::time::timeout(state.db_timeout(), operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::error!("{}: {:#}", context, err);
            Err(CatalogError::Database(context))
        }
        Err(_) => {
            tracing::error!(timeout = ?state.db_timeout(), "{}: timed out", context);
            Err(CatalogError::Database(context))
        }
    }
}
