use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Message carried by successful envelopes.
pub const MESSAGE_SUCCESS: &str = "success";

/// Message carried by error envelopes.
pub const MESSAGE_ERROR: &str = "error";

/// Response wrapper shared by every JSON endpoint.
///
/// Serializes as `{ "status": <code>, "message": "success"|"error", "data": ... }`
/// and answers with the same HTTP status it carries.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    // ---
    pub fn success(status: StatusCode, data: T) -> Self {
        // ---
        Self {
            status: status.as_u16(),
            message: MESSAGE_SUCCESS,
            data,
        }
    }

    pub fn error(status: StatusCode, data: T) -> Self {
        // ---
        Self {
            status: status.as_u16(),
            message: MESSAGE_ERROR,
            data,
        }
    }
}

impl<T> IntoResponse for Envelope<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

/// Fixed-text payload used by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub data: &'static str,
}
