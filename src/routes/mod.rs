pub mod book;
pub mod slots;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use creneau_core::BookingError;

/// Standard API error body. `fallback: true` tells the front-end to degrade
/// to the manual contact channel.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

/// Convert booking errors to HTTP responses.
pub struct ApiError(pub BookingError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let (status, error, details, fallback) = if err.is_client_error() {
            (StatusCode::BAD_REQUEST, err.to_string(), None, None)
        } else {
            match err {
                BookingError::SlotTaken(_) => (StatusCode::CONFLICT, err.to_string(), None, None),
                BookingError::InvalidConfiguration(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string(), None, None)
                }
                other => {
                    tracing::error!("upstream failure: {other}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Erreur lors du traitement de la demande".to_string(),
                        Some(other.to_string()),
                        Some(true),
                    )
                }
            }
        };

        let body = Json(ErrorResponse {
            error,
            details,
            fallback,
        });
        (status, body).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}
