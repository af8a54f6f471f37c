//! Booking endpoint.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;

use creneau_core::BookingRequest;

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/book", post(book))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub success: bool,
    pub appointment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
    pub message: String,
}

/// POST /book - validate the request, re-check the slot, create the event.
/// Confirmation emails and conversion tracking happen after the response is
/// determined and cannot fail it.
async fn book(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let created = state.reconciler.book(&request).await?;

    Ok(Json(BookResponse {
        success: true,
        appointment_id: created.id,
        event_link: created.link,
        message: "Rendez-vous confirmé ! Vous recevrez un email de confirmation.".to_string(),
    }))
}
