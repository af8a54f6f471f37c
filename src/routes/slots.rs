//! Availability endpoint.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use creneau_core::{BookingError, TimeSlot, parse_day};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/slots", post(list_slots))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotsRequest {
    pub date: Option<String>,
    /// Accepted for wire compatibility; the grid timezone is configured
    /// server-side and echoed back in the response.
    pub time_zone: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub available_slots: Vec<TimeSlot>,
    pub date: String,
    pub time_zone: String,
}

/// POST /slots - the day's grid with taken slots marked.
async fn list_slots(
    State(state): State<AppState>,
    Json(request): Json<SlotsRequest>,
) -> Result<Json<SlotsResponse>, ApiError> {
    let Some(date_str) = request.date.as_deref().filter(|s| !s.is_empty()) else {
        return Err(ApiError(BookingError::MissingFields("date".to_string())));
    };

    let date = parse_day(date_str)?;
    let slots = state.reconciler.day_availability(date).await?;

    Ok(Json(SlotsResponse {
        available_slots: slots,
        date: date_str.to_string(),
        time_zone: state.reconciler.config().timezone.name().to_string(),
    }))
}
