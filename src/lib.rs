//! HTTP booking service for the SD Service site.
//!
//! Exposes the two wire endpoints (`POST /slots`, `POST /book`) and wires
//! the core reconciler to the real collaborators: Google Calendar, the
//! Brevo mailer, and the conversions webhook.

pub mod analytics;
pub mod notify;
pub mod routes;
pub mod settings;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the application router. CORS is fully permissive: the site is
/// served from a different origin and the endpoints carry no session state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::slots::router())
        .merge(routes::book::router())
        .with_state(state)
        .layer(cors)
}
