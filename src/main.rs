use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use creneau_server::settings::Settings;
use creneau_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    let state = AppState::from_settings(&settings)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("creneau-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, creneau_server::app(state)).await?;

    Ok(())
}
