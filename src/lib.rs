//! anomaly-dashboard -- render-ready layouts for click time-series with
//! anomaly overlays.
//!
//! This crate maps a click series, pre-computed anomaly records, and optional
//! summary overrides into a single descriptor (series, baseline, overlay
//! markers, summary cards, axis labels, tooltips) for a charting front end.

pub mod analysis;
pub mod anomaly;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod input;
pub mod series;
pub mod wire;

use anyhow::Result;

pub use dashboard::{Composer, DashboardInput, RenderDescriptor};

/// Compose a descriptor with the built-in defaults.
pub fn compose(input: &DashboardInput) -> RenderDescriptor {
    Composer::default().compose(input)
}

/// Start the HTTP API serving render requests.
pub async fn serve(bind: &str, composer: Composer) -> Result<()> {
    let addr: std::net::SocketAddr = bind.parse()?;
    let app = api::router(api::state::AppState::new(composer));

    tracing::info!(%addr, "anomaly-dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
