//! SSR server for the NexusArt dashboard.
//!
//! Renders the Leptos shell, serves the compiled WASM bundle under `/pkg`,
//! and answers `/healthz`. All business data comes from the external
//! NexusArt API, called from the browser.

mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (app, site_addr) = routes::leptos_app()?;
    let addr = routes::listen_addr(site_addr)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "nexusart dashboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
