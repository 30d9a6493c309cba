//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds Leptos SSR rendering, the static `/pkg` bundle, and a health probe
//! under one Axum router. There are no API routes here: the dashboard talks
//! to the NexusArt backend directly from the browser.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use nexusart_dashboard::app::{App, shell};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Leptos SSR frontend plus static assets.
///
/// Returns the router and the configured `site-addr`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app() -> Result<(Router, SocketAddr), String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let site_addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root = PathBuf::from(leptos_options.site_root.as_ref());
    let pkg_dir = site_root.join(leptos_options.site_pkg_dir.as_ref());

    let router = Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());
    Ok((router, site_addr))
}

/// `PORT` overrides the port of `site_addr` and listens on all interfaces.
///
/// # Errors
///
/// Returns an error if `PORT` is set but not a valid port number.
pub fn listen_addr(site_addr: SocketAddr) -> Result<SocketAddr, String> {
    match std::env::var("PORT") {
        Ok(port) => {
            let port: u16 = port.trim().parse().map_err(|e| format!("invalid PORT {port:?}: {e}"))?;
            Ok(SocketAddr::from(([0, 0, 0, 0], port)))
        }
        Err(_) => Ok(site_addr),
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
