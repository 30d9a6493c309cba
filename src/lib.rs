//! # nexusart-dashboard
//!
//! Leptos + WASM console for NexusArt, where small-business owners review the
//! promotional art generated from their WhatsApp messages.
//!
//! The crate holds pages, components, the session store, and the REST client
//! with its middleware chain. Everything below `net`, `state`, and `util` is
//! platform neutral; browser glue is gated behind the `hydrate` feature and
//! the Axum shell behind `ssr`.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
