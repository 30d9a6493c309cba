//! Networking modules for the NexusArt REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the configured client and transport seam, `middleware` holds the
//! auth hooks, `api` the typed endpoints, `transport` the browser sender, and
//! `types` the wire schema.

pub mod api;
pub mod http;
pub mod middleware;
pub mod transport;
pub mod types;
