//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the guarded route wrappers, the signed-in chrome, the
//! auth-screen frame, and the toast host. They read shared state from the
//! Leptos context providers installed by `app::App`.

pub mod auth_layout;
pub mod main_layout;
pub mod notice_host;
pub mod route_guard;
