//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns authentication and is shared app-wide. `auth` is the
//! snapshot it publishes. `list` and `notice` are page-scoped and toast
//! state; pages wrap them in signals.

pub mod auth;
pub mod list;
pub mod notice;
pub mod session;
