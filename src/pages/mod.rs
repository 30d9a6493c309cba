//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it fetches through the shared
//! `ApiClient`, keeps its own form or list state, and reports outcomes
//! through the notice host. Validation and filtering live in plain functions
//! next to the page so they are tested without a DOM.

pub mod dashboard;
pub mod gallery;
pub mod login;
pub mod not_found;
pub mod onboarding;
pub mod plans;
pub mod settings;
pub mod signup;
pub mod templates;
pub mod whatsapp;
