//! Client state modules.
//!
//! ARCHITECTURE
//! ============
//! `auth` holds the session state machine and its controller, `session` the
//! token persistence boundary, `config` the API endpoint settings, and `ui`
//! presentation-only chrome state.

pub mod auth;
pub mod config;
pub mod session;
pub mod ui;
