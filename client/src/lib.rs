//! Browser client for a username/password authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders login and signup forms, keeps the bearer token in `localStorage`,
//! and gates a protected-resource demo and a profile view behind it. The
//! server that issues tokens is external; this crate only calls its REST
//! endpoints.
//!
//! LAYOUT
//! ======
//! - `net`: request plumbing (`Transport`, `HttpBackend`) and wire DTOs.
//! - `state`: token storage, the auth state machine, config, UI state.
//! - `pages` / `components`: Leptos views bound to that state.
//! - `util`: theme persistence, named delays, storage helpers.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
