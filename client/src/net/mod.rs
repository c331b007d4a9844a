//! Networking modules for the authentication REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` resolves, decorates, and normalizes every call, `backend` is
//! the dispatch seam (`gloo-net` in the browser), and `types` defines the
//! request/response bodies.

pub mod backend;
#[cfg(test)]
pub(crate) mod fake;
pub mod transport;
pub mod types;
