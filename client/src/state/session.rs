//! Session token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is an opaque server-issued string. The browser store keeps it in
//! `localStorage` and re-reads that slot on every call; the memory store backs
//! tests and any non-browser embedding. Absence of a token means anonymous.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::util::storage;

const TOKEN_KEY: &str = "token";

/// Persistence boundary for the session token.
pub trait TokenStore {
    fn get_token(&self) -> Option<String>;

    /// `None` removes the stored token; `Some` overwrites it.
    fn set_token(&self, token: Option<&str>);

    fn clear(&self) {
        self.set_token(None);
    }
}

/// Token slot in browser `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn get_token(&self) -> Option<String> {
        storage::read_string(TOKEN_KEY)
    }

    fn set_token(&self, token: Option<&str>) {
        match token {
            Some(token) => storage::write_string(TOKEN_KEY, token),
            None => storage::remove(TOKEN_KEY),
        }
    }
}

/// In-memory token slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set_token(Some(token));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set_token(&self, token: Option<&str>) {
        *self.slot.borrow_mut() = token.map(str::to_owned);
    }
}
