//! Authentication state machine and the controller that drives it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is the single authoritative value behind every auth-dependent
//! UI region; pages derive `AuthView` from it and never toggle regions on
//! their own. `AuthController` performs the transitions against the API and
//! owns the only writes to the session token.
//!
//! TRADE-OFFS
//! ==========
//! A failed `check_status` reports `Anonymous` but leaves a stale token in
//! storage; only `logout` removes it. The server stays the authority on
//! expiry, and the next successful login overwrites the slot anyway.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::backend::{BrowserBackend, HttpBackend};
use crate::net::transport::{RequestOptions, Transport};
use crate::net::types::{Credentials, LoginResponse, SignupRequest, UserProfile};
use crate::state::session::{LocalStorageTokenStore, TokenStore};

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const ME_PATH: &str = "/user/me";
pub const PROTECTED_PATH: &str = "/protected";

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const SIGNUP_SUCCEEDED: &str = "Account created! You can now sign in.";
const PROTECTED_GRANTED: &str = "Access granted to protected resource!";
const PROTECTED_DENIED: &str = "Access denied. Please log in.";
const PROFILE_FAILED: &str = "Failed to load profile.";

/// The two recognized session states.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    /// A token is stored. `profile` is filled when `/user/me` confirmed it.
    Authenticated { profile: Option<UserProfile> },
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { profile } => profile.as_ref(),
            Self::Anonymous => None,
        }
    }
}

/// Auth status plus whether the initial session check is still running.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub checking: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { status: AuthStatus::Anonymous, checking: true }
    }
}

impl AuthState {
    pub fn settled(status: AuthStatus) -> Self {
        Self { status, checking: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server refused the request; the message is shown verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Login response did not include an access token")]
    MissingToken,
}

/// Everything the page renders from the current auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthView {
    pub status_text: String,
    pub badge_class: &'static str,
    pub show_auth_forms: bool,
    pub show_dashboard: bool,
    pub logout_visible: bool,
    pub protected_enabled: bool,
    pub profile_enabled: bool,
}

impl AuthView {
    pub fn from_state(state: &AuthState) -> Self {
        let authenticated = state.status.is_authenticated();
        let status_text = match &state.status {
            AuthStatus::Authenticated { profile } => {
                let name = profile.as_ref().map_or("User", |p| p.username.as_str());
                format!("Welcome, {name}!")
            }
            AuthStatus::Anonymous if state.checking => "Checking session...".to_owned(),
            AuthStatus::Anonymous => "Not logged in".to_owned(),
        };
        Self {
            status_text,
            badge_class: if authenticated { "status-badge success" } else { "status-badge" },
            show_auth_forms: !authenticated,
            show_dashboard: authenticated,
            logout_visible: authenticated,
            protected_enabled: authenticated,
            profile_enabled: authenticated,
        }
    }
}

/// Drives auth transitions over an injected transport and token store.
#[derive(Clone)]
pub struct AuthController<B, S> {
    transport: Transport<B, S>,
}

/// Controller wired to `fetch` and `localStorage`.
pub type BrowserAuthController = AuthController<BrowserBackend, LocalStorageTokenStore>;

impl<B: HttpBackend, S: TokenStore> AuthController<B, S> {
    pub fn new(transport: Transport<B, S>) -> Self {
        Self { transport }
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.transport.set_base_url(base_url);
    }

    pub fn has_token(&self) -> bool {
        self.transport.store().get_token().is_some_and(|token| !token.is_empty())
    }

    /// Confirm the stored token with `GET /user/me`.
    ///
    /// Without a token this resolves to `Anonymous` without a network call.
    /// Any failure resolves to `Anonymous`; nothing is retried.
    pub async fn check_status(&self) -> AuthStatus {
        if !self.has_token() {
            return AuthStatus::Anonymous;
        }
        let response = self.transport.get(ME_PATH).await;
        if !response.ok {
            log::debug!("session check failed with status {}", response.status);
            return AuthStatus::Anonymous;
        }
        // Logout may have cleared the token while the check was in flight.
        if !self.has_token() {
            return AuthStatus::Anonymous;
        }
        AuthStatus::Authenticated { profile: response.decode::<UserProfile>() }
    }

    /// Exchange credentials for a token, store it, and load the profile.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` carries the server's message (or a generic one)
    /// when the login is refused; `AuthError::MissingToken` when a success
    /// response has no usable `access_token`. Neither touches the store.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthStatus, AuthError> {
        let response = self.transport.post_json(LOGIN_PATH, credentials).await;
        if !response.ok {
            return Err(AuthError::Rejected(response.error_message(LOGIN_FAILED)));
        }
        let Some(token) = response
            .decode::<LoginResponse>()
            .and_then(|body| body.access_token)
            .filter(|token| !token.is_empty())
        else {
            log::warn!("login succeeded with status {} but returned no access token", response.status);
            return Err(AuthError::MissingToken);
        };

        self.transport.store().set_token(Some(&token));
        match self.check_status().await {
            AuthStatus::Authenticated { profile } => Ok(AuthStatus::Authenticated { profile }),
            AuthStatus::Anonymous if self.has_token() => {
                log::warn!("profile lookup failed right after login; continuing without profile");
                Ok(AuthStatus::Authenticated { profile: None })
            }
            AuthStatus::Anonymous => Ok(AuthStatus::Anonymous),
        }
    }

    /// Create an account. Does not change the auth state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message on failure.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, AuthError> {
        let response = self.transport.post_json(SIGNUP_PATH, request).await;
        if response.ok {
            Ok(response.json_field("message").unwrap_or(SIGNUP_SUCCEEDED).to_owned())
        } else {
            Err(AuthError::Rejected(response.error_message(SIGNUP_FAILED)))
        }
    }

    /// Local half of logout: clear the token immediately and hand back the
    /// previous value for the server notification.
    pub fn sign_out(&self) -> Option<String> {
        let previous = self.transport.store().get_token();
        self.transport.store().clear();
        previous
    }

    /// Best-effort `POST /logout`. The outcome is only logged.
    pub async fn notify_logout(&self, previous_token: Option<String>) {
        let mut options = RequestOptions::post_empty();
        if let Some(token) = previous_token.filter(|token| !token.is_empty()) {
            options = options.with_header("Authorization", format!("Bearer {token}"));
        }
        let response = self.transport.request(LOGOUT_PATH, options).await;
        if !response.ok {
            log::warn!("server logout not acknowledged (status {})", response.status);
        }
    }

    /// Clear local state, then notify the server. Always ends `Anonymous`.
    pub async fn logout(&self) -> AuthStatus {
        let previous = self.sign_out();
        self.notify_logout(previous).await;
        AuthStatus::Anonymous
    }

    /// Call the demo protected endpoint.
    ///
    /// # Errors
    ///
    /// Returns the server's `detail` (or a generic denial) when refused.
    pub async fn access_protected(&self) -> Result<String, String> {
        let response = self.transport.get(PROTECTED_PATH).await;
        if response.ok {
            Ok(response.json_field("message").unwrap_or(PROTECTED_GRANTED).to_owned())
        } else {
            Err(response.error_message(PROTECTED_DENIED))
        }
    }

    /// Fetch the current profile for display.
    ///
    /// # Errors
    ///
    /// Returns the server's `detail` (or a generic message) when the call
    /// fails or the body is not a profile.
    pub async fn fetch_profile(&self) -> Result<UserProfile, String> {
        let response = self.transport.get(ME_PATH).await;
        if !response.ok {
            return Err(response.error_message(PROFILE_FAILED));
        }
        response.decode::<UserProfile>().ok_or_else(|| PROFILE_FAILED.to_owned())
    }
}
