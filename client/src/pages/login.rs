//! Login and signup cards with client-side form validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both forms validate locally first. A validation failure is reported with
//! a blocking browser alert and no request is sent. Server outcomes land in
//! the notice region under the form that triggered them.
//!
//! DESIGN
//! ======
//! Validation is pure (`validate_login`, `validate_signup`) and returns the
//! wire payload, so the components only move signals around.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use regex::Regex;

use crate::app::ControllerHandle;
use crate::components::notice::{NoticeView, Notices, post_notice};
use crate::net::types::{Credentials, SignupRequest};
use crate::state::auth::{AuthError, AuthState, AuthStatus};
use crate::state::ui::{Notice, UiState};
use crate::util::transitions::{self, Card};

/// Shortest password accepted at signup, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

const LOGIN_SUCCEEDED: &str = "Login successful!";

/// A form field that failed local validation. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
}

pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_ok_and(|re| re.is_match(email))
}

fn required(label: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() { Err(ValidationError::Required(label)) } else { Ok(()) }
}

/// Check the login form. Only presence is enforced here.
///
/// # Errors
///
/// Returns the first failing field in form order.
pub fn validate_login(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    required("Username", username)?;
    required("Password", password)?;
    Ok(Credentials { username: username.trim().to_owned(), password: password.to_owned() })
}

/// Check the signup form: presence, email shape, password length.
///
/// # Errors
///
/// Returns the first failing field in form order.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<SignupRequest, ValidationError> {
    required("Username", username)?;
    required("Email", email)?;
    required("Password", password)?;
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(SignupRequest { username: username.trim().to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Notice for a finished login. A login that ends anonymous (the token was
/// cleared while the profile check was in flight) reports nothing.
pub fn login_notice(outcome: &Result<AuthStatus, AuthError>) -> Option<Notice> {
    match outcome {
        Ok(status) if status.is_authenticated() => Some(Notice::success(LOGIN_SUCCEEDED)),
        Ok(_) => None,
        Err(e) => Some(Notice::error(e.to_string())),
    }
}

fn blocking_alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    log::info!("validation: {message}");
}

/// Start a cross-fade to `to` and drive it to completion on timers.
///
/// A newer switch bumps `card_seq`, which stops the older driver at its
/// next step.
pub fn switch_card(ui: RwSignal<UiState>, to: Card) {
    let mut started = None;
    ui.update(|state| {
        if let Some(next) = state.card.begin(to) {
            state.card = next;
            state.card_seq += 1;
            started = Some(state.card_seq);
        }
    });
    let Some(seq) = started else {
        return;
    };

    leptos::task::spawn_local(async move {
        loop {
            let Some(delay) = ui.try_with_untracked(|state| state.card.delay()).flatten() else {
                break;
            };
            transitions::sleep(delay).await;
            let stepped = ui
                .try_update(|state| {
                    if state.card_seq != seq {
                        return false;
                    }
                    state.card = state.card.advance();
                    true
                })
                .unwrap_or(false);
            if !stepped {
                break;
            }
        }
    });
}

#[component]
pub fn LoginCard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let notices = expect_context::<Notices>();
    let controller = expect_context::<ControllerHandle>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(e) => {
                blocking_alert(&e.to_string());
                return;
            }
        };
        notices.login.update(|slot| slot.clear());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = controller.get_value();
            let outcome = controller.login(&credentials).await;
            if let Some(notice) = login_notice(&outcome) {
                post_notice(notices.login, notice);
            }
            if let Ok(status) = outcome {
                if status.is_authenticated() {
                    password.set(String::new());
                }
                auth.set(AuthState::settled(status));
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (credentials, controller, auth);
    };

    view! {
        <div id="loginCard" class=move || ui.get().card.class_for(Card::Login)>
            <h2>"Sign In"</h2>
            <form id="loginForm" class="auth-form" novalidate=true on:submit=on_submit>
                <label for="loginUsername">"Username"</label>
                <input
                    id="loginUsername"
                    name="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <label for="loginPassword">"Password"</label>
                <input
                    id="loginPassword"
                    name="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <NoticeView slot=notices.login id="loginMessage"/>
            <p class="card-switch">
                "No account? "
                <a
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        switch_card(ui, Card::Signup);
                    }
                >
                    "Create one"
                </a>
            </p>
        </div>
    }
}

#[component]
pub fn SignupCard() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let notices = expect_context::<Notices>();
    let controller = expect_context::<ControllerHandle>();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_signup(&username.get_untracked(), &email.get_untracked(), &password.get_untracked())
        {
            Ok(request) => request,
            Err(e) => {
                blocking_alert(&e.to_string());
                return;
            }
        };
        notices.signup.update(|slot| slot.clear());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = controller.get_value();
            match controller.signup(&request).await {
                Ok(message) => {
                    username.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    post_notice(notices.signup, Notice::success(message));
                    busy.set(false);
                    transitions::sleep(transitions::SIGNUP_TO_LOGIN).await;
                    if ui.try_with_untracked(|state| state.card.target() == Card::Signup).unwrap_or(false) {
                        switch_card(ui, Card::Login);
                    }
                }
                Err(e) => {
                    post_notice(notices.signup, Notice::error(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, controller);
    };

    view! {
        <div id="signupCard" class=move || ui.get().card.class_for(Card::Signup)>
            <h2>"Create Account"</h2>
            <form id="signupForm" class="auth-form" novalidate=true on:submit=on_submit>
                <label for="signupUsername">"Username"</label>
                <input
                    id="signupUsername"
                    name="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <label for="signupEmail">"Email"</label>
                <input
                    id="signupEmail"
                    name="email"
                    type="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label for="signupPassword">"Password"</label>
                <input
                    id="signupPassword"
                    name="password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                </button>
            </form>
            <NoticeView slot=notices.signup id="signupMessage"/>
            <p class="card-switch">
                "Already registered? "
                <a
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        switch_card(ui, Card::Login);
                    }
                >
                    "Sign in"
                </a>
            </p>
        </div>
    }
}

