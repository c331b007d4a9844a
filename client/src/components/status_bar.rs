//! Header bar: auth status badge, theme toggle, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Logout is split in two. The token is cleared and the page flips to
//! anonymous synchronously; the server notification runs afterwards and its
//! outcome is only logged.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::components::notice::{Notices, post_notice};
use crate::state::auth::{AuthState, AuthStatus, AuthView};
use crate::state::ui::{Notice, UiState};
use crate::util::theme;

const LOGGED_OUT: &str = "You have been logged out successfully.";

#[component]
pub fn StatusBar(view_model: Memo<AuthView>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let notices = expect_context::<Notices>();
    let controller = expect_context::<ControllerHandle>();

    let on_toggle_theme = move |_| {
        ui.update(|u| u.theme = theme::toggle(u.theme));
    };

    let on_logout = move |_| {
        let controller = controller.get_value();
        let previous = controller.sign_out();
        auth.set(AuthState::settled(AuthStatus::Anonymous));
        post_notice(notices.login, Notice::success(LOGGED_OUT));
        leptos::task::spawn_local(async move {
            controller.notify_logout(previous).await;
        });
    };

    view! {
        <header class="header">
            <h1 class="header__title">"Authgate"</h1>
            <div class="header__actions">
                <span id="authStatus" class=move || view_model.get().badge_class>
                    {move || view_model.get().status_text}
                </span>
                <button
                    id="themeToggle"
                    class="btn btn-icon"
                    title="Toggle dark mode"
                    on:click=on_toggle_theme
                >
                    <i class=move || ui.get().theme.icon_class()></i>
                </button>
                <button
                    id="logoutBtn"
                    class="btn btn-secondary"
                    hidden=move || !view_model.get().logout_visible
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>
        </header>
    }
}
