//! The single page: header, auth cards or dashboard, and settings.
//!
//! Every auth-dependent region renders from one `AuthView` memo so the page
//! can never show a mix of signed-in and signed-out affordances.

use leptos::prelude::*;

use crate::components::loading_overlay::LoadingOverlay;
use crate::components::settings_panel::SettingsPanel;
use crate::components::status_bar::StatusBar;
use crate::pages::dashboard::Dashboard;
use crate::pages::login::{LoginCard, SignupCard};
use crate::state::auth::{AuthState, AuthView};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let view_model = Memo::new(move |_| AuthView::from_state(&auth.get()));

    view! {
        <div class="app">
            <StatusBar view_model=view_model/>
            <LoadingOverlay/>
            <main class="container">
                <section id="authSection" class="auth-section" hidden=move || !view_model.get().show_auth_forms>
                    <LoginCard/>
                    <SignupCard/>
                </section>
                <Dashboard view_model=view_model/>
            </main>
            <SettingsPanel/>
        </div>
    }
}
