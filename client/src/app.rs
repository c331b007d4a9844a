//! Application shell, shared state, and routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns every piece of shared state and hands it down through context:
//! `RwSignal<AuthState>`, `RwSignal<UiState>`, `RwSignal<ApiConfig>`,
//! `Notices`, and the single `AuthController` (as `ControllerHandle`).
//! Components never construct their own transport.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::notice::Notices;
use crate::net::backend::BrowserBackend;
use crate::net::transport::{LoadingIndicator, Transport};
use crate::pages::home::HomePage;
use crate::state::auth::{AuthController, AuthState, BrowserAuthController};
use crate::state::config::ApiConfig;
use crate::state::session::LocalStorageTokenStore;
use crate::state::ui::UiState;
use crate::util::theme;

/// The page-wide auth controller, shared through context.
pub type ControllerHandle = StoredValue<BrowserAuthController>;

/// HTML document rendered by the server around `App`.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn loading_indicator(ui: RwSignal<UiState>) -> LoadingIndicator {
    Arc::new(move |on: bool| {
        let _ = ui.try_update(|state| {
            if on {
                state.begin_request();
            } else {
                state.end_request();
            }
        });
    })
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = RwSignal::new(ApiConfig::load());
    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState { theme: theme::read_preference(), ..UiState::default() });
    let notices = Notices::new();

    let transport = Transport::new(config.get_untracked().base_url, BrowserBackend, LocalStorageTokenStore)
        .with_loading_indicator(loading_indicator(ui));
    let controller: ControllerHandle = StoredValue::new(AuthController::new(transport));

    provide_context(config);
    provide_context(auth);
    provide_context(ui);
    provide_context(notices);
    provide_context(controller);

    Effect::new(move |_| theme::apply(ui.with(|state| state.theme)));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let status = controller.get_value().check_status().await;
        let _ = auth.try_set(AuthState::settled(status));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/authgate.css"/>
        <Stylesheet href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"/>
        <Title text="Authgate"/>
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage/>
            </Routes>
        </Router>
    }
}
