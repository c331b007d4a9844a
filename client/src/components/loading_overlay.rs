//! Full-page spinner shown while any API request is in flight.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let class = move || {
        if ui.get().loading() { "loading-overlay" } else { "loading-overlay hidden" }
    };

    view! {
        <div id="loadingOverlay" class=class aria-hidden=move || (!ui.get().loading()).to_string()>
            <div class="spinner"></div>
        </div>
    }
}
