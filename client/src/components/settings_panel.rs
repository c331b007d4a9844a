//! API endpoint settings.
//!
//! Saving or resetting points the controller at the new base URL and
//! re-checks the session against it, since a token from one server means
//! nothing to another.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::components::notice::{NoticeView, Notices, post_notice};
use crate::state::auth::AuthState;
use crate::state::config::ApiConfig;
use crate::state::ui::Notice;

fn apply_config(config: &ApiConfig, controller: ControllerHandle, auth: RwSignal<AuthState>) {
    controller.update_value(|c| c.set_base_url(&config.base_url));
    auth.update(|state| state.checking = true);
    leptos::task::spawn_local(async move {
        let status = controller.get_value().check_status().await;
        let _ = auth.try_set(AuthState::settled(status));
    });
}

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let config = expect_context::<RwSignal<ApiConfig>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<Notices>();
    let controller = expect_context::<ControllerHandle>();

    let draft = RwSignal::new(config.get_untracked().base_url);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match ApiConfig::save_override(&draft.get_untracked()) {
            Ok(saved) => {
                draft.set(saved.base_url.clone());
                apply_config(&saved, controller, auth);
                post_notice(notices.settings, Notice::success(format!("API endpoint set to {}", saved.base_url)));
                config.set(saved);
            }
            Err(e) => post_notice(notices.settings, Notice::error(e.to_string())),
        }
    };

    let on_reset = move |_| {
        let defaults = ApiConfig::reset();
        draft.set(defaults.base_url.clone());
        apply_config(&defaults, controller, auth);
        post_notice(notices.settings, Notice::info(format!("API endpoint reset to {}", defaults.base_url)));
        config.set(defaults);
    };

    view! {
        <details class="settings-panel">
            <summary>"API settings"</summary>
            <form class="settings-form" on:submit=on_save>
                <label for="apiBaseUrl">"API base URL"</label>
                <input
                    id="apiBaseUrl"
                    type="url"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <div class="settings-actions">
                    <button class="btn btn-primary" type="submit">
                        "Save"
                    </button>
                    <button
                        class="btn btn-secondary"
                        type="button"
                        disabled=move || !config.get().overridden
                        on:click=on_reset
                    >
                        "Reset"
                    </button>
                </div>
            </form>
            <p class="settings-active">
                "Active: "
                <code>{move || config.get().base_url}</code>
            </p>
            <NoticeView slot=notices.settings id="settingsMessage"/>
        </details>
    }
}
