//! Signed-in panel with the protected-resource and profile demos.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::components::notice::{NoticeView, Notices, post_notice};
use crate::state::auth::AuthView;
use crate::state::ui::Notice;

#[component]
pub fn Dashboard(view_model: Memo<AuthView>) -> impl IntoView {
    let notices = expect_context::<Notices>();
    let controller = expect_context::<ControllerHandle>();
    let protected_busy = RwSignal::new(false);
    let profile_busy = RwSignal::new(false);

    let on_protected = move |_| {
        if protected_busy.get_untracked() || !view_model.get_untracked().protected_enabled {
            return;
        }
        protected_busy.set(true);
        notices.protected.update(|slot| slot.clear());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let notice = match controller.get_value().access_protected().await {
                Ok(message) => Notice::success(message),
                Err(detail) => Notice::error(detail),
            };
            post_notice(notices.protected, notice);
            let _ = protected_busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = controller;
    };

    let on_profile = move |_| {
        if profile_busy.get_untracked() || !view_model.get_untracked().profile_enabled {
            return;
        }
        profile_busy.set(true);
        notices.profile.update(|slot| slot.clear());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let notice = match controller.get_value().fetch_profile().await {
                Ok(profile) => Notice::success(format!("Profile: {}", profile.summary())),
                Err(detail) => Notice::error(detail),
            };
            post_notice(notices.profile, notice);
            let _ = profile_busy.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = controller;
    };

    view! {
        <section id="dashboard" class="dashboard fade-in" hidden=move || !view_model.get().show_dashboard>
            <h2>{move || view_model.get().status_text}</h2>
            <div class="dashboard-actions">
                <div class="dashboard-action">
                    <button
                        id="protectedBtn"
                        class="btn btn-secondary"
                        on:click=on_protected
                        disabled=move || !view_model.get().protected_enabled || protected_busy.get()
                    >
                        "Access Protected Resource"
                    </button>
                    <NoticeView slot=notices.protected id="protectedMessage"/>
                </div>
                <div class="dashboard-action">
                    <button
                        id="profileBtn"
                        class="btn btn-secondary"
                        on:click=on_profile
                        disabled=move || !view_model.get().profile_enabled || profile_busy.get()
                    >
                        "View Profile"
                    </button>
                    <NoticeView slot=notices.profile id="profileMessage"/>
                </div>
            </div>
        </section>
    }
}
