//! Message regions beneath forms and dashboard buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every region is a `NoticeSlot` signal. `post_notice` is the only writer
//! that schedules auto-clear, so success messages disappear after the named
//! delay while errors stay until the next action in that region.

use leptos::prelude::*;

use crate::state::ui::{Notice, NoticeSlot};
use crate::util::transitions::sleep;

/// All notice regions on the page, provided through context.
#[derive(Clone, Copy)]
pub struct Notices {
    pub login: RwSignal<NoticeSlot>,
    pub signup: RwSignal<NoticeSlot>,
    pub protected: RwSignal<NoticeSlot>,
    pub profile: RwSignal<NoticeSlot>,
    pub settings: RwSignal<NoticeSlot>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            login: RwSignal::new(NoticeSlot::default()),
            signup: RwSignal::new(NoticeSlot::default()),
            protected: RwSignal::new(NoticeSlot::default()),
            profile: RwSignal::new(NoticeSlot::default()),
            settings: RwSignal::new(NoticeSlot::default()),
        }
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

/// Show `notice` in `slot`, scheduling its removal if it auto-clears.
pub fn post_notice(slot: RwSignal<NoticeSlot>, notice: Notice) {
    let delay = notice.auto_clear_after();
    let mut seq = 0;
    slot.update(|s| seq = s.show(notice));
    if let Some(delay) = delay {
        leptos::task::spawn_local(async move {
            sleep(delay).await;
            let _ = slot.try_update(|s| s.clear_if_current(seq));
        });
    }
}

/// Renders one notice region.
#[component]
pub fn NoticeView(slot: RwSignal<NoticeSlot>, #[prop(into)] id: String) -> impl IntoView {
    view! {
        <p id=id class=move || slot.get().class() role="status">
            {move || slot.get().text()}
        </p>
    }
}
