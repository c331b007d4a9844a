//! Local UI chrome state: theme, loading overlay, auth card, and notices.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of `AuthState` so the auth
//! state machine stays the only source for auth-dependent regions.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::time::Duration;

use crate::util::theme::Theme;
use crate::util::transitions::{CardSwitch, SUCCESS_NOTICE};

/// UI state shared through context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub theme: Theme,
    /// In-flight API requests; the overlay shows while this is non-zero.
    pub pending_requests: u32,
    pub card: CardSwitch,
    /// Bumped on every card switch so stale timers can tell they lost.
    pub card_seq: u64,
}

impl UiState {
    pub fn loading(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn begin_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_add(1);
    }

    pub fn end_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A message shown beneath a form or button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "message info fade-in",
            NoticeKind::Success => "message success fade-in",
            NoticeKind::Error => "message error fade-in",
        }
    }

    /// Success notices clear themselves; errors stay until the next action.
    pub fn auto_clear_after(&self) -> Option<Duration> {
        match self.kind {
            NoticeKind::Success => Some(SUCCESS_NOTICE),
            NoticeKind::Info | NoticeKind::Error => None,
        }
    }
}

/// One message region. `seq` increases on every change so a delayed clear
/// only removes the notice it was scheduled for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeSlot {
    pub seq: u64,
    pub notice: Option<Notice>,
}

impl NoticeSlot {
    /// Replace the current notice and return its sequence number.
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.seq += 1;
        self.notice = Some(notice);
        self.seq
    }

    pub fn clear(&mut self) {
        self.seq += 1;
        self.notice = None;
    }

    /// Clear only if nothing newer replaced the notice shown at `seq`.
    pub fn clear_if_current(&mut self, seq: u64) -> bool {
        if self.seq == seq && self.notice.is_some() {
            self.notice = None;
            true
        } else {
            false
        }
    }

    pub fn class(&self) -> &'static str {
        self.notice.as_ref().map_or("message", Notice::css_class)
    }

    pub fn text(&self) -> String {
        self.notice.as_ref().map(|n| n.text.clone()).unwrap_or_default()
    }
}
