//! Named UI delays and the login/signup card cross-fade.
//!
//! DESIGN
//! ======
//! Every cosmetic delay lives in this one table so state changes never embed
//! ad-hoc timer values. `CardSwitch` is a pure phase machine; the page drives
//! it with `gloo-timers` and renders `class_for` on each card.

#[cfg(test)]
#[path = "transitions_test.rs"]
mod transitions_test;

use std::time::Duration;

/// Fade-out of the card being hidden before it is removed from layout.
pub const CARD_FADE_OUT: Duration = Duration::from_millis(300);
/// Pause between un-hiding the target card and starting its fade-in.
pub const CARD_REVEAL: Duration = Duration::from_millis(50);
/// Lifetime of a success notice before it clears itself.
pub const SUCCESS_NOTICE: Duration = Duration::from_millis(5000);
/// Delay after a successful signup before returning to the login card.
pub const SIGNUP_TO_LOGIN: Duration = Duration::from_millis(2000);

/// The two mutually exclusive auth cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Card {
    #[default]
    Login,
    Signup,
}

/// Cross-fade phase between the two cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSwitch {
    Idle(Card),
    FadingOut { from: Card, to: Card },
    Revealing(Card),
}

impl Default for CardSwitch {
    fn default() -> Self {
        Self::Idle(Card::default())
    }
}

impl CardSwitch {
    /// Card the user is switching toward, or the resting card.
    pub fn target(self) -> Card {
        match self {
            Self::Idle(card) | Self::Revealing(card) => card,
            Self::FadingOut { to, .. } => to,
        }
    }

    /// Begin a switch toward `to`. Returns `None` when `to` is already the
    /// target, so callers skip scheduling timers.
    #[must_use]
    pub fn begin(self, to: Card) -> Option<Self> {
        match self {
            Self::Idle(card) if card != to => Some(Self::FadingOut { from: card, to }),
            // Only two cards exist, so retargeting mid-fade means going back.
            Self::FadingOut { from, to: current } if current != to => Some(Self::Idle(from)),
            Self::Revealing(card) if card != to => Some(Self::FadingOut { from: card, to }),
            _ => None,
        }
    }

    /// Advance one phase once its delay has elapsed.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Self::FadingOut { to, .. } => Self::Revealing(to),
            Self::Revealing(card) | Self::Idle(card) => Self::Idle(card),
        }
    }

    /// Delay to wait in the current phase before calling `advance`.
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::FadingOut { .. } => Some(CARD_FADE_OUT),
            Self::Revealing(_) => Some(CARD_REVEAL),
            Self::Idle(_) => None,
        }
    }

    /// CSS classes for `card` in the current phase.
    pub fn class_for(self, card: Card) -> &'static str {
        match self {
            Self::Idle(active) if active == card => "auth-card",
            Self::FadingOut { from, .. } if from == card => "auth-card auth-card--leaving",
            Self::Revealing(target) if target == card => "auth-card auth-card--entering",
            _ => "auth-card hidden",
        }
    }
}

/// Wait out one named delay. Outside the browser this returns immediately.
#[allow(clippy::unused_async)]
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "hydrate")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(feature = "hydrate"))]
    let _ = duration;
}
