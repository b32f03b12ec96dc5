//! Platform abstraction layer
//!
//! Browser-only pieces the card model stays free of:
//! - Scoped JS timers (cleared on drop)
//! - The headline reveal timer built on them
//! - Page lifecycle decisions

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Interval, RevealTimer, Timeout};

/// What a `pagehide` means for the mounted card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Page parked in the back/forward cache; timers freeze and resume with it
    Suspend,
    /// Page is going away for good
    Unload,
}

impl PageHide {
    /// Classify from `PageTransitionEvent.persisted`
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Suspend
        } else {
            PageHide::Unload
        }
    }

    /// Only a real unload tears the card down
    pub fn tears_down(self) -> bool {
        self == PageHide::Unload
    }
}
