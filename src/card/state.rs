//! Card state and event handling
//!
//! Everything the screen owns lives in [`CardState`]; it is dropped with the
//! screen and never persisted.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::accept::AcceptControl;
use super::evade::{Approach, EvasiveControl};
use super::reveal::Typewriter;
use crate::consts::MAX_FRAME_DT;
use crate::settings::Settings;

/// Which view the card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Greeting with the question and both buttons
    #[default]
    Idle,
    /// Confirmation panel; terminal
    Success,
}

/// Input the card reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEvent {
    /// Yes button activated
    Accept,
    /// Pointer entered or touched the No button
    ApproachDecline(Approach),
    /// No button clicked (if anyone manages it)
    ActivateDecline,
    /// Pointer entered (true) or left (false) the Yes button
    HoverAccept(bool),
    /// Yes button pressed down (true) or released (false)
    PressAccept(bool),
}

/// All state owned by one mounted card
#[derive(Debug, Clone)]
pub struct CardState {
    pub status: Status,
    pub evasive: EvasiveControl,
    pub accept: AcceptControl,
    pub headline: Typewriter,
    /// Card clock (seconds since mount)
    pub clock: f32,
    /// Card clock value when the card was accepted
    pub accepted_at: Option<f32>,
    reduced_motion: bool,
    rng: Pcg32,
}

impl CardState {
    /// Create a fresh card using `seed` for the evasion RNG
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            status: Status::Idle,
            evasive: EvasiveControl::new(settings.evade_range, settings.doubt_threshold),
            accept: AcceptControl::default(),
            headline: Typewriter::with_interval(
                settings.headline.clone(),
                settings.headline_delay(),
                settings.type_interval(),
            ),
            clock: 0.0,
            accepted_at: None,
            reduced_motion: settings.reduced_motion,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply an input. Returns true if anything visible changed.
    pub fn apply(&mut self, event: CardEvent) -> bool {
        match (self.status, event) {
            (Status::Idle, CardEvent::Accept) => {
                self.status = Status::Success;
                self.accepted_at = Some(self.clock);
                // The greeting is leaving; its reveal must not fire again
                self.headline.cancel();
                log::info!(
                    "Accepted after {} evasion(s) at {:.2}s",
                    self.evasive.attempts(),
                    self.clock
                );
                true
            }
            (Status::Idle, CardEvent::ApproachDecline(approach)) => {
                self.evasive.evade(&mut self.rng, approach);
                true
            }
            (Status::Idle, CardEvent::ActivateDecline) => {
                log::debug!("No button activated; ignoring");
                false
            }
            (Status::Idle, CardEvent::HoverAccept(hovered)) => {
                let changed = self.accept.is_hovered() != hovered;
                self.accept.set_hovered(hovered);
                changed
            }
            (Status::Idle, CardEvent::PressAccept(pressed)) => {
                let changed = self.accept.is_pressed() != pressed;
                self.accept.set_pressed(pressed);
                changed
            }
            (Status::Success, _) => false,
        }
    }

    /// Advance the card clock and the headline reveal by `dt` seconds
    /// (capped per frame). Returns true if the headline prefix changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let dt = self.advance_clock(dt);
        self.headline.advance(Duration::from_secs_f32(dt))
    }

    /// Advance only the card clock and springs, for hosts whose own timers
    /// drive the reveal. Returns the dt actually applied.
    pub fn advance_clock(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.clock += dt;
        self.evasive.tick(dt, self.reduced_motion);
        self.accept.tick(dt, self.reduced_motion);
        dt
    }

    /// Seconds since acceptance, if accepted
    pub fn since_accepted(&self) -> Option<f32> {
        self.accepted_at.map(|at| (self.clock - at).max(0.0))
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Tear the card down: cancel anything still scheduled
    pub fn unmount(&mut self) {
        self.headline.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{YES_HOVER_SCALE, YES_TAP_SCALE};

    fn card() -> CardState {
        CardState::new(&Settings::default(), 12345)
    }

    #[test]
    fn test_starts_idle() {
        let state = card();
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.evasive.attempts(), 0);
        assert_eq!(state.accepted_at, None);
    }

    #[test]
    fn test_accept_is_terminal() {
        let mut state = card();
        state.advance(0.05);
        assert!(state.apply(CardEvent::Accept));
        assert_eq!(state.status, Status::Success);
        let at = state.accepted_at;
        assert!(at.is_some());

        state.advance(0.05);
        assert!(!state.apply(CardEvent::Accept));
        assert_eq!(state.accepted_at, at);
        assert!(!state.apply(CardEvent::ApproachDecline(Approach::Hover)));
        assert_eq!(state.status, Status::Success);
    }

    #[test]
    fn test_decline_click_is_noop() {
        let mut state = card();
        assert!(!state.apply(CardEvent::ActivateDecline));
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.evasive.attempts(), 0);
    }

    #[test]
    fn test_approach_counts() {
        let mut state = card();
        for _ in 0..5 {
            assert!(state.apply(CardEvent::ApproachDecline(Approach::Touch)));
        }
        assert_eq!(state.evasive.attempts(), 5);
        assert_eq!(state.evasive.label(), "Really?");
        assert!(state.evasive.opacity() < 1.0);
    }

    #[test]
    fn test_accept_cancels_reveal() {
        let mut state = card();
        for _ in 0..12 {
            state.advance(0.05);
        }
        let shown = state.headline.visible().to_string();
        state.apply(CardEvent::Accept);
        for _ in 0..100 {
            assert!(!state.advance(0.05));
        }
        assert_eq!(state.headline.visible(), shown);
    }

    #[test]
    fn test_unmount_mid_reveal() {
        let mut state = card();
        state.advance(0.08);
        state.unmount();
        state.unmount();
        assert!(!state.advance(0.1));
        assert!(state.headline.is_cancelled());
    }

    #[test]
    fn test_frame_dt_capped() {
        let mut state = card();
        state.advance(10.0);
        assert!(state.clock <= MAX_FRAME_DT + f32::EPSILON);
        state.advance(-1.0);
        state.advance(f32::NAN);
        assert!(state.clock <= MAX_FRAME_DT + f32::EPSILON);
    }

    #[test]
    fn test_clock_only_leaves_reveal() {
        let mut state = card();
        for _ in 0..40 {
            state.advance_clock(0.05);
        }
        assert!(state.clock > 1.9);
        assert_eq!(state.headline.visible(), "");
    }

    #[test]
    fn test_accept_button_feedback() {
        let mut state = card();
        assert!(state.apply(CardEvent::HoverAccept(true)));
        assert!(!state.apply(CardEvent::HoverAccept(true)));
        assert_eq!(state.accept.scale(), YES_HOVER_SCALE);

        assert!(state.apply(CardEvent::PressAccept(true)));
        assert_eq!(state.accept.scale(), YES_TAP_SCALE);

        for _ in 0..10 {
            state.advance_clock(0.05);
        }
        assert_eq!(state.accept.sheen(), 1.0);
        // Feedback never changes the outcome
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn test_accept_feedback_ignored_after_success() {
        let mut state = card();
        state.apply(CardEvent::Accept);
        assert!(!state.apply(CardEvent::HoverAccept(true)));
        assert!(!state.apply(CardEvent::PressAccept(true)));
        assert_eq!(state.accept.scale(), 1.0);
    }

    #[test]
    fn test_suspended_card_keeps_revealing() {
        // A page parked in the back/forward cache is not torn down
        let mut state = card();
        for _ in 0..40 {
            state.advance(0.05);
        }
        assert!(!state.headline.is_cancelled());
        assert!(state.headline.is_complete());
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let mut a = card();
        let mut b = card();
        for _ in 0..4 {
            a.apply(CardEvent::ApproachDecline(Approach::Hover));
            b.apply(CardEvent::ApproachDecline(Approach::Hover));
        }
        assert_eq!(a.evasive.target(), b.evasive.target());
    }
}
