//! Valentine Request - an animated greeting card
//!
//! Core modules:
//! - `card`: Card model (status, typewriter reveal, evasive button, motion curves)
//! - `view`: Pure scene composition from card state + elapsed time
//! - `platform`: Scoped browser timers for the headline reveal
//! - `settings`: Card text and tuning, with defaults matching the shipped card

pub mod card;
pub mod platform;
pub mod settings;
pub mod view;

pub use card::{CardEvent, CardState, Status};
pub use settings::Settings;
pub use view::{Scene, View, compose};

/// Card timing and layout constants
pub mod consts {
    /// Delay before the headline starts typing (ms)
    pub const HEADLINE_DELAY_MS: u64 = 500;
    /// Time between typed characters (ms)
    pub const TYPE_INTERVAL_MS: u64 = 50;
    /// Caret blink period (seconds, opacity 0 -> 1 -> 0)
    pub const CARET_BLINK_SECS: f32 = 0.8;

    /// Subtext fade-in delay and duration (seconds)
    pub const SUBTEXT_DELAY_SECS: f32 = 2.5;
    pub const SUBTEXT_FADE_SECS: f32 = 1.0;

    /// Card entrance (seconds)
    pub const CARD_INTRO_SECS: f32 = 0.8;
    /// Greeting exit before the confirmation enters (seconds)
    pub const GREETING_EXIT_SECS: f32 = 0.3;
    /// Confirmation panel fade/scale in (seconds)
    pub const CONFIRMATION_ENTER_SECS: f32 = 0.3;

    /// Evasive button random offset range (+/- units on each axis)
    pub const EVADE_RANGE: f32 = 100.0;
    /// Attempts after which the button fades and blurs
    pub const DOUBT_THRESHOLD: u32 = 3;
    /// Opacity/blur once past the threshold
    pub const FADED_OPACITY: f32 = 0.5;
    pub const FADED_BLUR_PX: f32 = 1.0;

    /// Evasive button spring
    pub const EVADE_STIFFNESS: f32 = 300.0;
    pub const EVADE_DAMPING: f32 = 20.0;

    /// Yes button hover/tap scale
    pub const YES_HOVER_SCALE: f32 = 1.02;
    pub const YES_TAP_SCALE: f32 = 0.98;
    /// Sparkle icon pulse period on the Yes button (seconds)
    pub const SPARKLE_PULSE_SECS: f32 = 2.0;

    /// Heart float loop (seconds, pixels)
    pub const HEART_FLOAT_SECS: f32 = 4.0;
    pub const HEART_FLOAT_PX: f32 = 10.0;

    /// Maximum frame delta fed to the card clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
