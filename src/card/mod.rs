//! Card model
//!
//! All card behavior lives here. This module stays platform-free:
//! - Time comes in as explicit deltas
//! - Randomness comes from the card's own seeded RNG
//! - No DOM or timer dependencies

pub mod accept;
pub mod ambient;
pub mod evade;
pub mod motion;
pub mod reveal;
pub mod state;

pub use accept::AcceptControl;
pub use ambient::{BlobFrame, blob_a, blob_b, caret_opacity, heart_float, sparkle_pulse};
pub use evade::{Approach, DoubtTier, EvasiveControl};
pub use motion::{Easing, SpringVec2, keyframes, looped, once, spring_pop};
pub use reveal::{Prefixes, RevealPhase, Typewriter, revealed_chars};
pub use state::{CardEvent, CardState, Status};
