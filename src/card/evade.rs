//! The evasive "No" button
//!
//! Hovering or touching the button throws it to a random offset from its
//! resting slot and bumps the attempt counter. The label and look escalate
//! with the counter; clicking it does nothing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::SpringVec2;
use crate::consts::*;

/// Label tier picked from the attempt counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoubtTier {
    /// Never approached
    Neutral,
    /// 1..=threshold attempts
    Escalating,
    /// Past the threshold
    Terminal,
}

impl DoubtTier {
    pub fn from_attempts(attempts: u32, threshold: u32) -> Self {
        if attempts == 0 {
            DoubtTier::Neutral
        } else if attempts <= threshold {
            DoubtTier::Escalating
        } else {
            DoubtTier::Terminal
        }
    }

    /// Default button label for this tier
    pub fn label(&self) -> &'static str {
        match self {
            DoubtTier::Neutral => "No thanks",
            DoubtTier::Escalating => "Are you sure?",
            DoubtTier::Terminal => "Really?",
        }
    }
}

/// How the pointer reached the button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approach {
    Hover,
    Touch,
}

/// Draw one offset component uniformly from `[-range, range)`
fn random_offset<R: Rng>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        rng.random_range(-range..range)
    } else {
        0.0
    }
}

/// Evasive button state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvasiveControl {
    /// Times the button has been approached
    attempts: u32,
    /// Offset from the resting slot the button is heading to
    target: Vec2,
    /// Displayed offset, springing toward `target`
    spring: SpringVec2,
    /// Symmetric per-axis range for new offsets
    range: f32,
    /// Attempts after which the button fades
    threshold: u32,
}

impl Default for EvasiveControl {
    fn default() -> Self {
        Self::new(EVADE_RANGE, DOUBT_THRESHOLD)
    }
}

impl EvasiveControl {
    pub fn new(range: f32, threshold: u32) -> Self {
        Self {
            attempts: 0,
            target: Vec2::ZERO,
            spring: SpringVec2::new(EVADE_STIFFNESS, EVADE_DAMPING),
            range: range.max(0.0),
            threshold,
        }
    }

    /// Jump to a fresh random offset and count the attempt
    pub fn evade<R: Rng>(&mut self, rng: &mut R, approach: Approach) {
        let x = random_offset(rng, self.range);
        let y = random_offset(rng, self.range);
        self.target = Vec2::new(x, y);
        self.spring.set_target(self.target);
        self.attempts = self.attempts.saturating_add(1);
        log::debug!(
            "No button evaded ({:?}) to ({:.1}, {:.1}), attempt {}",
            approach,
            x,
            y,
            self.attempts
        );
    }

    /// Animate the displayed offset
    pub fn tick(&mut self, dt: f32, reduced_motion: bool) {
        if reduced_motion {
            self.spring.snap();
        } else {
            self.spring.tick(dt);
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Logical offset (what the last evasion picked)
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Offset currently on screen
    pub fn displayed(&self) -> Vec2 {
        self.spring.position
    }

    pub fn tier(&self) -> DoubtTier {
        DoubtTier::from_attempts(self.attempts, self.threshold)
    }

    pub fn label(&self) -> &'static str {
        self.tier().label()
    }

    /// Faded and blurred once attempts pass the threshold
    pub fn is_deemphasized(&self) -> bool {
        self.attempts > self.threshold
    }

    pub fn opacity(&self) -> f32 {
        if self.is_deemphasized() {
            FADED_OPACITY
        } else {
            1.0
        }
    }

    pub fn blur_px(&self) -> f32 {
        if self.is_deemphasized() {
            FADED_BLUR_PX
        } else {
            0.0
        }
    }
}
