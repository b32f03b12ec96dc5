//! The "Yes" button's pointer feedback
//!
//! Hover grows the button, lights its glow and slides a sheen up over it;
//! pressing shrinks it. Purely cosmetic: acceptance is a separate event.

use serde::{Deserialize, Serialize};

use crate::consts::{YES_HOVER_SCALE, YES_TAP_SCALE};

/// Time for the sheen to slide fully in or out (seconds)
const SHEEN_SECS: f32 = 0.3;

/// Hover/press state of the Yes button
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AcceptControl {
    hovered: bool,
    pressed: bool,
    /// 0 = sheen parked below the button, 1 = covering it
    sheen: f32,
}

impl AcceptControl {
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        // Leaving cancels a press that never released over the button
        if !hovered {
            self.pressed = false;
        }
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Slide the sheen toward where hover wants it
    pub fn tick(&mut self, dt: f32, reduced_motion: bool) {
        let target = if self.hovered { 1.0 } else { 0.0 };
        if reduced_motion {
            self.sheen = target;
            return;
        }
        let step = dt.max(0.0) / SHEEN_SECS;
        self.sheen = if self.sheen < target {
            (self.sheen + step).min(target)
        } else {
            (self.sheen - step).max(target)
        };
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Press wins over hover
    pub fn scale(&self) -> f32 {
        if self.pressed {
            YES_TAP_SCALE
        } else if self.hovered {
            YES_HOVER_SCALE
        } else {
            1.0
        }
    }

    /// Pink drop-shadow strength, on while hovered
    pub fn glow(&self) -> f32 {
        if self.hovered { 0.5 } else { 0.0 }
    }

    pub fn sheen(&self) -> f32 {
        self.sheen
    }
}
