//! Ambient loops: background blobs, floating heart, blinking caret

use serde::{Deserialize, Serialize};

use super::motion::{Easing, keyframes, looped};
use crate::consts::{CARET_BLINK_SECS, HEART_FLOAT_PX, HEART_FLOAT_SECS, SPARKLE_PULSE_SECS};

/// Background blob loop periods (seconds)
const BLOB_A_SECS: f32 = 20.0;
const BLOB_B_SECS: f32 = 15.0;

/// One frame of a background blob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobFrame {
    pub scale: f32,
    pub rotate_deg: f32,
    pub x: f32,
    pub opacity: f32,
}

impl BlobFrame {
    /// Resting frame (reduced motion)
    fn rest(opacity: f32) -> Self {
        Self {
            scale: 1.0,
            rotate_deg: 0.0,
            x: 0.0,
            opacity,
        }
    }
}

/// Top-left rose blob: slow linear breathe and quarter turn
pub fn blob_a(elapsed: f32, reduced_motion: bool) -> BlobFrame {
    if reduced_motion {
        return BlobFrame::rest(0.3);
    }
    let t = looped(elapsed, BLOB_A_SECS, Easing::Linear);
    BlobFrame {
        scale: keyframes(&[1.0, 1.2, 1.0], t),
        rotate_deg: keyframes(&[0.0, 90.0, 0.0], t),
        x: 0.0,
        opacity: keyframes(&[0.3, 0.5, 0.3], t),
    }
}

/// Bottom-right indigo blob: eased breathe and drift
pub fn blob_b(elapsed: f32, reduced_motion: bool) -> BlobFrame {
    if reduced_motion {
        return BlobFrame::rest(0.2);
    }
    let t = looped(elapsed, BLOB_B_SECS, Easing::EaseInOut);
    BlobFrame {
        scale: keyframes(&[1.0, 1.1, 1.0], t),
        rotate_deg: 0.0,
        x: keyframes(&[0.0, 50.0, 0.0], t),
        opacity: keyframes(&[0.2, 0.4, 0.2], t),
    }
}

/// Vertical offset of the floating heart (pixels, negative is up)
pub fn heart_float(elapsed: f32, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 0.0;
    }
    let t = looped(elapsed, HEART_FLOAT_SECS, Easing::EaseInOut);
    keyframes(&[0.0, -HEART_FLOAT_PX, 0.0], t)
}

/// Caret opacity; blinks for as long as the headline exists
pub fn caret_opacity(elapsed: f32) -> f32 {
    let t = looped(elapsed, CARET_BLINK_SECS, Easing::Linear);
    keyframes(&[0.0, 1.0, 0.0], t)
}

/// Opacity of the sparkle on the Yes button, pulsing 1 -> 0.5 -> 1
pub fn sparkle_pulse(elapsed: f32, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 1.0;
    }
    let t = looped(elapsed, SPARKLE_PULSE_SECS, Easing::EaseInOut);
    keyframes(&[1.0, 0.5, 1.0], t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_a_peak_midway() {
        let mid = blob_a(10.0, false);
        assert!((mid.scale - 1.2).abs() < 1e-4);
        assert!((mid.rotate_deg - 90.0).abs() < 1e-3);
        assert!((mid.opacity - 0.5).abs() < 1e-4);

        let start = blob_a(0.0, false);
        let wrapped = blob_a(20.0, false);
        assert!((start.scale - wrapped.scale).abs() < 1e-4);
    }

    #[test]
    fn test_blob_b_drifts() {
        let mid = blob_b(7.5, false);
        assert!((mid.x - 50.0).abs() < 0.1);
        assert!(blob_b(0.0, false).x.abs() < 1e-3);
    }

    #[test]
    fn test_reduced_motion_rests() {
        assert_eq!(blob_a(10.0, true), BlobFrame::rest(0.3));
        assert_eq!(blob_b(7.5, true).x, 0.0);
        assert_eq!(heart_float(2.0, true), 0.0);
    }

    #[test]
    fn test_heart_float_range() {
        assert!((heart_float(2.0, false) + HEART_FLOAT_PX).abs() < 0.05);
        for i in 0..100 {
            let y = heart_float(i as f32 * 0.13, false);
            assert!((-HEART_FLOAT_PX - 1e-3..=1e-3).contains(&y));
        }
    }

    #[test]
    fn test_caret_blinks_forever() {
        assert!(caret_opacity(0.0) < 1e-4);
        assert!((caret_opacity(0.4) - 1.0).abs() < 1e-3);
        assert!((caret_opacity(1000.4) - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_sparkle_pulses() {
        assert!((sparkle_pulse(0.0, false) - 1.0).abs() < 1e-4);
        assert!((sparkle_pulse(1.0, false) - 0.5).abs() < 1e-3);
        assert!((sparkle_pulse(2.0, false) - 1.0).abs() < 1e-4);
        assert_eq!(sparkle_pulse(1.0, true), 1.0);
    }
}
