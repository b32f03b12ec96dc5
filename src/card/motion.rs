//! Motion curves for the card's declarative animations
//!
//! Everything here is a pure function of time except [`SpringVec2`], which
//! integrates on a fixed substep so large frame deltas stay stable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized progress in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseInOut,
    /// CSS-style cubic-bezier(x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

/// Card entrance curve
pub const EASE_OUT_EXPO_LIKE: Easing = Easing::CubicBezier(0.16, 1.0, 0.3, 1.0);

impl Easing {
    /// Apply the curve to `t` (clamped to [0, 1])
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // CSS ease-in-out
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_axis_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Evaluate a unit cubic bezier at x = `t`, solving for the curve parameter
/// with Newton iterations and falling back to bisection.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut s = t;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - t;
        if err.abs() < 1e-5 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

/// Interpolate evenly spaced keyframes at progress `t` in [0, 1]
pub fn keyframes(values: &[f32], t: f32) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (values.len() - 1) as f32;
            let scaled = t * segments;
            let i = (scaled.floor() as usize).min(values.len() - 2);
            let local = scaled - i as f32;
            lerp(values[i], values[i + 1], local)
        }
    }
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Progress through a repeating loop of `period` seconds, eased
pub fn looped(elapsed: f32, period: f32, easing: Easing) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    easing.apply(elapsed.rem_euclid(period) / period)
}

/// Progress of a one-shot animation starting at `start` lasting `duration`
pub fn once(elapsed: f32, start: f32, duration: f32, easing: Easing) -> f32 {
    if elapsed < start {
        return 0.0;
    }
    if duration <= 0.0 {
        return 1.0;
    }
    easing.apply((elapsed - start) / duration)
}

/// Step response of an underdamped unit-mass spring released from 0 toward 1.
/// Overshoots past 1 and settles; used for "pop in" scales.
pub fn spring_pop(elapsed: f32, stiffness: f32, damping: f32) -> f32 {
    if elapsed <= 0.0 {
        return 0.0;
    }
    let omega = stiffness.max(0.1).sqrt();
    let zeta = (damping / (2.0 * omega)).clamp(0.0, 0.999);
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let decay = (-zeta * omega * elapsed).exp();
    1.0 - decay * ((omega_d * elapsed).cos() + zeta * omega / omega_d * (omega_d * elapsed).sin())
}

/// Maximum integration substep (seconds)
const MAX_STEP_SECS: f32 = 0.004;
/// Position/velocity deltas below which the spring is at rest
const REST_THRESHOLD: f32 = 0.01;

/// Damped spring chasing a 2D target (unit mass, semi-implicit Euler)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringVec2 {
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
    stiffness: f32,
    damping: f32,
}

impl SpringVec2 {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            stiffness: stiffness.max(0.1),
            damping: damping.max(0.0),
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Jump straight to the target (reduced motion)
    pub fn snap(&mut self) {
        self.position = self.target;
        self.velocity = Vec2::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.position - self.target).length() < REST_THRESHOLD
            && self.velocity.length() < REST_THRESHOLD
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.is_at_rest() {
            self.snap();
            return;
        }
        if dt <= 0.0 {
            return;
        }

        let steps = (dt / MAX_STEP_SECS).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let force =
                -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
            self.velocity += force * h;
            self.position += self.velocity * h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframes_triangle() {
        let frames = [0.3, 0.5, 0.3];
        assert!((keyframes(&frames, 0.0) - 0.3).abs() < 1e-6);
        assert!((keyframes(&frames, 0.5) - 0.5).abs() < 1e-6);
        assert!((keyframes(&frames, 1.0) - 0.3).abs() < 1e-6);
        assert!((keyframes(&frames, 0.25) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_keyframes_degenerate() {
        assert_eq!(keyframes(&[], 0.5), 0.0);
        assert_eq!(keyframes(&[7.0], 0.9), 7.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut, EASE_OUT_EXPO_LIKE] {
            assert!(easing.apply(0.0).abs() < 1e-4);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-3);
        assert!(e.apply(0.25) < 0.25);
        assert!(e.apply(0.75) > 0.75);
    }

    #[test]
    fn test_intro_curve_front_loaded() {
        // Fast start, long settle
        assert!(EASE_OUT_EXPO_LIKE.apply(0.2) > 0.5);
    }

    #[test]
    fn test_looped_wraps() {
        let a = looped(1.0, 4.0, Easing::Linear);
        let b = looped(5.0, 4.0, Easing::Linear);
        assert!((a - b).abs() < 1e-5);
        assert_eq!(looped(3.0, 0.0, Easing::Linear), 0.0);
    }

    #[test]
    fn test_once_before_and_after() {
        assert_eq!(once(1.0, 2.5, 1.0, Easing::Linear), 0.0);
        assert!((once(3.0, 2.5, 1.0, Easing::Linear) - 0.5).abs() < 1e-6);
        assert_eq!(once(10.0, 2.5, 1.0, Easing::Linear), 1.0);
        assert_eq!(once(3.0, 2.5, 0.0, Easing::Linear), 1.0);
    }

    #[test]
    fn test_spring_pop_overshoots_then_settles() {
        assert_eq!(spring_pop(0.0, 100.0, 10.0), 0.0);
        let peak = (1..100)
            .map(|i| spring_pop(i as f32 * 0.01, 100.0, 10.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.05);
        assert!((spring_pop(3.0, 100.0, 10.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = SpringVec2::new(300.0, 20.0);
        spring.set_target(Vec2::new(80.0, -45.0));
        for _ in 0..240 {
            spring.tick(1.0 / 60.0);
        }
        assert!(spring.is_at_rest());
        assert!((spring.position - Vec2::new(80.0, -45.0)).length() < 0.05);
    }

    #[test]
    fn test_spring_large_dt_stays_finite() {
        let mut spring = SpringVec2::new(300.0, 20.0);
        spring.set_target(Vec2::new(100.0, 100.0));
        spring.tick(0.5);
        assert!(spring.position.is_finite());
        assert!(spring.position.length() < 400.0);
    }
}
