//! Dab rotation: fixed, or following the direction of travel, with optional jitter.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SEGMENT_LENGTH;

/// Angle policy shared by all mirrors of a brush
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSettings {
    /// Orient each dab along the direction of travel
    pub angle_aware: bool,
    /// Angle in radians used when not angle-aware, and for the first dab of a
    /// stroke (no direction yet)
    pub fixed_angle: f32,
    /// Maximum random deviation in radians, added to every dab
    pub jitter: f32,
}

impl Default for AngleSettings {
    fn default() -> Self {
        Self::NOT_ANGLE_AWARE
    }
}

impl AngleSettings {
    /// Every dab unrotated
    pub const NOT_ANGLE_AWARE: Self = Self {
        angle_aware: false,
        fixed_angle: 0.0,
        jitter: 0.0,
    };

    /// Dabs follow the stroke direction, no jitter
    pub const ANGLE_AWARE: Self = Self {
        angle_aware: true,
        fixed_angle: 0.0,
        jitter: 0.0,
    };

    pub fn fixed(angle: f32) -> Self {
        Self {
            angle_aware: false,
            fixed_angle: normalize_angle(angle),
            jitter: 0.0,
        }
    }

    pub fn with_jitter(self, jitter: f32) -> Self {
        Self {
            jitter: jitter.abs(),
            ..self
        }
    }

    pub fn is_angle_aware(&self) -> bool {
        self.angle_aware
    }

    /// Rotation for the next dab.
    ///
    /// `direction` is the direction of travel in radians, `None` when it is
    /// undefined. With jitter configured, two calls with the same input can
    /// return different angles.
    pub fn compute_angle<R: Rng + ?Sized>(&self, direction: Option<f32>, rng: &mut R) -> f32 {
        let base = match direction {
            Some(direction) if self.angle_aware => direction,
            _ => self.fixed_angle,
        };
        let delta = if self.jitter > 0.0 && self.jitter.is_finite() {
            rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        normalize_angle(base + delta)
    }
}

/// Wrap an angle into [0, 2π)
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Direction of travel from `from` to `to`, or `None` for a zero-length move
pub fn direction_of(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta.length() < MIN_SEGMENT_LENGTH {
        return None;
    }
    Some(normalize_angle(delta.y.atan2(delta.x)))
}
