//! Spacing strategies: how far apart consecutive dabs are placed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SPACING;

/// Policy converting a brush diameter into the distance between dabs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpacingStrategy {
    /// Constant distance in pixels, independent of the diameter
    Fixed { distance: f32 },
    /// Fraction of the diameter (e.g., 0.25 = 25% of diameter)
    Proportional { ratio: f32 },
    /// `base` pixels plus a uniform random offset in `[-jitter, +jitter]`,
    /// drawn again for every dab
    Jittered { base: f32, jitter: f32 },
}

impl Default for SpacingStrategy {
    fn default() -> Self {
        Self::Proportional { ratio: 0.25 }
    }
}

impl SpacingStrategy {
    pub fn fixed(distance: f32) -> Self {
        Self::Fixed { distance }
    }

    pub fn proportional(ratio: f32) -> Self {
        Self::Proportional { ratio }
    }

    pub fn jittered(base: f32, jitter: f32) -> Self {
        Self::Jittered {
            base,
            jitter: jitter.abs(),
        }
    }

    /// Spacing for a dab of the given diameter.
    ///
    /// The result is never below [`MIN_SPACING`], whatever the configuration
    /// or jitter draw. `rng` is only consulted by [`SpacingStrategy::Jittered`].
    pub fn spacing<R: Rng + ?Sized>(&self, diameter: f32, rng: &mut R) -> f32 {
        let raw = match *self {
            Self::Fixed { distance } => distance,
            Self::Proportional { ratio } => diameter * ratio,
            Self::Jittered { base, jitter } => {
                if jitter > 0.0 && jitter.is_finite() {
                    base + rng.random_range(-jitter..=jitter)
                } else {
                    base
                }
            }
        };

        // NaN fails the comparison and falls back to the minimum as well
        if raw > MIN_SPACING { raw } else { MIN_SPACING }
    }

    /// Whether repeated calls with the same diameter return the same value
    pub fn is_deterministic(&self) -> bool {
        match *self {
            Self::Jittered { jitter, .. } => jitter == 0.0,
            _ => true,
        }
    }
}
