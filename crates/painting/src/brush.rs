//! Dab brush engine
//!
//! A [`DabsBrush`] turns a sequence of input points into evenly spaced dabs.
//! Distance travelled since the last dab carries over between calls, so the
//! dab density does not depend on how often the pointer is sampled.

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace, warn};

use crate::angle::{AngleSettings, direction_of};
use crate::constants::{MIN_SEGMENT_LENGTH, SPACING_EPSILON};
use crate::error::BrushError;
use crate::settings::{BrushId, DabsBrushSettings};
use crate::spacing::SpacingStrategy;
use crate::types::{BlendMode, DabPlacement, DabTarget};

/// Anything that can be driven like a pointer stroke
pub trait Stroker {
    /// Begin a stroke at `point`, stamping the first dab there
    fn start_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<(), BrushError>;

    /// Move to `point`, returning the number of dabs stamped
    fn continue_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, BrushError>;

    /// Finish the stroke without stamping anything
    fn end_stroke(&mut self) -> Result<(), BrushError>;

    fn is_stroke_active(&self) -> bool;
}

/// Per-stroke tracking state
#[derive(Debug, Clone, Copy)]
struct StrokeState {
    /// Position of the most recent dab
    last_dab: Vec2,
    /// Most recent input point
    last_point: Vec2,
    /// Path length travelled since the most recent dab
    distance_since_last_dab: f32,
    /// Dabs stamped in this stroke
    dab_count: usize,
}

/// One brush instance (one symmetry mirror) painting with shared settings
pub struct DabsBrush {
    settings: DabsBrushSettings,
    id: BrushId,
    diameter: f32,
    mode: BlendMode,
    /// Policies as of `seen_generation`
    spacing: SpacingStrategy,
    angle: AngleSettings,
    seen_generation: u64,
    /// Spacing drawn for the interval in progress (jitter is drawn once per dab)
    next_spacing: Option<f32>,
    stroke: Option<StrokeState>,
    rng: StdRng,
}

impl std::fmt::Debug for DabsBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DabsBrush")
            .field("id", &self.id)
            .field("diameter", &self.diameter)
            .field("mode", &self.mode)
            .field("spacing", &self.spacing)
            .field("angle", &self.angle)
            .field("seen_generation", &self.seen_generation)
            .field("stroke", &self.stroke)
            .finish()
    }
}

impl DabsBrush {
    /// Create a brush registered on `settings`, with an OS-seeded jitter source
    pub fn new(settings: &DabsBrushSettings, diameter: f32) -> Result<Self, BrushError> {
        Self::with_rng(settings, diameter, StdRng::from_os_rng())
    }

    /// Create a brush whose jitter is reproducible
    pub fn with_seed(settings: &DabsBrushSettings, diameter: f32, seed: u64) -> Result<Self, BrushError> {
        Self::with_rng(settings, diameter, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &DabsBrushSettings, diameter: f32, rng: StdRng) -> Result<Self, BrushError> {
        validate_diameter(diameter)?;
        let id = settings.register_brush()?;
        Ok(Self {
            settings: settings.clone(),
            id,
            diameter,
            mode: BlendMode::Normal,
            spacing: settings.spacing_strategy(),
            angle: settings.angle_settings(),
            seen_generation: settings.generation(),
            next_spacing: None,
            stroke: None,
            rng,
        })
    }

    pub fn id(&self) -> BrushId {
        self.id
    }

    pub fn settings(&self) -> &DabsBrushSettings {
        &self.settings
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Change the diameter; takes effect from the next spacing decision
    pub fn set_diameter(&mut self, diameter: f32) -> Result<(), BrushError> {
        validate_diameter(diameter)?;
        self.diameter = diameter;
        self.next_spacing = None;
        Ok(())
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.mode
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.mode = mode;
    }

    /// Position of the last stamped dab, if a stroke is in progress
    pub fn last_dab_position(&self) -> Option<Vec2> {
        self.stroke.map(|s| s.last_dab)
    }

    /// Distance travelled since the last dab (0 when idle)
    pub fn leftover_distance(&self) -> f32 {
        self.stroke.map_or(0.0, |s| s.distance_since_last_dab)
    }

    /// Dabs stamped in the current stroke (0 when idle)
    pub fn dab_count(&self) -> usize {
        self.stroke.map_or(0, |s| s.dab_count)
    }

    /// Re-read the shared policies. Dabs already placed are not revisited.
    pub fn settings_changed(&mut self) {
        self.spacing = self.settings.spacing_strategy();
        self.angle = self.settings.angle_settings();
        self.seen_generation = self.settings.generation();
        self.next_spacing = None;
        debug!(
            "DabsBrush {}: picked up settings generation {}",
            self.id, self.seen_generation
        );
    }

    fn sync_settings(&mut self) {
        if self.settings.generation() != self.seen_generation {
            self.settings_changed();
        }
    }

    fn current_spacing(&mut self) -> f32 {
        match self.next_spacing {
            Some(spacing) => spacing,
            None => {
                let spacing = self.spacing.spacing(self.diameter, &mut self.rng);
                self.next_spacing = Some(spacing);
                spacing
            }
        }
    }

    fn stamp(&mut self, position: Vec2, direction: Option<f32>, target: &mut dyn DabTarget) {
        let dab = DabPlacement {
            position,
            angle: self.angle.compute_angle(direction, &mut self.rng),
            diameter: self.diameter,
            mode: self.mode,
        };
        trace!(
            "DabsBrush {}: dab at ({:.2}, {:.2}), angle={:.3}, diameter={:.1}",
            self.id, dab.position.x, dab.position.y, dab.angle, dab.diameter
        );
        target.stamp_dab(&dab);
        self.next_spacing = None;
    }
}

impl Stroker for DabsBrush {
    fn start_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<(), BrushError> {
        if self.stroke.is_some() {
            warn!("DabsBrush {}: start_stroke while a stroke is active", self.id);
            return Err(BrushError::StrokeAlreadyActive);
        }
        self.sync_settings();
        self.next_spacing = None;

        self.stamp(point, None, target);
        self.stroke = Some(StrokeState {
            last_dab: point,
            last_point: point,
            distance_since_last_dab: 0.0,
            dab_count: 1,
        });
        Ok(())
    }

    fn continue_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, BrushError> {
        let Some(mut state) = self.stroke else {
            warn!("DabsBrush {}: continue_stroke without an active stroke", self.id);
            return Err(BrushError::StrokeNotActive);
        };
        self.sync_settings();

        let segment = point - state.last_point;
        let length = segment.length();
        if length < MIN_SEGMENT_LENGTH {
            return Ok(0);
        }
        let tangent = segment / length;
        let direction = direction_of(state.last_point, point);

        // Walk the segment: `along` is the offset of the latest dab on it.
        // Offsets are summed in f64 so long segments at small spacings do not drift.
        let segment_length = f64::from(length);
        let epsilon = f64::from(SPACING_EPSILON);
        let mut along = 0.0_f64;
        let mut travelled = f64::from(state.distance_since_last_dab);
        let mut placed = 0;
        loop {
            let spacing = f64::from(self.current_spacing());
            let needed = (spacing - travelled).max(0.0);
            if along + needed > segment_length + epsilon {
                break;
            }
            along = (along + needed).min(segment_length);
            let position = if segment_length - along <= epsilon {
                point
            } else {
                state.last_point + tangent * along as f32
            };

            self.stamp(position, direction, target);
            state.last_dab = position;
            travelled = 0.0;
            placed += 1;
        }

        state.distance_since_last_dab = (travelled + segment_length - along).max(0.0) as f32;
        state.last_point = point;
        state.dab_count += placed;
        self.stroke = Some(state);

        if placed > 0 {
            debug!(
                "DabsBrush {}: {} dabs over {:.1}px, leftover {:.2}",
                self.id, placed, length, state.distance_since_last_dab
            );
        }
        Ok(placed)
    }

    fn end_stroke(&mut self) -> Result<(), BrushError> {
        let Some(state) = self.stroke.take() else {
            warn!("DabsBrush {}: end_stroke without an active stroke", self.id);
            return Err(BrushError::StrokeNotActive);
        };
        self.next_spacing = None;
        debug!("DabsBrush {}: stroke ended after {} dabs", self.id, state.dab_count);
        Ok(())
    }

    fn is_stroke_active(&self) -> bool {
        self.stroke.is_some()
    }
}

impl Drop for DabsBrush {
    fn drop(&mut self) {
        self.settings.unregister_brush(self.id);
    }
}

fn validate_diameter(diameter: f32) -> Result<(), BrushError> {
    if diameter.is_finite() && diameter > 0.0 {
        Ok(())
    } else {
        Err(BrushError::InvalidDiameter(diameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn fixed_settings(distance: f32) -> DabsBrushSettings {
        DabsBrushSettings::new(AngleSettings::default(), SpacingStrategy::fixed(distance))
    }

    fn positions(dabs: &[DabPlacement]) -> Vec<(f32, f32)> {
        dabs.iter().map(|d| (d.position.x, d.position.y)).collect()
    }

    fn assert_positions(dabs: &[DabPlacement], expected: &[(f32, f32)]) {
        let actual = positions(dabs);
        assert_eq!(actual.len(), expected.len(), "dabs: {actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.0 - e.0).abs() < 0.001 && (a.1 - e.1).abs() < 0.001,
                "expected {e:?}, got {a:?}"
            );
        }
    }

    #[test]
    fn test_first_dab_at_start() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();

        brush.start_stroke(Vec2::new(100.0, 100.0), &mut dabs).unwrap();

        assert_positions(&dabs, &[(100.0, 100.0)]);
        assert!(brush.is_stroke_active());
        assert_eq!(brush.leftover_distance(), 0.0);
        assert_eq!(brush.last_dab_position(), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_exact_multiple_of_spacing() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();

        brush.start_stroke(Vec2::new(0.0, 0.0), &mut dabs).unwrap();
        let placed = brush.continue_stroke(Vec2::new(0.0, 20.0), &mut dabs).unwrap();

        assert_eq!(placed, 4);
        assert_positions(&dabs, &[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (0.0, 15.0), (0.0, 20.0)]);
        assert!(brush.leftover_distance().abs() < 0.001);
    }

    #[test]
    fn test_leftover_carries_over() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();

        brush.start_stroke(Vec2::new(0.0, 0.0), &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(0.0, 23.0), &mut dabs).unwrap();
        assert_positions(&dabs, &[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (0.0, 15.0), (0.0, 20.0)]);
        assert!((brush.leftover_distance() - 3.0).abs() < 0.001);
        assert_eq!(brush.last_dab_position(), Some(Vec2::new(0.0, 20.0)));

        let placed = brush.continue_stroke(Vec2::new(0.0, 25.0), &mut dabs).unwrap();
        assert_eq!(placed, 1);
        assert_positions(&dabs[5..], &[(0.0, 25.0)]);
        assert!(brush.leftover_distance().abs() < 0.001);
    }

    #[test]
    fn test_dab_count_is_floor_of_distance() {
        for (distance, spacing) in [(37.0_f32, 4.0_f32), (9.9, 3.3), (100.0, 7.0), (2.0, 5.0)] {
            let settings = fixed_settings(spacing);
            let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
            let mut dabs = Vec::new();
            brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();

            let placed = brush.continue_stroke(Vec2::new(distance, 0.0), &mut dabs).unwrap();

            let expected = ((distance + SPACING_EPSILON) / spacing).floor() as usize;
            assert_eq!(placed, expected, "distance {distance}, spacing {spacing}");
            let leftover = distance - expected as f32 * spacing;
            assert!((brush.leftover_distance() - leftover.max(0.0)).abs() < 0.01);
        }
    }

    #[test]
    fn test_small_moves_accumulate() {
        let settings = fixed_settings(10.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();

        for x in 1..=9 {
            assert_eq!(brush.continue_stroke(Vec2::new(x as f32, 0.0), &mut dabs).unwrap(), 0);
        }
        assert_eq!(brush.continue_stroke(Vec2::new(10.0, 0.0), &mut dabs).unwrap(), 1);
        assert_positions(&dabs, &[(0.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_distance_follows_the_path_around_corners() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();

        brush.continue_stroke(Vec2::new(3.0, 0.0), &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(3.0, 4.0), &mut dabs).unwrap();

        // 3 along x plus 2 along y reaches one spacing unit
        assert_positions(&dabs, &[(0.0, 0.0), (3.0, 2.0)]);
        assert!((brush.leftover_distance() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_length_segment_places_nothing() {
        let settings = fixed_settings(1.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::new(4.0, 4.0), &mut dabs).unwrap();

        assert_eq!(brush.continue_stroke(Vec2::new(4.0, 4.0), &mut dabs).unwrap(), 0);
        assert_eq!(dabs.len(), 1);
        assert_eq!(brush.leftover_distance(), 0.0);
    }

    #[test]
    fn test_angle_follows_each_segment() {
        let settings = DabsBrushSettings::new(AngleSettings::ANGLE_AWARE, SpacingStrategy::fixed(5.0));
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();

        brush.start_stroke(Vec2::new(0.0, 0.0), &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(10.0, 0.0), &mut dabs).unwrap();
        let first_segment: Vec<f32> = dabs[1..].iter().map(|d| d.angle).collect();

        brush.continue_stroke(Vec2::new(10.0, 10.0), &mut dabs).unwrap();

        assert_eq!(first_segment.len(), 2);
        for angle in &first_segment {
            assert!(angle.abs() < 1e-5);
        }
        // Dabs from the first segment are untouched
        for (old, now) in first_segment.iter().zip(&dabs[1..3]) {
            assert_eq!(*old, now.angle);
        }
        assert_eq!(dabs.len(), 5);
        for dab in &dabs[3..] {
            assert!((dab.angle - FRAC_PI_2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spacing_change_applies_to_next_dab() {
        let settings = fixed_settings(10.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(4.0, 0.0), &mut dabs).unwrap();
        assert_eq!(dabs.len(), 1);

        settings.change_spacing(SpacingStrategy::fixed(2.0));
        brush.continue_stroke(Vec2::new(8.0, 0.0), &mut dabs).unwrap();

        // 4px were already travelled, which exceeds the new 2px spacing: the
        // first dab lands right away, then every 2px
        assert_positions(&dabs, &[(0.0, 0.0), (4.0, 0.0), (6.0, 0.0), (8.0, 0.0)]);
    }

    #[test]
    fn test_long_segment_small_spacing_does_not_drift() {
        let settings = fixed_settings(0.1);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();

        let placed = brush.continue_stroke(Vec2::new(1500.05, 0.0), &mut dabs).unwrap();

        assert_eq!(placed, 15000);
        assert!((dabs[dabs.len() - 1].position.x - 1500.0).abs() < 1e-3);
        assert!((brush.leftover_distance() - 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_long_segment_last_dab_position() {
        let settings = fixed_settings(0.3);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();

        let placed = brush.continue_stroke(Vec2::new(3000.1, 0.0), &mut dabs).unwrap();

        assert_eq!(placed, 10000);
        assert!((dabs[dabs.len() - 1].position.x - 3000.0).abs() < 1e-3);
        assert!((dabs[dabs.len() - 2].position.x - 2999.7).abs() < 1e-3);
        assert!((brush.leftover_distance() - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_angle_change_applies_to_next_dab() {
        let settings = DabsBrushSettings::new(AngleSettings::NOT_ANGLE_AWARE, SpacingStrategy::fixed(5.0));
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(0.0, 10.0), &mut dabs).unwrap();
        assert_eq!(dabs.len(), 3);

        settings.change_angle_settings(AngleSettings::ANGLE_AWARE);
        assert!(settings.is_angle_aware());
        brush.continue_stroke(Vec2::new(0.0, 20.0), &mut dabs).unwrap();

        assert_eq!(dabs.len(), 5);
        for dab in &dabs[..3] {
            assert_eq!(dab.angle, 0.0);
        }
        for dab in &dabs[3..] {
            assert!((dab.angle - FRAC_PI_2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fixed_angle_change_applies_to_next_dab() {
        let settings = DabsBrushSettings::new(AngleSettings::fixed(0.5), SpacingStrategy::fixed(5.0));
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(5.0, 0.0), &mut dabs).unwrap();

        settings.change_angle_settings(AngleSettings::fixed(1.25));
        brush.continue_stroke(Vec2::new(10.0, 0.0), &mut dabs).unwrap();

        let angles: Vec<f32> = dabs.iter().map(|d| d.angle).collect();
        assert_eq!(angles.len(), 3);
        assert!((angles[0] - 0.5).abs() < 1e-6);
        assert!((angles[1] - 0.5).abs() < 1e-6);
        assert!((angles[2] - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_settings_shared_between_mirrors() {
        let settings = fixed_settings(5.0);
        let mut left = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut right = DabsBrush::with_seed(&settings, 10.0, 2).unwrap();
        let mut left_dabs = Vec::new();
        let mut right_dabs = Vec::new();

        left.start_stroke(Vec2::ZERO, &mut left_dabs).unwrap();
        right.start_stroke(Vec2::ZERO, &mut right_dabs).unwrap();

        settings.change_spacing(SpacingStrategy::fixed(1.0));
        left.continue_stroke(Vec2::new(3.0, 0.0), &mut left_dabs).unwrap();
        right.continue_stroke(Vec2::new(-3.0, 0.0), &mut right_dabs).unwrap();

        assert_eq!(left_dabs.len(), 4);
        assert_eq!(right_dabs.len(), 4);
    }

    #[test]
    fn test_logic_errors_leave_state_untouched() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();

        assert_eq!(
            brush.continue_stroke(Vec2::ONE, &mut dabs),
            Err(BrushError::StrokeNotActive)
        );
        assert_eq!(brush.end_stroke(), Err(BrushError::StrokeNotActive));
        assert!(dabs.is_empty());

        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        assert_eq!(
            brush.start_stroke(Vec2::ONE, &mut dabs),
            Err(BrushError::StrokeAlreadyActive)
        );
        assert_eq!(dabs.len(), 1);
        assert_eq!(brush.last_dab_position(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_end_stroke_places_no_dab() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(7.0, 0.0), &mut dabs).unwrap();
        brush.end_stroke().unwrap();

        assert_eq!(dabs.len(), 2);
        assert!(!brush.is_stroke_active());
        assert_eq!(brush.leftover_distance(), 0.0);

        // A new stroke starts with a fresh first dab
        brush.start_stroke(Vec2::new(50.0, 50.0), &mut dabs).unwrap();
        assert_positions(&dabs[2..], &[(50.0, 50.0)]);
    }

    #[test]
    fn test_invalid_diameter() {
        let settings = fixed_settings(5.0);
        assert_eq!(
            DabsBrush::new(&settings, 0.0).unwrap_err(),
            BrushError::InvalidDiameter(0.0)
        );
        assert!(DabsBrush::new(&settings, f32::NAN).is_err());
        assert_eq!(settings.registered_count(), 0);

        let mut brush = DabsBrush::new(&settings, 3.0).unwrap();
        assert!(brush.set_diameter(-1.0).is_err());
        assert_eq!(brush.diameter(), 3.0);
    }

    #[test]
    fn test_drop_unregisters() {
        let settings = fixed_settings(5.0);
        let brush = DabsBrush::new(&settings, 10.0).unwrap();
        let id = brush.id();
        assert!(settings.is_registered(id));

        drop(brush);
        assert!(!settings.is_registered(id));
        assert_eq!(settings.registered_count(), 0);
    }

    #[test]
    fn test_proportional_spacing_uses_diameter() {
        let settings = DabsBrushSettings::new(AngleSettings::default(), SpacingStrategy::proportional(0.5));
        let mut brush = DabsBrush::with_seed(&settings, 20.0, 1).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(50.0, 0.0), &mut dabs).unwrap();
        assert_eq!(dabs.len(), 6);

        brush.set_diameter(4.0).unwrap();
        brush.continue_stroke(Vec2::new(60.0, 0.0), &mut dabs).unwrap();
        assert_eq!(dabs.len(), 11);
        assert!(dabs.iter().skip(6).all(|d| d.diameter == 4.0));
    }

    #[test]
    fn test_jittered_spacing_within_bounds() {
        let settings = DabsBrushSettings::new(AngleSettings::default(), SpacingStrategy::jittered(5.0, 1.0));
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 42).unwrap();
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        brush.continue_stroke(Vec2::new(200.0, 0.0), &mut dabs).unwrap();

        for pair in dabs.windows(2) {
            let gap = pair[1].position.x - pair[0].position.x;
            assert!((4.0 - 0.001..=6.0 + 0.001).contains(&gap), "gap {gap}");
        }
    }

    #[test]
    fn test_erase_mode_is_carried() {
        let settings = fixed_settings(5.0);
        let mut brush = DabsBrush::with_seed(&settings, 10.0, 1).unwrap();
        brush.set_blend_mode(BlendMode::Erase);
        let mut dabs = Vec::new();
        brush.start_stroke(Vec2::ZERO, &mut dabs).unwrap();
        assert_eq!(dabs[0].mode, BlendMode::Erase);
    }
}
