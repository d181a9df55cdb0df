//! Symmetric painting: several brush mirrors driven by one pointer.

use std::f32::consts::TAU;

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brush::{DabsBrush, Stroker};
use crate::error::BrushError;
use crate::settings::DabsBrushSettings;
use crate::types::{BlendMode, DabTarget};

/// How pointer input is replicated around the symmetry center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Symmetry {
    #[default]
    None,
    /// Mirror across the vertical axis through the center
    VerticalMirror,
    /// Mirror across the horizontal axis through the center
    HorizontalMirror,
    /// Both mirrors: four instances
    TwoMirrors,
    /// Point reflection through the center
    Central,
    /// Three copies rotated by 120°
    Rotate3,
    /// Four copies rotated by 90°
    Rotate4,
}

impl Symmetry {
    /// Number of brush instances this symmetry needs
    pub fn brush_count(self) -> usize {
        match self {
            Self::None => 1,
            Self::VerticalMirror | Self::HorizontalMirror | Self::Central => 2,
            Self::Rotate3 => 3,
            Self::TwoMirrors | Self::Rotate4 => 4,
        }
    }

    /// Position of `point` as seen by mirror `index`
    pub fn transform(self, index: usize, point: Vec2, center: Vec2) -> Vec2 {
        let offset = point - center;
        let mapped = match (self, index) {
            (_, 0) => offset,
            (Self::VerticalMirror, _) => Vec2::new(-offset.x, offset.y),
            (Self::HorizontalMirror, _) => Vec2::new(offset.x, -offset.y),
            (Self::TwoMirrors, 1) => Vec2::new(-offset.x, offset.y),
            (Self::TwoMirrors, 2) => Vec2::new(offset.x, -offset.y),
            (Self::TwoMirrors, _) => -offset,
            (Self::Central, _) => -offset,
            (Self::Rotate3, i) => Mat2::from_angle(TAU * i as f32 / 3.0) * offset,
            (Self::Rotate4, i) => Mat2::from_angle(TAU * i as f32 / 4.0) * offset,
            (Self::None, _) => offset,
        };
        center + mapped
    }
}

/// One brush per mirror, all sharing the same settings
#[derive(Debug)]
pub struct SymmetryBrush {
    symmetry: Symmetry,
    center: Vec2,
    brushes: Vec<DabsBrush>,
}

impl SymmetryBrush {
    /// Create the mirrors for `symmetry`, registering each on `settings`.
    ///
    /// `seed` makes jitter reproducible; each mirror gets its own stream.
    pub fn new(
        settings: &DabsBrushSettings,
        symmetry: Symmetry,
        center: Vec2,
        diameter: f32,
        mode: BlendMode,
        seed: Option<u64>,
    ) -> Result<Self, BrushError> {
        let count = symmetry.brush_count();
        let mut brushes = Vec::with_capacity(count);
        for index in 0..count {
            // Already-created mirrors unregister on drop if a later one fails
            let mut brush = match seed {
                Some(seed) => DabsBrush::with_seed(settings, diameter, seed.wrapping_add(index as u64))?,
                None => DabsBrush::new(settings, diameter)?,
            };
            brush.set_blend_mode(mode);
            brushes.push(brush);
        }
        debug!("SymmetryBrush: created {} mirrors for {:?}", count, symmetry);
        Ok(Self {
            symmetry,
            center,
            brushes,
        })
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn brushes(&self) -> &[DabsBrush] {
        &self.brushes
    }

    pub fn mirror_count(&self) -> usize {
        self.brushes.len()
    }

    /// Resize every mirror; nothing changes if the diameter is invalid
    pub fn set_diameter(&mut self, diameter: f32) -> Result<(), BrushError> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(BrushError::InvalidDiameter(diameter));
        }
        for brush in &mut self.brushes {
            brush.set_diameter(diameter)?;
        }
        Ok(())
    }
}

impl Stroker for SymmetryBrush {
    fn start_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<(), BrushError> {
        if self.is_stroke_active() {
            return Err(BrushError::StrokeAlreadyActive);
        }
        for (index, brush) in self.brushes.iter_mut().enumerate() {
            brush.start_stroke(self.symmetry.transform(index, point, self.center), target)?;
        }
        Ok(())
    }

    fn continue_stroke(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, BrushError> {
        if !self.is_stroke_active() {
            return Err(BrushError::StrokeNotActive);
        }
        let mut placed = 0;
        for (index, brush) in self.brushes.iter_mut().enumerate() {
            placed += brush.continue_stroke(self.symmetry.transform(index, point, self.center), target)?;
        }
        Ok(placed)
    }

    fn end_stroke(&mut self) -> Result<(), BrushError> {
        if !self.is_stroke_active() {
            return Err(BrushError::StrokeNotActive);
        }
        for brush in &mut self.brushes {
            brush.end_stroke()?;
        }
        Ok(())
    }

    fn is_stroke_active(&self) -> bool {
        self.brushes.iter().any(|b| b.is_stroke_active())
    }
}
