use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Blend modes for stamped dabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Erase = 1,
}

/// A single dab emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DabPlacement {
    /// Center in surface coordinates
    pub position: Vec2,
    /// Rotation in radians, always within [0, 2π)
    pub angle: f32,
    /// Brush diameter in pixels
    pub diameter: f32,
    /// How the dab combines with existing pixels
    pub mode: BlendMode,
}

/// Receiver of emitted dabs (the compositing collaborator).
///
/// The engine calls `stamp_dab` once per dab, in stroke order.
pub trait DabTarget {
    fn stamp_dab(&mut self, dab: &DabPlacement);
}

/// Recording target, mostly useful for previews and tests
impl DabTarget for Vec<DabPlacement> {
    fn stamp_dab(&mut self, dab: &DabPlacement) {
        self.push(*dab);
    }
}

impl<T: DabTarget + ?Sized> DabTarget for &mut T {
    fn stamp_dab(&mut self, dab: &DabPlacement) {
        (**self).stamp_dab(dab);
    }
}

/// Wraps a target and counts the dabs passing through it
pub struct CountingTarget<'a> {
    inner: &'a mut dyn DabTarget,
    count: usize,
}

impl<'a> CountingTarget<'a> {
    pub fn new(inner: &'a mut dyn DabTarget) -> Self {
        Self { inner, count: 0 }
    }

    /// Number of dabs stamped so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl DabTarget for CountingTarget<'_> {
    fn stamp_dab(&mut self, dab: &DabPlacement) {
        self.count += 1;
        self.inner.stamp_dab(dab);
    }
}
