//! Flattened shape outlines and uniform arc-length sampling.

use glam::Vec2;
use kurbo::{PathEl, Shape};

use crate::constants::MIN_SEGMENT_LENGTH;

/// One connected polyline of an outline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    points: Vec<Vec2>,
    closed: bool,
}

impl Subpath {
    pub fn new(points: Vec<Vec2>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether the subpath loops back to its first point
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 1 => Some((*last, *first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// Total arc length, including the closing edge
    pub fn length(&self) -> f32 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    /// Points spaced `step` apart along the subpath.
    ///
    /// Starts at the first point and always finishes at the end of the path:
    /// the last point for open subpaths, the first point again for closed ones.
    /// Degenerate subpaths yield nothing.
    pub fn samples(&self, step: f32) -> Vec<Vec2> {
        if self.points.len() < 2 || self.length() < MIN_SEGMENT_LENGTH {
            return Vec::new();
        }
        let step = step.max(MIN_SEGMENT_LENGTH);

        let mut samples = vec![self.points[0]];
        let mut end = self.points[0];
        let mut next = step;
        for (from, to) in self.edges() {
            end = to;
            let length = from.distance(to);
            if length < MIN_SEGMENT_LENGTH {
                continue;
            }
            let tangent = (to - from) / length;

            let mut along = 0.0;
            while length - along >= next {
                along += next;
                samples.push(from + tangent * along);
                next = step;
            }
            next -= length - along;
        }

        let last = samples[samples.len() - 1];
        if last.distance(end) > MIN_SEGMENT_LENGTH {
            samples.push(end);
        } else if let Some(tail) = samples.last_mut() {
            // Snap away the rounding drift so the stroke ends exactly on the path end
            *tail = end;
        }
        samples
    }
}

/// A planar outline made of flattened subpaths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    subpaths: Vec<Subpath>,
}

impl Outline {
    pub fn new(subpaths: Vec<Subpath>) -> Self {
        Self { subpaths }
    }

    /// Flatten any kurbo shape into polylines within `tolerance`
    pub fn from_shape<S: Shape>(shape: &S, tolerance: f64) -> Self {
        let mut builder = OutlineBuilder::default();
        kurbo::flatten(shape.path_elements(tolerance), tolerance, |el| builder.push(el));
        builder.finish()
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// True when nothing in the outline can be traced
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.length() < MIN_SEGMENT_LENGTH)
    }

    pub fn length(&self) -> f32 {
        self.subpaths.iter().map(Subpath::length).sum()
    }
}

#[derive(Default)]
struct OutlineBuilder {
    subpaths: Vec<Subpath>,
    current: Vec<Vec2>,
    /// Last MoveTo point; drawing after a ClosePath restarts from here
    start: Option<Vec2>,
}

impl OutlineBuilder {
    fn push(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                self.flush(false);
                let p = to_vec2(p);
                self.start = Some(p);
                self.current.push(p);
            }
            PathEl::LineTo(p) => {
                self.resume();
                let p = to_vec2(p);
                if self.current.last().is_none_or(|last| last.distance(p) >= MIN_SEGMENT_LENGTH) {
                    self.current.push(p);
                }
            }
            PathEl::ClosePath => self.flush(true),
            // flatten() only emits lines; keep curve end points if one slips through
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                self.resume();
                self.current.push(to_vec2(p));
            }
        }
    }

    fn resume(&mut self) {
        if let Some(start) = self.start.filter(|_| self.current.is_empty()) {
            self.current.push(start);
        }
    }

    fn flush(&mut self, closed: bool) {
        let mut points = std::mem::take(&mut self.current);
        if closed && points.len() > 2 {
            // The closing edge is implicit
            if points[0].distance(points[points.len() - 1]) < MIN_SEGMENT_LENGTH {
                points.pop();
            }
        }
        if points.len() >= 2 {
            self.subpaths.push(Subpath::new(points, closed));
        }
    }

    fn finish(mut self) -> Outline {
        self.flush(false);
        Outline::new(self.subpaths)
    }
}

fn to_vec2(p: kurbo::Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}
