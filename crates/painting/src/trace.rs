//! Trace driver: paint along a shape outline instead of pointer input.
//!
//! The outline is flattened and each subpath is walked at a small uniform
//! arc-length step. The samples are fed to a [`Stroker`] exactly like pointer
//! moves, one stroke per subpath, so spacing, angles and symmetry behave the
//! same as when painting by hand.

use dabble_config::{BrushConfig, DEFAULT_FLATTEN_TOLERANCE, DEFAULT_TRACE_STEP};
use kurbo::Shape;
use tracing::{debug, info};

use crate::brush::Stroker;
use crate::error::BrushError;
use crate::outline::Outline;
use crate::types::{CountingTarget, DabTarget};

/// Sampling parameters for tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Arc-length distance between samples; keep it below the brush spacing
    pub step: f32,
    /// Curve flattening tolerance
    pub tolerance: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_TRACE_STEP,
            tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }
}

impl From<&BrushConfig> for TraceOptions {
    fn from(config: &BrushConfig) -> Self {
        Self {
            step: config.trace_step,
            tolerance: config.flatten_tolerance,
        }
    }
}

/// What a trace produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceReport {
    /// Strokes painted (one per non-degenerate subpath)
    pub strokes: usize,
    /// Path samples fed to the brush
    pub samples: usize,
    /// Dabs stamped on the target
    pub dabs: usize,
}

/// Trace `shape` with `brush`.
///
/// A missing shape means there is nothing to trace and returns an empty
/// report. The brush must be idle.
pub fn trace<S, B>(
    brush: &mut B,
    target: &mut dyn DabTarget,
    shape: Option<&S>,
    options: &TraceOptions,
) -> Result<TraceReport, BrushError>
where
    S: Shape,
    B: Stroker + ?Sized,
{
    let Some(shape) = shape else {
        debug!("trace: no shape, nothing to do");
        return Ok(TraceReport::default());
    };
    let outline = Outline::from_shape(shape, options.tolerance);
    trace_outline(brush, target, &outline, options)
}

/// Trace an already flattened outline
pub fn trace_outline<B: Stroker + ?Sized>(
    brush: &mut B,
    target: &mut dyn DabTarget,
    outline: &Outline,
    options: &TraceOptions,
) -> Result<TraceReport, BrushError> {
    if brush.is_stroke_active() {
        return Err(BrushError::StrokeAlreadyActive);
    }

    let mut report = TraceReport::default();
    if outline.is_empty() {
        debug!("trace: outline is empty, nothing to do");
        return Ok(report);
    }

    let mut counter = CountingTarget::new(target);
    for subpath in outline.subpaths() {
        let samples = subpath.samples(options.step);
        let Some((first, rest)) = samples.split_first() else {
            continue;
        };

        brush.start_stroke(*first, &mut counter)?;
        for point in rest {
            if let Err(err) = brush.continue_stroke(*point, &mut counter) {
                let _ = brush.end_stroke();
                return Err(err);
            }
        }
        brush.end_stroke()?;

        report.strokes += 1;
        report.samples += samples.len();
    }
    report.dabs = counter.count();

    info!(
        "trace: {} strokes, {} samples, {} dabs over {:.1}px",
        report.strokes,
        report.samples,
        report.dabs,
        outline.length()
    );
    Ok(report)
}
