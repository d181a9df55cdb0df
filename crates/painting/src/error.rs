use thiserror::Error;

/// Errors raised by the dab engine.
///
/// All variants are caller logic errors; the engine state is left untouched
/// when one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BrushError {
    #[error("No stroke in progress - call start_stroke() first")]
    StrokeNotActive,
    #[error("Stroke already in progress - call end_stroke() first")]
    StrokeAlreadyActive,
    #[error("Invalid brush diameter: {0}")]
    InvalidDiameter(f32),
    #[error("Too many brushes share these settings (limit is {limit})")]
    TooManyBrushes { limit: usize },
}
