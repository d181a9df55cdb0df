/// Smallest spacing a strategy may return. Guards the dab loop against
/// non-positive spacing.
pub const MIN_SPACING: f32 = 0.01;

/// Tolerance when comparing travelled distance against spacing, so a dab that
/// lands exactly on a segment end is not lost to rounding.
pub const SPACING_EPSILON: f32 = 1e-4;

/// Segments shorter than this carry no direction and place no dabs.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-5;
