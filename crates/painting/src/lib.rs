//! Dabble painting engine - dab placement
//!
//! This crate turns pointer paths and shape outlines into evenly spaced,
//! oriented brush dabs:
//! - [`spacing::SpacingStrategy`] - distance between consecutive dabs
//! - [`angle::AngleSettings`] - rotation of each dab
//! - [`settings::DabsBrushSettings`] - policies shared by all mirrors of a brush
//! - [`brush::DabsBrush`] - per-instance stroke tracking and dab emission
//! - [`symmetry`] - mirrored brush groups
//! - [`outline`] / [`trace`] - painting along shape outlines
//!
//! Pixel compositing is left to whatever implements [`types::DabTarget`].

pub mod angle;
pub mod brush;
pub mod constants;
pub mod error;
pub mod outline;
pub mod settings;
pub mod spacing;
pub mod symmetry;
pub mod trace;
pub mod types;

pub use angle::*;
pub use brush::*;
pub use constants::*;
pub use error::*;
pub use outline::*;
pub use settings::*;
pub use spacing::*;
pub use symmetry::*;
pub use trace::*;
pub use types::*;
