//! Brush settings shared between the symmetry instances of one brush.
//!
//! A [`DabsBrushSettings`] is a cheap handle: cloning it yields another handle
//! to the same settings. Every mutation bumps a generation counter; each
//! [`DabsBrush`](crate::brush::DabsBrush) caches the generation it last read
//! and re-reads the policies before its next dab decision when the counter has
//! moved. This gives the "next dab sees the new settings" guarantee without
//! callbacks into the brushes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use dabble_config::DEFAULT_MAX_MIRRORS;
use tracing::{debug, error};

use crate::angle::AngleSettings;
use crate::error::BrushError;
use crate::spacing::SpacingStrategy;

/// Registration handle of one brush instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrushId(u64);

impl BrushId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brush#{}", self.0)
    }
}

struct SettingsState {
    angle: AngleSettings,
    spacing: SpacingStrategy,
    generation: u64,
    brushes: Vec<BrushId>,
    max_brushes: usize,
    next_id: u64,
}

/// Spacing and angle policy of one logical brush, shared by its mirrors
#[derive(Clone)]
pub struct DabsBrushSettings {
    state: Rc<RefCell<SettingsState>>,
}

impl fmt::Debug for DabsBrushSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DabsBrushSettings")
            .field("angle", &state.angle)
            .field("spacing", &state.spacing)
            .field("generation", &state.generation)
            .field("brush_count", &state.brushes.len())
            .field("max_brushes", &state.max_brushes)
            .finish()
    }
}

impl Default for DabsBrushSettings {
    fn default() -> Self {
        Self::new(AngleSettings::default(), SpacingStrategy::default())
    }
}

impl DabsBrushSettings {
    /// Create settings accepting up to [`DEFAULT_MAX_MIRRORS`] brushes
    pub fn new(angle: AngleSettings, spacing: SpacingStrategy) -> Self {
        Self::with_max_brushes(angle, spacing, DEFAULT_MAX_MIRRORS)
    }

    /// Create settings with an explicit brush registration limit
    pub fn with_max_brushes(angle: AngleSettings, spacing: SpacingStrategy, max_brushes: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(SettingsState {
                angle,
                spacing,
                generation: 0,
                brushes: Vec::with_capacity(max_brushes),
                max_brushes,
                next_id: 0,
            })),
        }
    }

    /// Replace the spacing strategy
    pub fn change_spacing(&self, spacing: SpacingStrategy) {
        self.state.borrow_mut().spacing = spacing;
        self.notify_brushes("spacing");
    }

    /// Replace the angle settings
    pub fn change_angle_settings(&self, angle: AngleSettings) {
        self.state.borrow_mut().angle = angle;
        self.notify_brushes("angle");
    }

    fn notify_brushes(&self, what: &str) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        debug!(
            "DabsBrushSettings: {} changed, generation {} ({} brushes registered)",
            what,
            state.generation,
            state.brushes.len()
        );
    }

    pub fn is_angle_aware(&self) -> bool {
        self.state.borrow().angle.is_angle_aware()
    }

    pub fn angle_settings(&self) -> AngleSettings {
        self.state.borrow().angle
    }

    pub fn spacing_strategy(&self) -> SpacingStrategy {
        self.state.borrow().spacing
    }

    /// Counter bumped on every mutation
    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Register a new brush instance.
    ///
    /// Fails with [`BrushError::TooManyBrushes`] when the limit is reached;
    /// the registry is left unchanged in that case.
    pub fn register_brush(&self) -> Result<BrushId, BrushError> {
        let mut state = self.state.borrow_mut();
        if state.brushes.len() >= state.max_brushes {
            error!(
                "DabsBrushSettings: refusing brush registration, {} of {} slots used",
                state.brushes.len(),
                state.max_brushes
            );
            return Err(BrushError::TooManyBrushes {
                limit: state.max_brushes,
            });
        }

        let id = BrushId(state.next_id);
        state.next_id += 1;
        state.brushes.push(id);
        debug!("DabsBrushSettings: registered {} ({} total)", id, state.brushes.len());
        Ok(id)
    }

    /// Remove a brush instance. Unknown ids are ignored.
    ///
    /// Returns whether the id was registered.
    pub fn unregister_brush(&self, id: BrushId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.brushes.iter().position(|b| *b == id) else {
            return false;
        };
        state.brushes.swap_remove(index);
        debug!("DabsBrushSettings: unregistered {} ({} left)", id, state.brushes.len());
        true
    }

    pub fn is_registered(&self, id: BrushId) -> bool {
        self.state.borrow().brushes.contains(&id)
    }

    pub fn registered_count(&self) -> usize {
        self.state.borrow().brushes.len()
    }

    pub fn max_brushes(&self) -> usize {
        self.state.borrow().max_brushes
    }

    /// Whether two handles point at the same settings
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
