//! Actions that only make sense while a selection exists.
//!
//! They are enabled and disabled together whenever the selection appears or
//! goes away.

use dabble_painting::TraceReport;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::composition::Composition;
use crate::error::EditorError;
use crate::tool::{ToolKind, Tools};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionAction {
    Crop,
    Deselect,
    InvertSelection,
    TraceWithBrush,
    TraceWithEraser,
}

impl SelectionAction {
    pub const ALL: [Self; 5] = [
        Self::Crop,
        Self::Deselect,
        Self::InvertSelection,
        Self::TraceWithBrush,
        Self::TraceWithEraser,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Self::Crop => "Crop",
            Self::Deselect => "Deselect",
            Self::InvertSelection => "Invert Selection",
            Self::TraceWithBrush => "Stroke with Current Brush",
            Self::TraceWithEraser => "Stroke with Current Eraser",
        }
    }

    /// The tool a trace action paints with
    pub fn trace_tool(self) -> Option<ToolKind> {
        match self {
            Self::TraceWithBrush => Some(ToolKind::Brush),
            Self::TraceWithEraser => Some(ToolKind::Eraser),
            _ => None,
        }
    }
}

/// Result of a performed selection action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Traced(TraceReport),
}

/// Enabled state shared by all selection actions
#[derive(Debug, Default)]
pub struct SelectionActions {
    enabled: bool,
    strict: bool,
}

impl SelectionActions {
    /// Starts disabled. `strict` turns enabled/selection disagreements into errors.
    pub fn new(strict: bool) -> Self {
        Self { enabled: false, strict }
    }

    /// Enable or disable every selection action.
    ///
    /// In strict mode `enabled` must match `comp.has_selection()` when a
    /// composition is given; on a mismatch nothing changes.
    pub fn set_enabled(&mut self, enabled: bool, comp: Option<&dyn Composition>) -> Result<(), EditorError> {
        if let Some(comp) = comp.filter(|_| self.strict) {
            let has_selection = comp.has_selection();
            if has_selection != enabled {
                let name = comp.name().to_owned();
                error!(
                    "SelectionActions: {} has_selection = {}, enabling = {}",
                    name, has_selection, enabled
                );
                return Err(EditorError::SelectionStateMismatch {
                    name,
                    has_selection,
                    enabled,
                });
            }
        }
        if enabled != self.enabled {
            debug!("SelectionActions: enabled = {}", enabled);
        }
        self.enabled = enabled;
        Ok(())
    }

    pub fn are_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_enabled(&self, _action: SelectionAction) -> bool {
        self.enabled
    }

    pub fn perform(
        &self,
        action: SelectionAction,
        comp: &mut dyn Composition,
        tools: &mut Tools,
    ) -> Result<ActionOutcome, EditorError> {
        if !self.is_enabled(action) {
            return Err(EditorError::ActionDisabled(action.label()));
        }
        debug!("SelectionActions: {} on {}", action.label(), comp.name());

        if let Some(kind) = action.trace_tool() {
            if !comp.active_layer_is_image() {
                return Err(EditorError::NotImageLayer);
            }
            let shape = comp.selection_shape();
            let report = tools.traceable_mut(kind)?.trace(comp.paint_target(), shape.as_ref())?;
            return Ok(ActionOutcome::Traced(report));
        }

        match action {
            SelectionAction::Crop => comp.crop_to_selection(),
            SelectionAction::Deselect => comp.deselect(),
            SelectionAction::InvertSelection => comp.invert_selection(),
            SelectionAction::TraceWithBrush | SelectionAction::TraceWithEraser => {}
        }
        Ok(ActionOutcome::Done)
    }
}
