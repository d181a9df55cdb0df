//! Error types for the editor layer

use dabble_painting::BrushError;
use thiserror::Error;

use crate::tool::ToolKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Brush(#[from] BrushError),

    #[error("The active layer is not an image layer")]
    NotImageLayer,

    #[error("Action \"{0}\" is disabled")]
    ActionDisabled(&'static str),

    #[error("Composition \"{name}\": has_selection = {has_selection}, but selection actions enabled = {enabled}")]
    SelectionStateMismatch {
        name: String,
        has_selection: bool,
        enabled: bool,
    },

    #[error("{0:?} is not a brush tool")]
    NotABrushTool(ToolKind),
}

impl EditorError {
    /// Conditions the user caused and should see as a notice, not a bug report
    pub fn is_user_notice(&self) -> bool {
        matches!(self, Self::NotImageLayer)
    }
}
