//! Dabble editor layer
//!
//! Connects user input to the painting engine:
//! - [`tool`] - brush and eraser tools, trace capability
//! - [`keyboard`] - global shortcuts, Tab and Space handling
//! - [`selection_actions`] - actions that need an active selection
//! - [`editor`] - the context that owns all of the above and dispatches events

pub mod composition;
pub mod editor;
pub mod error;
pub mod input;
pub mod keyboard;
pub mod selection_actions;
pub mod tool;

pub use composition::Composition;
pub use editor::Editor;
pub use error::EditorError;
pub use input::{KeyStroke, KeyboardEvent, Modifiers, PointerEvent};
pub use keyboard::{EditorAction, KeyboardWatch};
pub use selection_actions::{ActionOutcome, SelectionAction, SelectionActions};
pub use tool::{BrushTool, ToolKind, Tools, Traceable};
