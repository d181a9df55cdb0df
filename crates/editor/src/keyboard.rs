//! Global keyboard handling: shortcuts, Tab for show/hide all, Space for panning.

use std::collections::HashMap;

use dabble_config::InputConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{KeyStroke, KeyboardEvent};
use crate::selection_actions::SelectionAction;
use crate::tool::{ToolKind, Tools};

/// Action key of the brush size increase shortcut
pub const INCREASE_BRUSH_SIZE: &str = "increase_brush_size";
/// Action key of the brush size decrease shortcut
pub const DECREASE_BRUSH_SIZE: &str = "decrease_brush_size";

/// Something a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorAction {
    IncreaseBrushSize,
    DecreaseBrushSize,
    /// Toggle all panels and toolbars
    ShowHideAll,
    SelectTool(ToolKind),
    Selection(SelectionAction),
}

/// Maps key presses to actions and tracks Space
#[derive(Debug)]
pub struct KeyboardWatch {
    char_bindings: HashMap<char, String>,
    stroke_bindings: HashMap<KeyStroke, String>,
    actions: HashMap<String, EditorAction>,
    space_down: bool,
    show_hide_all_for_tab: bool,
}

impl KeyboardWatch {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            char_bindings: HashMap::new(),
            stroke_bindings: HashMap::new(),
            actions: HashMap::new(),
            space_down: false,
            show_hide_all_for_tab: config.show_hide_all_for_tab,
        }
    }

    /// Bind a typed character. Case-insensitive bindings also get the
    /// character's other case.
    pub fn add_char_shortcut(&mut self, c: char, case_insensitive: bool, action_key: &str, action: EditorAction) {
        self.char_bindings.insert(c, action_key.to_owned());
        if case_insensitive {
            for other in [single_char(c.to_lowercase()), single_char(c.to_uppercase())].into_iter().flatten() {
                self.char_bindings.insert(other, action_key.to_owned());
            }
        }
        self.actions.insert(action_key.to_owned(), action);
    }

    /// Bind an exact key and modifier combination
    pub fn add_shortcut(&mut self, stroke: KeyStroke, action_key: &str, action: EditorAction) {
        self.stroke_bindings.insert(stroke, action_key.to_owned());
        self.actions.insert(action_key.to_owned(), action);
    }

    /// Bind the brush size keys from `config`. Case-sensitive.
    pub fn register_brush_size_actions(&mut self, config: &InputConfig) {
        self.add_char_shortcut(
            config.increase_size_key,
            false,
            INCREASE_BRUSH_SIZE,
            EditorAction::IncreaseBrushSize,
        );
        self.add_char_shortcut(
            config.decrease_size_key,
            false,
            DECREASE_BRUSH_SIZE,
            EditorAction::DecreaseBrushSize,
        );
    }

    /// The action bound to `event`, if any
    pub fn action_for(&self, event: &KeyboardEvent) -> Option<EditorAction> {
        let key = self.stroke_bindings.get(&KeyStroke::from_event(event)).or_else(|| {
            if event.modifiers.has_command() {
                return None;
            }
            event.typed_char().and_then(|c| self.char_bindings.get(&c))
        })?;
        self.actions.get(key).copied()
    }

    /// Handle a key press.
    ///
    /// Tool-level actions (brush size, tool selection) are applied to `tools`
    /// here; every triggered action is returned so the caller can run the
    /// ones that need more context.
    pub fn key_pressed(&mut self, event: &KeyboardEvent, tools: &mut Tools) -> Option<EditorAction> {
        if event.is_tab() {
            return self.show_hide_all_for_tab.then_some(EditorAction::ShowHideAll);
        }
        if event.is_space() {
            // Auto-repeat sends more presses while the key is held
            if !self.space_down {
                self.space_down = true;
                tools.space_pressed();
            }
            return None;
        }

        let action = self.action_for(event)?;
        debug!("KeyboardWatch: {:?} -> {:?}", event.key, action);
        match action {
            EditorAction::IncreaseBrushSize => {
                tools.increase_active_brush_size();
            }
            EditorAction::DecreaseBrushSize => {
                tools.decrease_active_brush_size();
            }
            EditorAction::SelectTool(kind) => tools.set_active(kind),
            EditorAction::ShowHideAll | EditorAction::Selection(_) => {}
        }
        Some(action)
    }

    pub fn key_released(&mut self, event: &KeyboardEvent, tools: &mut Tools) {
        if event.is_space() && self.space_down {
            self.space_down = false;
            tools.space_released();
        }
    }

    pub fn is_space_down(&self) -> bool {
        self.space_down
    }

    /// Dialogs use Tab for focus traversal, so they turn this off while open
    pub fn set_show_hide_all_for_tab(&mut self, enabled: bool) {
        self.show_hide_all_for_tab = enabled;
    }

    pub fn show_hide_all_for_tab(&self) -> bool {
        self.show_hide_all_for_tab
    }
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
