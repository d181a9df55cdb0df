//! The editor context: owns the tools, keyboard watch and selection actions
//! and routes input events to them.

use dabble_config::EditorConfig;
use glam::Vec2;
use tracing::{debug, trace};

use crate::composition::Composition;
use crate::error::EditorError;
use crate::input::{KeyboardEvent, PointerEvent};
use crate::keyboard::{EditorAction, KeyboardWatch};
use crate::selection_actions::{ActionOutcome, SelectionAction, SelectionActions};
use crate::tool::Tools;

#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    tools: Tools,
    keyboard: KeyboardWatch,
    selection_actions: SelectionActions,
    ui_hidden: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let mut keyboard = KeyboardWatch::new(&config.input);
        keyboard.register_brush_size_actions(&config.input);
        Self {
            tools: Tools::new(&config.brush),
            keyboard,
            selection_actions: SelectionActions::new(config.strict_selection_checks),
            ui_hidden: false,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut Tools {
        &mut self.tools
    }

    pub fn keyboard(&self) -> &KeyboardWatch {
        &self.keyboard
    }

    /// For registering extra shortcuts
    pub fn keyboard_mut(&mut self) -> &mut KeyboardWatch {
        &mut self.keyboard
    }

    pub fn selection_actions(&self) -> &SelectionActions {
        &self.selection_actions
    }

    /// Whether "show/hide all" has hidden the panels
    pub fn is_ui_hidden(&self) -> bool {
        self.ui_hidden
    }

    /// Route a pointer event to the active tool. Returns the dabs placed.
    pub fn handle_pointer(&mut self, event: PointerEvent, comp: &mut dyn Composition) -> Result<usize, EditorError> {
        if self.config.input.debug_pointer_events {
            trace!("pointer: {:?} on {} ({:?})", event, comp.name(), self.tools.active_kind());
        }
        match event {
            PointerEvent::Down { x, y } => self.tools.pointer_pressed(Vec2::new(x, y), comp.paint_target()),
            PointerEvent::Move { x, y } => self.tools.pointer_dragged(Vec2::new(x, y), comp.paint_target()),
            PointerEvent::Up { x, y } => self.tools.pointer_released(Vec2::new(x, y), comp.paint_target()),
            PointerEvent::Leave => {
                self.tools.pointer_left();
                Ok(0)
            }
        }
    }

    /// Route a key event.
    ///
    /// Selection shortcuts need `comp`; without one they are reported but not
    /// performed.
    pub fn handle_key(
        &mut self,
        event: &KeyboardEvent,
        comp: Option<&mut dyn Composition>,
    ) -> Result<Option<EditorAction>, EditorError> {
        if !event.pressed {
            self.keyboard.key_released(event, &mut self.tools);
            return Ok(None);
        }

        let action = self.keyboard.key_pressed(event, &mut self.tools);
        match action {
            Some(EditorAction::ShowHideAll) => {
                self.ui_hidden = !self.ui_hidden;
                debug!("Editor: ui hidden = {}", self.ui_hidden);
            }
            Some(EditorAction::Selection(selection)) => {
                if let Some(comp) = comp {
                    self.perform_selection_action(selection, comp)?;
                }
            }
            _ => {}
        }
        Ok(action)
    }

    /// Re-sync the selection actions after the selection changed
    pub fn selection_changed(&mut self, comp: &dyn Composition) -> Result<(), EditorError> {
        self.selection_actions.set_enabled(comp.has_selection(), Some(comp))
    }

    pub fn perform_selection_action(
        &mut self,
        action: SelectionAction,
        comp: &mut dyn Composition,
    ) -> Result<ActionOutcome, EditorError> {
        let outcome = self.selection_actions.perform(action, comp, &mut self.tools)?;
        if !comp.has_selection() && self.selection_actions.are_enabled() {
            self.selection_changed(comp)?;
        }
        Ok(outcome)
    }

    /// Dialogs take Tab for focus traversal while open
    pub fn set_dialog_open(&mut self, open: bool) {
        self.keyboard
            .set_show_hide_all_for_tab(!open && self.config.input.show_hide_all_for_tab);
    }
}
