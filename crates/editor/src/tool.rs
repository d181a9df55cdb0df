//! Brush and eraser tools
//!
//! A [`BrushTool`] owns the shared [`DabsBrushSettings`] for its kind and
//! builds a fresh [`SymmetryBrush`] for each stroke or trace. [`Tools`] holds
//! the tool set plus the active tool tag; callers pass it around explicitly.

use dabble_config::BrushConfig;
use dabble_painting::{
    AngleSettings, BlendMode, BrushError, CountingTarget, DabTarget, DabsBrushSettings, SpacingStrategy, Stroker,
    Symmetry, SymmetryBrush, TraceOptions, TraceReport,
};
use glam::Vec2;
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::EditorError;

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Hand,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Hand => "Hand",
        }
    }

    pub fn is_brush(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

/// Tools that can paint along a shape outline
pub trait Traceable {
    /// Paint along `shape`; `None` means there is nothing to trace
    fn trace(&mut self, target: &mut dyn DabTarget, shape: Option<&BezPath>) -> Result<TraceReport, EditorError>;
}

/// A dab-based painting tool (brush or eraser)
#[derive(Debug)]
pub struct BrushTool {
    kind: ToolKind,
    mode: BlendMode,
    settings: DabsBrushSettings,
    diameter: f32,
    symmetry: Symmetry,
    symmetry_center: Vec2,
    config: BrushConfig,
    stroke: Option<SymmetryBrush>,
    // Space held: the canvas pans instead of painting
    suspended: bool,
}

impl BrushTool {
    pub fn brush(config: &BrushConfig) -> Self {
        Self::new(ToolKind::Brush, BlendMode::Normal, config)
    }

    pub fn eraser(config: &BrushConfig) -> Self {
        Self::new(ToolKind::Eraser, BlendMode::Erase, config)
    }

    fn new(kind: ToolKind, mode: BlendMode, config: &BrushConfig) -> Self {
        let settings =
            DabsBrushSettings::with_max_brushes(AngleSettings::default(), SpacingStrategy::default(), config.max_mirrors);
        Self {
            kind,
            mode,
            settings,
            diameter: config.clamp_diameter(config.default_diameter),
            symmetry: Symmetry::None,
            symmetry_center: Vec2::ZERO,
            config: config.clone(),
            stroke: None,
            suspended: false,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.mode
    }

    /// Spacing and angle policies for this tool; changes reach live strokes
    pub fn settings(&self) -> &DabsBrushSettings {
        &self.settings
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Set the diameter, clamped to the configured range. Returns the value used.
    pub fn set_diameter(&mut self, diameter: f32) -> Result<f32, EditorError> {
        if !diameter.is_finite() {
            return Err(BrushError::InvalidDiameter(diameter).into());
        }
        let diameter = self.config.clamp_diameter(diameter);
        if let Some(stroke) = &mut self.stroke {
            stroke.set_diameter(diameter)?;
        }
        if diameter != self.diameter {
            debug!("{}: diameter {:.1} -> {:.1}", self.kind.name(), self.diameter, diameter);
        }
        self.diameter = diameter;
        Ok(diameter)
    }

    pub fn increase_size(&mut self) -> f32 {
        self.step_size(self.config.size_step)
    }

    pub fn decrease_size(&mut self) -> f32 {
        self.step_size(-self.config.size_step)
    }

    fn step_size(&mut self, delta: f32) -> f32 {
        let current = self.diameter;
        // The clamped value is always a valid diameter
        self.set_diameter(current + delta).unwrap_or(current)
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn symmetry_center(&self) -> Vec2 {
        self.symmetry_center
    }

    /// Change the symmetry used by the next stroke. Ends any active stroke.
    pub fn set_symmetry(&mut self, symmetry: Symmetry, center: Vec2) -> Result<(), EditorError> {
        let limit = self.settings.max_brushes();
        if symmetry.brush_count() > limit {
            warn!("{}: {:?} needs more than {} mirrors", self.kind.name(), symmetry, limit);
            return Err(BrushError::TooManyBrushes { limit }.into());
        }
        self.cancel_stroke();
        self.symmetry = symmetry;
        self.symmetry_center = center;
        Ok(())
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.as_ref().is_some_and(|s| s.is_stroke_active())
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn new_group(&self) -> Result<SymmetryBrush, BrushError> {
        SymmetryBrush::new(
            &self.settings,
            self.symmetry,
            self.symmetry_center,
            self.diameter,
            self.mode,
            self.config.jitter_seed,
        )
    }

    /// Start a stroke at `point`. Returns the number of dabs placed.
    pub fn pointer_pressed(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        if self.suspended {
            return Ok(0);
        }
        // A press without a matching release (e.g. released outside the window)
        self.cancel_stroke();

        let mut group = self.new_group()?;
        let mut counter = CountingTarget::new(target);
        group.start_stroke(point, &mut counter)?;
        let placed = counter.count();
        self.stroke = Some(group);
        Ok(placed)
    }

    /// Extend the active stroke; drags without a stroke are ignored
    pub fn pointer_dragged(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        if self.suspended {
            return Ok(0);
        }
        match &mut self.stroke {
            Some(stroke) if stroke.is_stroke_active() => Ok(stroke.continue_stroke(point, target)?),
            _ => Ok(0),
        }
    }

    /// Paint up to `point` and end the stroke
    pub fn pointer_released(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        let placed = self.pointer_dragged(point, target)?;
        self.cancel_stroke();
        Ok(placed)
    }

    /// End the active stroke, keeping what was painted
    pub fn cancel_stroke(&mut self) {
        if let Some(mut stroke) = self.stroke.take() {
            if stroke.is_stroke_active() {
                let _ = stroke.end_stroke();
            }
        }
    }

    pub fn space_pressed(&mut self) {
        self.cancel_stroke();
        self.suspended = true;
    }

    pub fn space_released(&mut self) {
        self.suspended = false;
    }
}

impl Traceable for BrushTool {
    fn trace(&mut self, target: &mut dyn DabTarget, shape: Option<&BezPath>) -> Result<TraceReport, EditorError> {
        self.cancel_stroke();
        let mut group = self.new_group()?;
        let report = dabble_painting::trace(&mut group, target, shape, &TraceOptions::from(&self.config))?;
        info!("{}: traced {} dabs", self.kind.name(), report.dabs);
        Ok(report)
    }
}

/// The tool set and which one is active
#[derive(Debug)]
pub struct Tools {
    brush: BrushTool,
    eraser: BrushTool,
    active: ToolKind,
    space_down: bool,
}

impl Tools {
    pub fn new(config: &BrushConfig) -> Self {
        Self {
            brush: BrushTool::brush(config),
            eraser: BrushTool::eraser(config),
            active: ToolKind::Brush,
            space_down: false,
        }
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    /// Switch tools, ending any stroke of the previous one
    pub fn set_active(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        if let Some(tool) = self.active_brush_tool_mut() {
            tool.cancel_stroke();
            tool.space_released();
        }
        debug!("Tools: {} -> {}", self.active.name(), kind.name());
        self.active = kind;
        // Space held across the switch keeps suspending the new tool
        if self.space_down {
            if let Some(tool) = self.active_brush_tool_mut() {
                tool.space_pressed();
            }
        }
    }

    pub fn brush(&self) -> &BrushTool {
        &self.brush
    }

    pub fn eraser(&self) -> &BrushTool {
        &self.eraser
    }

    pub fn brush_tool(&self, kind: ToolKind) -> Option<&BrushTool> {
        match kind {
            ToolKind::Brush => Some(&self.brush),
            ToolKind::Eraser => Some(&self.eraser),
            ToolKind::Hand => None,
        }
    }

    pub fn brush_tool_mut(&mut self, kind: ToolKind) -> Option<&mut BrushTool> {
        match kind {
            ToolKind::Brush => Some(&mut self.brush),
            ToolKind::Eraser => Some(&mut self.eraser),
            ToolKind::Hand => None,
        }
    }

    pub fn active_brush_tool_mut(&mut self) -> Option<&mut BrushTool> {
        self.brush_tool_mut(self.active)
    }

    /// The trace capability of `kind`
    pub fn traceable_mut(&mut self, kind: ToolKind) -> Result<&mut dyn Traceable, EditorError> {
        match self.brush_tool_mut(kind) {
            Some(tool) => Ok(tool),
            None => Err(EditorError::NotABrushTool(kind)),
        }
    }

    /// Grow the active brush; returns the new diameter, `None` for non-brush tools
    pub fn increase_active_brush_size(&mut self) -> Option<f32> {
        self.active_brush_tool_mut().map(BrushTool::increase_size)
    }

    pub fn decrease_active_brush_size(&mut self) -> Option<f32> {
        self.active_brush_tool_mut().map(BrushTool::decrease_size)
    }

    /// Space goes to the active tool only
    pub fn space_pressed(&mut self) {
        self.space_down = true;
        if let Some(tool) = self.active_brush_tool_mut() {
            tool.space_pressed();
        }
    }

    pub fn space_released(&mut self) {
        self.space_down = false;
        if let Some(tool) = self.active_brush_tool_mut() {
            tool.space_released();
        }
    }

    pub fn pointer_pressed(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        match self.active_brush_tool_mut() {
            Some(tool) => tool.pointer_pressed(point, target),
            None => Ok(0),
        }
    }

    pub fn pointer_dragged(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        match self.active_brush_tool_mut() {
            Some(tool) => tool.pointer_dragged(point, target),
            None => Ok(0),
        }
    }

    pub fn pointer_released(&mut self, point: Vec2, target: &mut dyn DabTarget) -> Result<usize, EditorError> {
        match self.active_brush_tool_mut() {
            Some(tool) => tool.pointer_released(point, target),
            None => Ok(0),
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(tool) = self.active_brush_tool_mut() {
            tool.cancel_stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dabble_painting::DabPlacement;

    fn config() -> BrushConfig {
        BrushConfig {
            default_diameter: 20.0,
            jitter_seed: Some(7),
            ..Default::default()
        }
    }

    fn tools() -> Tools {
        let tools = Tools::new(&config());
        tools.brush().settings().change_spacing(SpacingStrategy::fixed(5.0));
        tools.eraser().settings().change_spacing(SpacingStrategy::fixed(5.0));
        tools
    }

    #[test]
    fn test_tool_kinds() {
        assert!(ToolKind::Brush.is_brush());
        assert!(ToolKind::Eraser.is_brush());
        assert!(!ToolKind::Hand.is_brush());
        assert_eq!(BrushTool::eraser(&config()).blend_mode(), BlendMode::Erase);
    }

    #[test]
    fn test_size_steps_and_clamps() {
        let config = BrushConfig {
            default_diameter: 4.0,
            min_diameter: 1.0,
            max_diameter: 8.0,
            size_step: 3.0,
            ..Default::default()
        };
        let mut tool = BrushTool::brush(&config);

        assert_eq!(tool.increase_size(), 7.0);
        assert_eq!(tool.increase_size(), 8.0);
        assert_eq!(tool.decrease_size(), 5.0);
        tool.decrease_size();
        assert_eq!(tool.decrease_size(), 1.0);
        assert!(tool.set_diameter(f32::NAN).is_err());
        assert_eq!(tool.diameter(), 1.0);
    }

    #[test]
    fn test_pointer_stroke() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();

        assert_eq!(tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap(), 1);
        assert!(tools.brush().is_painting());
        assert_eq!(tools.pointer_dragged(Vec2::new(10.0, 0.0), &mut dabs).unwrap(), 2);
        assert_eq!(tools.pointer_released(Vec2::new(15.0, 0.0), &mut dabs).unwrap(), 1);

        assert!(!tools.brush().is_painting());
        assert_eq!(dabs.len(), 4);
        assert!(dabs.iter().all(|d| d.mode == BlendMode::Normal && d.diameter == 20.0));
        // Stroke brushes are dropped after release
        assert_eq!(tools.brush().settings().registered_count(), 0);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        assert_eq!(tools.pointer_dragged(Vec2::ONE, &mut dabs).unwrap(), 0);
        assert!(dabs.is_empty());
    }

    #[test]
    fn test_eraser_stamps_erase_dabs() {
        let mut tools = tools();
        tools.set_active(ToolKind::Eraser);
        let mut dabs: Vec<DabPlacement> = Vec::new();

        tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap();
        tools.pointer_released(Vec2::new(5.0, 0.0), &mut dabs).unwrap();

        assert_eq!(dabs.len(), 2);
        assert!(dabs.iter().all(|d| d.mode == BlendMode::Erase));
    }

    #[test]
    fn test_hand_tool_ignores_pointer_and_size_keys() {
        let mut tools = tools();
        tools.set_active(ToolKind::Hand);
        let mut dabs: Vec<DabPlacement> = Vec::new();

        assert_eq!(tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap(), 0);
        assert_eq!(tools.increase_active_brush_size(), None);
        assert!(dabs.is_empty());
        assert!(matches!(
            tools.traceable_mut(ToolKind::Hand),
            Err(EditorError::NotABrushTool(ToolKind::Hand))
        ));
    }

    #[test]
    fn test_space_ends_stroke_and_suspends_painting() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap();

        tools.space_pressed();
        assert!(!tools.brush().is_painting());
        assert_eq!(tools.pointer_dragged(Vec2::new(50.0, 0.0), &mut dabs).unwrap(), 0);
        assert_eq!(tools.pointer_pressed(Vec2::new(50.0, 0.0), &mut dabs).unwrap(), 0);
        assert_eq!(dabs.len(), 1);

        tools.space_released();
        assert_eq!(tools.pointer_pressed(Vec2::new(50.0, 0.0), &mut dabs).unwrap(), 1);
    }

    #[test]
    fn test_space_only_reaches_active_tool() {
        let mut tools = tools();
        tools.space_pressed();

        assert!(tools.brush().is_suspended());
        assert!(!tools.eraser().is_suspended());

        tools.space_released();
        assert!(!tools.brush().is_suspended());
    }

    #[test]
    fn test_space_held_across_tool_switch() {
        let mut tools = tools();
        tools.space_pressed();

        tools.set_active(ToolKind::Eraser);
        assert!(!tools.brush().is_suspended());
        assert!(tools.eraser().is_suspended());

        tools.space_released();
        assert!(!tools.eraser().is_suspended());
    }

    #[test]
    fn test_switching_tools_ends_stroke() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap();

        tools.set_active(ToolKind::Eraser);

        assert!(!tools.brush().is_painting());
        assert_eq!(tools.brush().settings().registered_count(), 0);
    }

    #[test]
    fn test_symmetric_stroke() {
        let mut tools = tools();
        let brush = tools.brush_tool_mut(ToolKind::Brush).unwrap();
        brush.set_symmetry(Symmetry::VerticalMirror, Vec2::new(100.0, 0.0)).unwrap();
        let mut dabs: Vec<DabPlacement> = Vec::new();

        assert_eq!(tools.pointer_pressed(Vec2::new(110.0, 0.0), &mut dabs).unwrap(), 2);
        assert_eq!(tools.brush().settings().registered_count(), 2);
        tools.pointer_released(Vec2::new(120.0, 0.0), &mut dabs).unwrap();

        assert_eq!(dabs.len(), 6);
        assert!(dabs.iter().any(|d| (d.position.x - 80.0).abs() < 1e-3));
    }

    #[test]
    fn test_symmetry_over_mirror_limit() {
        let config = BrushConfig {
            max_mirrors: 2,
            ..Default::default()
        };
        let mut tool = BrushTool::brush(&config);
        let result = tool.set_symmetry(Symmetry::Rotate4, Vec2::ZERO);
        assert_eq!(result, Err(EditorError::Brush(BrushError::TooManyBrushes { limit: 2 })));
        assert_eq!(tool.symmetry(), Symmetry::None);
    }

    #[test]
    fn test_resize_during_stroke() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        tools.pointer_pressed(Vec2::ZERO, &mut dabs).unwrap();

        let size = tools.increase_active_brush_size().unwrap();
        tools.pointer_dragged(Vec2::new(5.0, 0.0), &mut dabs).unwrap();

        assert_eq!(size, 22.0);
        assert_eq!(dabs[1].diameter, 22.0);
    }

    #[test]
    fn test_trace_rect() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        let shape = kurbo::Shape::to_path(&kurbo::Rect::new(0.0, 0.0, 40.0, 20.0), 0.1);

        let report = tools.traceable_mut(ToolKind::Brush).unwrap().trace(&mut dabs, Some(&shape)).unwrap();

        assert_eq!(report.dabs, 25);
        assert_eq!(dabs.len(), 25);
        assert_eq!(tools.brush().settings().registered_count(), 0);
    }

    #[test]
    fn test_trace_without_shape() {
        let mut tools = tools();
        let mut dabs: Vec<DabPlacement> = Vec::new();
        let report = tools.traceable_mut(ToolKind::Eraser).unwrap().trace(&mut dabs, None).unwrap();
        assert_eq!(report, TraceReport::default());
    }
}
