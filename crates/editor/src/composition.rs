//! The document-side view the editor needs for painting and selection work.

use dabble_painting::DabTarget;
use kurbo::BezPath;

/// An open image the editor can paint on and select in
pub trait Composition {
    fn name(&self) -> &str;

    fn has_selection(&self) -> bool;

    /// Outline of the current selection, if any
    fn selection_shape(&self) -> Option<BezPath>;

    /// Whether the active layer holds pixels that brushes can paint on
    fn active_layer_is_image(&self) -> bool;

    /// Where dabs for the active layer go
    fn paint_target(&mut self) -> &mut dyn DabTarget;

    fn deselect(&mut self);

    fn invert_selection(&mut self);

    fn crop_to_selection(&mut self);
}
