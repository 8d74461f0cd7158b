//! Widget state shared by the built-in editors.

use crate::geometry::Rect;

use super::widget::EditorColors;

/// Geometry, focus and colors of an editor.
///
/// Editors embed a surface and forward the corresponding
/// [`EditorWidget`](super::EditorWidget) methods to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSurface {
    geometry: Rect,
    focused: bool,
    colors: EditorColors,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn colors(&self) -> &EditorColors {
        &self.colors
    }

    pub fn apply_colors(&mut self, colors: &EditorColors) {
        self.colors = *colors;
    }

    /// Return to the unfocused, zero-sized state, keeping colors.
    pub fn reset(&mut self) {
        self.geometry = Rect::ZERO;
        self.focused = false;
    }
}
