//! Integer spin editor.

use crate::geometry::Rect;

use super::surface::EditorSurface;
use super::widget::{
    EditContext, EditorColors, EditorError, EditorInput, EditorResponse, EditorWidget,
    EmbeddedEditor,
};

/// An integer field clamped to `[min, max]`.
///
/// Up/Down add or subtract one step. Typed digits edit the buffer directly.
/// The cell's text is loaded as is and read back unchanged until the user
/// edits it; an edited buffer is validated and clamped on read-back.
#[derive(Debug, Clone)]
pub struct SpinEditor {
    surface: EditorSurface,
    buffer: String,
    min: i64,
    max: i64,
    step: i64,
    edited: bool,
    loaded: bool,
}

impl SpinEditor {
    /// Create a spin editor. Bounds given in the wrong order are swapped and
    /// a non-positive step becomes 1.
    pub fn new(min: i64, max: i64, step: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            surface: EditorSurface::new(),
            buffer: String::new(),
            min,
            max,
            step: step.max(1),
            edited: false,
            loaded: false,
        }
    }

    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Whether the buffer changed since the editor was loaded.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// The parsed buffer, unclamped.
    pub fn value(&self) -> Option<i64> {
        self.buffer.trim().parse().ok()
    }

    fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    fn step_by(&mut self, delta: i64) {
        let base = self.value().unwrap_or_else(|| self.clamp(0));
        self.buffer = self.clamp(base.saturating_add(delta)).to_string();
    }

    fn push_filtered(&mut self, text: &str) {
        for c in text.chars() {
            let accepted = c.is_ascii_digit() || (c == '-' && self.buffer.is_empty());
            if accepted {
                self.buffer.push(c);
            }
        }
    }
}

impl EditorWidget for SpinEditor {
    fn text(&self) -> &str {
        &self.buffer
    }

    fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.edited = true;
    }

    fn geometry(&self) -> Rect {
        self.surface.geometry()
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.surface.set_geometry(rect);
    }

    fn is_focused(&self) -> bool {
        self.surface.is_focused()
    }

    fn set_focused(&mut self, focused: bool) {
        self.surface.set_focused(focused);
    }

    fn handle_input(&mut self, input: EditorInput) -> EditorResponse {
        match input {
            EditorInput::Up => self.step_by(self.step),
            EditorInput::Down => self.step_by(-self.step),
            EditorInput::Home => self.buffer = self.min.to_string(),
            EditorInput::End => self.buffer = self.max.to_string(),
            EditorInput::Char(c) => self.push_filtered(c.encode_utf8(&mut [0; 4])),
            EditorInput::Text(text) => self.push_filtered(&text),
            EditorInput::Backspace => {
                self.buffer.pop();
            }
            EditorInput::Enter | EditorInput::Tab => return EditorResponse::Commit,
            EditorInput::Escape => return EditorResponse::Cancel,
            EditorInput::Delete | EditorInput::Left | EditorInput::Right => {
                return EditorResponse::Ignored;
            }
        }
        self.edited = true;
        EditorResponse::Handled
    }

    fn apply_colors(&mut self, colors: &EditorColors) {
        self.surface.apply_colors(colors);
    }
}

impl EmbeddedEditor for SpinEditor {
    fn load(&mut self, ctx: &EditContext<'_>) -> bool {
        self.buffer = ctx.sub_item.text().to_string();
        self.edited = false;
        self.loaded = true;
        true
    }

    fn return_text(&self) -> Result<String, EditorError> {
        if !self.loaded {
            return Err(EditorError::NotLoaded);
        }
        if !self.edited {
            return Ok(self.buffer.clone());
        }
        self.value()
            .map(|v| self.clamp(v).to_string())
            .ok_or_else(|| EditorError::InvalidValue {
                value: self.buffer.clone(),
                reason: "not an integer".to_string(),
            })
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.edited = false;
        self.buffer.clear();
        self.surface.reset();
    }
}
