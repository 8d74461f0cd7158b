//! Single-line text editor.

use unicode_segmentation::UnicodeSegmentation;

use crate::geometry::Rect;

use super::surface::EditorSurface;
use super::widget::{
    EditContext, EditorColors, EditorError, EditorInput, EditorResponse, EditorWidget,
    EmbeddedEditor,
};

/// A single-line text field with a grapheme-aware cursor.
///
/// Loads with the cell's text and the cursor at the end. Enter and Tab
/// commit, Escape cancels.
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    surface: EditorSurface,
    text: String,
    /// Byte offset, always on a grapheme boundary.
    cursor_pos: usize,
    max_length: Option<usize>,
    loaded: bool,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the text to `max` characters.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Cursor position as a byte offset into [`text`](EditorWidget::text).
    pub fn cursor_position(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn text_length(&self) -> usize {
        self.text.chars().count()
    }

    fn insert_text(&mut self, text: &str) {
        let allowed = match self.max_length {
            Some(max) => max.saturating_sub(self.text_length()),
            None => usize::MAX,
        };
        let inserted: String = text
            .chars()
            .filter(|c| !c.is_control())
            .take(allowed)
            .collect();
        if inserted.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor_pos, &inserted);
        self.cursor_pos += inserted.len();
    }

    fn delete_char_before(&mut self) {
        if self.cursor_pos > 0 {
            let prev_pos = self.prev_grapheme_boundary(self.cursor_pos);
            self.text.replace_range(prev_pos..self.cursor_pos, "");
            self.cursor_pos = prev_pos;
        }
    }

    fn delete_char_after(&mut self) {
        if self.cursor_pos < self.text.len() {
            let next_pos = self.next_grapheme_boundary(self.cursor_pos);
            self.text.replace_range(self.cursor_pos..next_pos, "");
        }
    }

    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|offset| *offset < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .find(|end| *end > pos)
            .unwrap_or(self.text.len())
    }
}

impl EditorWidget for TextEditor {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = match self.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        self.cursor_pos = self.text.len();
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
            EditorInput::Char(c) => self.insert_text(c.encode_utf8(&mut [0; 4])),
            EditorInput::Text(text) => self.insert_text(&text),
            EditorInput::Backspace => self.delete_char_before(),
            EditorInput::Delete => self.delete_char_after(),
            EditorInput::Left => self.cursor_pos = self.prev_grapheme_boundary(self.cursor_pos),
            EditorInput::Right => self.cursor_pos = self.next_grapheme_boundary(self.cursor_pos),
            EditorInput::Home => self.cursor_pos = 0,
            EditorInput::End => self.cursor_pos = self.text.len(),
            EditorInput::Enter | EditorInput::Tab => return EditorResponse::Commit,
            EditorInput::Escape => return EditorResponse::Cancel,
            EditorInput::Up | EditorInput::Down => return EditorResponse::Ignored,
        }
        EditorResponse::Handled
    }

    fn apply_colors(&mut self, colors: &EditorColors) {
        self.surface.apply_colors(colors);
    }
}

impl EmbeddedEditor for TextEditor {
    fn load(&mut self, ctx: &EditContext<'_>) -> bool {
        self.set_text(ctx.sub_item.text());
        self.loaded = true;
        true
    }

    fn return_text(&self) -> Result<String, EditorError> {
        if !self.loaded {
            return Err(EditorError::NotLoaded);
        }
        Ok(self.text.clone())
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.text.clear();
        self.cursor_pos = 0;
        self.surface.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut TextEditor, text: &str) {
        for c in text.chars() {
            assert_eq!(editor.handle_input(EditorInput::Char(c)), EditorResponse::Handled);
        }
    }

    #[test]
    fn test_typing_and_cursor_movement() {
        let mut editor = TextEditor::new();
        type_str(&mut editor, "helo");
        editor.handle_input(EditorInput::Left);
        type_str(&mut editor, "l");
        assert_eq!(editor.text(), "hello");
        editor.handle_input(EditorInput::Home);
        editor.handle_input(EditorInput::Delete);
        assert_eq!(editor.text(), "ello");
        editor.handle_input(EditorInput::End);
        editor.handle_input(EditorInput::Backspace);
        assert_eq!(editor.text(), "ell");
        assert_eq!(editor.cursor_position(), 3);
    }

    #[test]
    fn test_grapheme_aware_deletion() {
        let mut editor = TextEditor::new();
        editor.set_text("ae\u{301}");
        editor.handle_input(EditorInput::Backspace);
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_max_length() {
        let mut editor = TextEditor::new().with_max_length(3);
        editor.handle_input(EditorInput::Text("abcdef".into()));
        assert_eq!(editor.text(), "abc");
        editor.set_text("wxyz");
        assert_eq!(editor.text(), "wxy");
    }

    #[test]
    fn test_control_keys() {
        let mut editor = TextEditor::new();
        assert_eq!(editor.handle_input(EditorInput::Enter), EditorResponse::Commit);
        assert_eq!(editor.handle_input(EditorInput::Tab), EditorResponse::Commit);
        assert_eq!(editor.handle_input(EditorInput::Escape), EditorResponse::Cancel);
        assert_eq!(editor.handle_input(EditorInput::Up), EditorResponse::Ignored);
        editor.handle_input(EditorInput::Char('\n'));
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_return_text_requires_load() {
        let editor = TextEditor::new();
        assert_eq!(editor.return_text(), Err(EditorError::NotLoaded));
    }
}
