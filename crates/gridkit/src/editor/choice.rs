//! Drop-down choice editor.

use crate::geometry::Rect;

use super::surface::EditorSurface;
use super::widget::{
    EditContext, EditorColors, EditorError, EditorInput, EditorResponse, EditorWidget,
    EmbeddedEditor,
};

/// Picks one value from a fixed list.
///
/// Up/Down step through the list, Home/End jump to its ends and a typed
/// character selects the next choice starting with it. A cell whose text is
/// not one of the choices loads with nothing selected and keeps its text
/// until the user picks something. Loading fails when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct ChoiceEditor {
    surface: EditorSurface,
    choices: Vec<String>,
    selected: Option<usize>,
    /// Shown while nothing is selected.
    unmatched: String,
    loaded: bool,
}

impl ChoiceEditor {
    pub fn new(choices: Vec<String>) -> Self {
        Self {
            choices,
            ..Self::default()
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select a choice by index; out-of-range indices are ignored.
    pub fn set_selected_index(&mut self, index: usize) {
        if index < self.choices.len() {
            self.selected = Some(index);
        }
    }

    fn step(&mut self, forward: bool) {
        let last = self.choices.len().saturating_sub(1);
        let next = match (self.selected, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.set_selected_index(next);
    }

    fn select_by_initial(&mut self, c: char) {
        let count = self.choices.len();
        let start = self.selected.map_or(0, |i| i + 1);
        let needle: String = c.to_lowercase().collect();
        let found = (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&i| self.choices[i].to_lowercase().starts_with(&needle));
        if let Some(index) = found {
            self.selected = Some(index);
        }
    }
}

impl EditorWidget for ChoiceEditor {
    fn text(&self) -> &str {
        match self.selected.and_then(|i| self.choices.get(i)) {
            Some(choice) => choice,
            None => &self.unmatched,
        }
    }

    fn set_text(&mut self, text: &str) {
        self.selected = self.choices.iter().position(|c| c == text);
        self.unmatched = match self.selected {
            Some(_) => String::new(),
            None => text.to_string(),
        };
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
        if self.choices.is_empty() {
            return match input {
                EditorInput::Escape => EditorResponse::Cancel,
                _ => EditorResponse::Ignored,
            };
        }
        match input {
            EditorInput::Up | EditorInput::Left => self.step(false),
            EditorInput::Down | EditorInput::Right => self.step(true),
            EditorInput::Home => self.selected = Some(0),
            EditorInput::End => self.selected = Some(self.choices.len() - 1),
            EditorInput::Char(c) if !c.is_control() => self.select_by_initial(c),
            EditorInput::Enter | EditorInput::Tab => return EditorResponse::Commit,
            EditorInput::Escape => return EditorResponse::Cancel,
            _ => return EditorResponse::Ignored,
        }
        EditorResponse::Handled
    }

    fn apply_colors(&mut self, colors: &EditorColors) {
        self.surface.apply_colors(colors);
    }
}

impl EmbeddedEditor for ChoiceEditor {
    fn load(&mut self, ctx: &EditContext<'_>) -> bool {
        if self.choices.is_empty() {
            return false;
        }
        self.set_text(ctx.sub_item.text());
        self.loaded = true;
        true
    }

    fn return_text(&self) -> Result<String, EditorError> {
        if !self.loaded {
            return Err(EditorError::NotLoaded);
        }
        Ok(self.text().to_string())
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.selected = None;
        self.unmatched.clear();
        self.surface.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> ChoiceEditor {
        ChoiceEditor::new(vec!["Small".into(), "Medium".into(), "Large".into()])
    }

    #[test]
    fn test_stepping_is_clamped() {
        let mut editor = sizes();
        editor.set_text("Medium");
        assert_eq!(editor.selected_index(), Some(1));
        editor.handle_input(EditorInput::Down);
        editor.handle_input(EditorInput::Down);
        assert_eq!(editor.text(), "Large");
        editor.handle_input(EditorInput::Home);
        editor.handle_input(EditorInput::Up);
        assert_eq!(editor.text(), "Small");
    }

    #[test]
    fn test_unmatched_text_is_kept() {
        let mut editor = sizes();
        editor.set_text("Huge");
        assert_eq!(editor.selected_index(), None);
        assert_eq!(editor.text(), "Huge");
        editor.handle_input(EditorInput::Down);
        assert_eq!(editor.text(), "Small");
    }

    #[test]
    fn test_select_by_initial_wraps() {
        let mut editor = ChoiceEditor::new(vec!["Apple".into(), "Banana".into(), "avocado".into()]);
        editor.handle_input(EditorInput::Char('a'));
        assert_eq!(editor.text(), "Apple");
        editor.handle_input(EditorInput::Char('A'));
        assert_eq!(editor.text(), "avocado");
        editor.handle_input(EditorInput::Char('a'));
        assert_eq!(editor.text(), "Apple");
    }

    #[test]
    fn test_empty_list_ignores_navigation() {
        let mut editor = ChoiceEditor::new(Vec::new());
        assert_eq!(editor.handle_input(EditorInput::Down), EditorResponse::Ignored);
        assert_eq!(editor.handle_input(EditorInput::Escape), EditorResponse::Cancel);
    }
}
