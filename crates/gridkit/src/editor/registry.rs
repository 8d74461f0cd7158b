//! Mapping from editor kinds to editor factories.

use std::collections::HashMap;
use std::fmt;

use super::choice::ChoiceEditor;
use super::kind::{EditorKey, EditorKind};
use super::spin::SpinEditor;
use super::text::TextEditor;
use super::widget::EmbeddedEditor;

/// Builds a fresh editor for one edit session.
pub type EditorFactory = Box<dyn Fn(&EditorKind) -> Box<dyn EmbeddedEditor>>;

/// Resolves an [`EditorKind`] to a newly created editor.
///
/// [`EditorRegistry::with_defaults`] knows the built-in text, choice and spin
/// editors; [`register_custom`](Self::register_custom) adds
/// [`EditorKind::Custom`] kinds, and [`register`](Self::register) replaces
/// any factory, built-in or not.
///
/// ```
/// use gridkit::editor::{EditorKind, EditorRegistry, TextEditor};
///
/// let mut registry = EditorRegistry::with_defaults();
/// registry.register_custom("notes", || Box::new(TextEditor::new().with_max_length(500)));
/// assert!(registry.create(&EditorKind::Custom("notes".into())).is_some());
/// assert!(registry.create(&EditorKind::Custom("color".into())).is_none());
/// ```
#[derive(Default)]
pub struct EditorRegistry {
    factories: HashMap<EditorKey, EditorFactory>,
}

impl EditorRegistry {
    /// Create a registry with no factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in editors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(EditorKey::Text, |_| Box::new(TextEditor::new()));
        registry.register(EditorKey::Choice, |kind| match kind {
            EditorKind::Choice(choices) => Box::new(ChoiceEditor::new(choices.clone())),
            _ => Box::new(ChoiceEditor::new(Vec::new())),
        });
        registry.register(EditorKey::Spin, |kind| match kind {
            EditorKind::Spin { min, max, step } => Box::new(SpinEditor::new(*min, *max, *step)),
            _ => Box::new(SpinEditor::new(i64::MIN, i64::MAX, 1)),
        });
        registry
    }

    /// Register or replace the factory for a key.
    pub fn register<F>(&mut self, key: EditorKey, factory: F)
    where
        F: Fn(&EditorKind) -> Box<dyn EmbeddedEditor> + 'static,
    {
        self.factories.insert(key, Box::new(factory));
    }

    /// Register a factory for `EditorKind::Custom(name)`.
    pub fn register_custom<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn EmbeddedEditor> + 'static,
    {
        self.register(EditorKey::Custom(name.into()), move |_| factory());
    }

    /// Remove a factory, returning whether one was registered.
    pub fn unregister(&mut self, key: &EditorKey) -> bool {
        self.factories.remove(key).is_some()
    }

    pub fn contains(&self, kind: &EditorKind) -> bool {
        self.factories.contains_key(&kind.key())
    }

    /// Create an editor for `kind`, or `None` when no factory is registered.
    pub fn create(&self, kind: &EditorKind) -> Option<Box<dyn EmbeddedEditor>> {
        self.factories.get(&kind.key()).map(|factory| factory(kind))
    }
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
