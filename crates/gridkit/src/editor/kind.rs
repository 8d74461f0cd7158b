//! Editor kinds declared by columns and sub-items.

/// Which editor a cell uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Single-line free text.
    Text,
    /// Pick one of a fixed list of values.
    Choice(Vec<String>),
    /// Integer in `[min, max]`, adjusted in `step` increments.
    Spin { min: i64, max: i64, step: i64 },
    /// A user editor registered with
    /// [`EditorRegistry::register_custom`](super::EditorRegistry::register_custom).
    Custom(String),
}

impl EditorKind {
    /// Shorthand for a choice editor over string-like values.
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice(choices.into_iter().map(Into::into).collect())
    }

    /// The registry key this kind resolves through.
    pub fn key(&self) -> EditorKey {
        match self {
            Self::Text => EditorKey::Text,
            Self::Choice(_) => EditorKey::Choice,
            Self::Spin { .. } => EditorKey::Spin,
            Self::Custom(name) => EditorKey::Custom(name.clone()),
        }
    }
}

/// Registry key of an [`EditorKind`], without the kind's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorKey {
    Text,
    Choice,
    Spin,
    Custom(String),
}
