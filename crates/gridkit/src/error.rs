//! Error types for grid operations.

use std::fmt;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// The kind of named entity a [`GridError::DuplicateName`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Column,
    Item,
    SubItem,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Column => "column",
            Self::Item => "item",
            Self::SubItem => "sub-item",
        })
    }
}

/// Errors returned by grid operations.
///
/// Structural inconsistencies (an item whose sub-item count differs from the
/// column count) are never reported here; they are corrected on the
/// operation that would have introduced them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A column index was outside `0..count` (or `0..=count` for inserts).
    #[error("column index {index} out of range (column count {count})")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    /// An item index was outside `0..count` (or `0..=count` for inserts).
    #[error("item index {index} out of range (item count {count})")]
    ItemIndexOutOfRange { index: usize, count: usize },

    /// A display position was outside `0..count`.
    #[error("display position {index} out of range (column count {count})")]
    DisplayIndexOutOfRange { index: usize, count: usize },

    /// An explicit name collides with a sibling in the same collection.
    #[error("{kind} name '{name}' is already in use")]
    DuplicateName { kind: EntityKind, name: String },

    /// The sub-item is bound to an active editor and only the editor may
    /// write it.
    #[error("sub-item at item {item}, column {column} is being edited")]
    SubItemLocked { item: usize, column: usize },
}

impl GridError {
    pub(crate) fn duplicate(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}
