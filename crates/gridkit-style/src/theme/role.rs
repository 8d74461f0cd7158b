//! Named visual roles recognized by gridkit controls.

use std::fmt;
use std::str::FromStr;

/// A named visual role that a palette maps to a color.
///
/// Palettes are keyed by role *name*, so a palette may carry names that this
/// enum does not know about (newer palette versions are supersets). Controls
/// only ever look up the roles listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteRole {
    ColumnHeader,
    ColumnHeaderText,
    ColumnHeaderHover,
    ItemBackground,
    ItemText,
    ItemHover,
    ItemSelected,
    ItemSelectedText,
    BorderNormal,
    BorderHover,
    GridLine,
    SortIndicator,
    EditorBackground,
    EditorText,
    EditorBorder,
}

impl PaletteRole {
    /// Every recognized role, in declaration order.
    pub const ALL: [PaletteRole; 15] = [
        Self::ColumnHeader,
        Self::ColumnHeaderText,
        Self::ColumnHeaderHover,
        Self::ItemBackground,
        Self::ItemText,
        Self::ItemHover,
        Self::ItemSelected,
        Self::ItemSelectedText,
        Self::BorderNormal,
        Self::BorderHover,
        Self::GridLine,
        Self::SortIndicator,
        Self::EditorBackground,
        Self::EditorText,
        Self::EditorBorder,
    ];

    /// The role's palette key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColumnHeader => "ColumnHeader",
            Self::ColumnHeaderText => "ColumnHeaderText",
            Self::ColumnHeaderHover => "ColumnHeaderHover",
            Self::ItemBackground => "ItemBackground",
            Self::ItemText => "ItemText",
            Self::ItemHover => "ItemHover",
            Self::ItemSelected => "ItemSelected",
            Self::ItemSelectedText => "ItemSelectedText",
            Self::BorderNormal => "BorderNormal",
            Self::BorderHover => "BorderHover",
            Self::GridLine => "GridLine",
            Self::SortIndicator => "SortIndicator",
            Self::EditorBackground => "EditorBackground",
            Self::EditorText => "EditorText",
            Self::EditorBorder => "EditorBorder",
        }
    }

    /// Whether this role styles an embedded editor rather than the grid.
    pub const fn is_editor_role(self) -> bool {
        matches!(
            self,
            Self::EditorBackground | Self::EditorText | Self::EditorBorder
        )
    }
}

impl fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no recognized role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown palette role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for PaletteRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
