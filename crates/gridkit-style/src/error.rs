//! Error types for the styling system.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the styling system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A color string could not be parsed.
    #[error("Invalid color '{value}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { value: String },

    /// A role name is empty or contains whitespace.
    #[error("Invalid palette role name '{name}'")]
    InvalidRoleName { name: String },
}

impl Error {
    /// Create a color parse error.
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }

    /// Create a role name error.
    pub fn invalid_role_name(name: impl Into<String>) -> Self {
        Self::InvalidRoleName { name: name.into() }
    }
}
