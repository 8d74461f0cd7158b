//! Color palette definitions.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::{Error, Result};

use super::PaletteRole;

/// A mapping from role names to colors.
///
/// Lookups by [`PaletteRole`] return `None` when the palette does not define
/// that role; consumers keep their previous color in that case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPalette {
    colors: HashMap<String, Color>,
}

impl ColorPalette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a recognized role.
    pub fn get(&self, role: PaletteRole) -> Option<Color> {
        self.colors.get(role.as_str()).copied()
    }

    /// Look up any role by name.
    pub fn get_named(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Whether the palette defines a recognized role.
    pub fn contains(&self, role: PaletteRole) -> bool {
        self.colors.contains_key(role.as_str())
    }

    /// Set a recognized role.
    pub fn set(&mut self, role: PaletteRole, color: Color) {
        self.colors.insert(role.as_str().to_string(), color);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, role: PaletteRole, color: Color) -> Self {
        self.set(role, color);
        self
    }

    /// Set a role by name, including names no control recognizes yet.
    pub fn set_named(&mut self, name: &str, color: Color) -> Result<()> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::invalid_role_name(name));
        }
        self.colors.insert(name.to_string(), color);
        Ok(())
    }

    /// Set a role by name from a `#RRGGBB` / `#RRGGBBAA` string.
    pub fn set_hex(&mut self, name: &str, hex: &str) -> Result<()> {
        let color = hex.parse::<Color>()?;
        self.set_named(name, color)
    }

    /// Remove a recognized role, returning its color.
    pub fn remove(&mut self, role: PaletteRole) -> Option<Color> {
        self.colors.remove(role.as_str())
    }

    /// Builder form of [`remove`](Self::remove).
    pub fn without(mut self, role: PaletteRole) -> Self {
        self.remove(role);
        self
    }

    /// Number of defined roles (recognized or not).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette defines no roles.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over `(name, color)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(name, color)| (name.as_str(), *color))
    }

    /// Create a light theme palette.
    pub fn light() -> Self {
        Self::from_hex_table(&[
            (PaletteRole::ColumnHeader, "#F0F0F0"),
            (PaletteRole::ColumnHeaderText, "#212529"),
            (PaletteRole::ColumnHeaderHover, "#DCDCDC"),
            (PaletteRole::ItemBackground, "#FFFFFF"),
            (PaletteRole::ItemText, "#212529"),
            (PaletteRole::ItemHover, "#E9ECEF"),
            (PaletteRole::ItemSelected, "#007AFF"),
            (PaletteRole::ItemSelectedText, "#FFFFFF"),
            (PaletteRole::BorderNormal, "#DEE2E6"),
            (PaletteRole::BorderHover, "#ADB5BD"),
            (PaletteRole::GridLine, "#DCDCDC"),
            (PaletteRole::SortIndicator, "#6C757D"),
            (PaletteRole::EditorBackground, "#F8F9FA"),
            (PaletteRole::EditorText, "#212529"),
            (PaletteRole::EditorBorder, "#007AFF"),
        ])
    }

    /// Create a dark theme palette.
    pub fn dark() -> Self {
        Self::from_hex_table(&[
            (PaletteRole::ColumnHeader, "#2C2C2E"),
            (PaletteRole::ColumnHeaderText, "#FFFFFF"),
            (PaletteRole::ColumnHeaderHover, "#3A3A3C"),
            (PaletteRole::ItemBackground, "#1C1C1E"),
            (PaletteRole::ItemText, "#FFFFFF"),
            (PaletteRole::ItemHover, "#3A3A3C"),
            (PaletteRole::ItemSelected, "#0A84FF"),
            (PaletteRole::ItemSelectedText, "#FFFFFF"),
            (PaletteRole::BorderNormal, "#38383A"),
            (PaletteRole::BorderHover, "#545456"),
            (PaletteRole::GridLine, "#48484A"),
            (PaletteRole::SortIndicator, "#8E8E93"),
            (PaletteRole::EditorBackground, "#2C2C2E"),
            (PaletteRole::EditorText, "#FFFFFF"),
            (PaletteRole::EditorBorder, "#0A84FF"),
        ])
    }

    /// Create a high-contrast palette.
    pub fn high_contrast() -> Self {
        Self::from_hex_table(&[
            (PaletteRole::ColumnHeader, "#000000"),
            (PaletteRole::ColumnHeaderText, "#FFFFFF"),
            (PaletteRole::ColumnHeaderHover, "#333333"),
            (PaletteRole::ItemBackground, "#FFFFFF"),
            (PaletteRole::ItemText, "#000000"),
            (PaletteRole::ItemHover, "#F0F0F0"),
            (PaletteRole::ItemSelected, "#0000FF"),
            (PaletteRole::ItemSelectedText, "#FFFFFF"),
            (PaletteRole::BorderNormal, "#000000"),
            (PaletteRole::BorderHover, "#0000CC"),
            (PaletteRole::GridLine, "#000000"),
            (PaletteRole::SortIndicator, "#000000"),
            (PaletteRole::EditorBackground, "#FFFFFF"),
            (PaletteRole::EditorText, "#000000"),
            (PaletteRole::EditorBorder, "#0000FF"),
        ])
    }

    // Built-in tables are constants; a malformed entry is skipped with a log.
    fn from_hex_table(table: &[(PaletteRole, &str)]) -> Self {
        let mut palette = Self::new();
        for (role, hex) in table {
            match Color::from_hex(hex) {
                Some(color) => palette.set(*role, color),
                None => tracing::error!(
                    target: "gridkit_style::theme",
                    role = role.as_str(),
                    hex = *hex,
                    "invalid built-in palette entry"
                ),
            }
        }
        palette
    }
}
