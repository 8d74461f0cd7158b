//! Built-in themes.

use super::ColorPalette;

/// Theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    HighContrast,
}

/// An immutable theme snapshot: a name, a mode, and a color palette.
///
/// Themes are shared as `Arc<Theme>` and never mutated after construction.
/// Switching themes means handing every control a different snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    mode: ThemeMode,
    palette: ColorPalette,
}

impl Theme {
    /// Create a light theme.
    pub fn light() -> Self {
        Self::custom("Light", ThemeMode::Light, ColorPalette::light())
    }

    /// Create a dark theme.
    pub fn dark() -> Self {
        Self::custom("Dark", ThemeMode::Dark, ColorPalette::dark())
    }

    /// Create a high-contrast theme.
    pub fn high_contrast() -> Self {
        Self::custom(
            "High Contrast",
            ThemeMode::HighContrast,
            ColorPalette::high_contrast(),
        )
    }

    /// Create a custom theme from a palette.
    pub fn custom(name: impl Into<String>, mode: ThemeMode, palette: ColorPalette) -> Self {
        Self {
            name: name.into(),
            mode,
            palette,
        }
    }

    /// The theme's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Theme mode.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Color palette.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::PaletteRole;

    #[test]
    fn test_builtin_modes() {
        assert_eq!(Theme::light().mode(), ThemeMode::Light);
        assert_eq!(Theme::dark().mode(), ThemeMode::Dark);
        assert_eq!(Theme::high_contrast().mode(), ThemeMode::HighContrast);
        assert_eq!(Theme::default(), Theme::light());
    }

    #[test]
    fn test_light_and_dark_differ() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(
            light.palette().get(PaletteRole::ItemBackground),
            dark.palette().get(PaletteRole::ItemBackground)
        );
    }
}
