//! Theme application onto grid visuals.
//!
//! [`GridAppearance`] holds one color property per [`PaletteRole`].
//! Applying a palette copies every role the palette defines and keeps the
//! previous color for roles it lacks. Applying the same palette twice
//! changes nothing the second time.

use gridkit_core::Property;
use gridkit_core::logging::targets;
use gridkit_style::{Color, ColorPalette, PaletteRole};

use crate::editor::EditorColors;

const ROLE_COUNT: usize = PaletteRole::ALL.len();

/// Summary of one palette application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeReport {
    /// Roles whose color changed.
    pub changed: Vec<PaletteRole>,
    /// Roles the palette did not define; their previous color was kept.
    pub missing: Vec<PaletteRole>,
}

impl ThemeReport {
    /// Whether no color changed.
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }

    /// Whether an editor color changed.
    pub fn touches_editor(&self) -> bool {
        self.changed.iter().any(|role| role.is_editor_role())
    }
}

/// Resolved colors for painting one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellColors {
    pub background: Color,
    pub text: Color,
}

/// The themed colors of one grid.
#[derive(Debug, Clone)]
pub struct GridAppearance {
    colors: [Property<Color>; ROLE_COUNT],
}

impl Default for GridAppearance {
    fn default() -> Self {
        Self::from_palette(&ColorPalette::light())
    }
}

impl GridAppearance {
    /// Initialize from a palette without reporting. Roles the palette lacks
    /// take the light palette's color.
    pub fn from_palette(palette: &ColorPalette) -> Self {
        let fallback = ColorPalette::light();
        Self {
            colors: std::array::from_fn(|i| {
                let role = PaletteRole::ALL[i];
                let color = palette
                    .get(role)
                    .or_else(|| fallback.get(role))
                    .unwrap_or(Color::GRAY);
                Property::new(color)
            }),
        }
    }

    /// Copy every recognized role from `palette`.
    ///
    /// Each missing role is logged once per call.
    pub fn apply(&self, palette: &ColorPalette) -> ThemeReport {
        let mut report = ThemeReport::default();
        for role in PaletteRole::ALL {
            match palette.get(role) {
                Some(color) => {
                    if self.property(role).set(color) {
                        report.changed.push(role);
                    }
                }
                None => {
                    tracing::warn!(
                        target: targets::THEME,
                        role = role.as_str(),
                        "palette has no color for role, keeping previous"
                    );
                    report.missing.push(role);
                }
            }
        }
        report
    }

    /// The property backing a role.
    pub fn property(&self, role: PaletteRole) -> &Property<Color> {
        &self.colors[role as usize]
    }

    pub fn color(&self, role: PaletteRole) -> Color {
        self.property(role).get()
    }

    /// Colors pushed onto embedded editors.
    pub fn editor_colors(&self) -> EditorColors {
        EditorColors {
            background: self.color(PaletteRole::EditorBackground),
            text: self.color(PaletteRole::EditorText),
            border: self.color(PaletteRole::EditorBorder),
        }
    }

    /// Colors of an item cell in the given state. Selection wins over hover.
    pub fn cell_colors(&self, selected: bool, hovered: bool) -> CellColors {
        if selected {
            CellColors {
                background: self.color(PaletteRole::ItemSelected),
                text: self.color(PaletteRole::ItemSelectedText),
            }
        } else {
            CellColors {
                background: self.color(if hovered {
                    PaletteRole::ItemHover
                } else {
                    PaletteRole::ItemBackground
                }),
                text: self.color(PaletteRole::ItemText),
            }
        }
    }

    /// Colors of a column header.
    pub fn header_colors(&self, hovered: bool) -> CellColors {
        CellColors {
            background: self.color(if hovered {
                PaletteRole::ColumnHeaderHover
            } else {
                PaletteRole::ColumnHeader
            }),
            text: self.color(PaletteRole::ColumnHeaderText),
        }
    }
}
