//! Colors, palettes and themes for gridkit.
//!
//! A [`Theme`] is an immutable snapshot holding a [`ColorPalette`], which maps
//! named visual roles ([`PaletteRole`]) to [`Color`]s. Controls read themes,
//! never write them; switching themes means handing controls a new
//! `Arc<Theme>`.
//!
//! # Example
//!
//! ```
//! use gridkit_style::prelude::*;
//!
//! let palette =
//!     ColorPalette::light().with(PaletteRole::ItemHover, Color::from_rgb8(255, 240, 200));
//! let theme = Theme::custom("Warm", ThemeMode::Light, palette);
//! assert_eq!(theme.palette().get(PaletteRole::ItemHover), Some(Color::from_rgb8(255, 240, 200)));
//! ```

pub mod color;
pub mod theme;

mod error;

pub use color::Color;
pub use error::{Error, Result};
pub use theme::{ColorPalette, PaletteRole, Theme, ThemeMode, UnknownRole};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::theme::{ColorPalette, PaletteRole, Theme, ThemeMode};
}
