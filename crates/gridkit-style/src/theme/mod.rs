//! Theme system with built-in themes.

mod builtin;
mod palette;
mod role;

pub use builtin::{Theme, ThemeMode};
pub use palette::ColorPalette;
pub use role::{PaletteRole, UnknownRole};
