//! Grid data model: columns, items and their sub-items.
//!
//! Columns and items live in arenas owned by [`GridModel`] and are referred
//! to by stable handles ([`ColumnId`], [`ItemId`]). Sub-items are stored
//! inline in their item, one per column.

mod column;
mod grid_model;
mod item;
pub mod naming;
mod subitem;

pub use column::{Column, ColumnId, SortOrder};
pub use grid_model::GridModel;
pub use item::{GridId, Item, ItemId};
pub use subitem::SubItem;
