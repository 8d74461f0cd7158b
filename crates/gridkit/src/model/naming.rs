//! Unique name generation for columns, items and sub-items.

use std::collections::HashSet;

/// Default base name for unnamed columns.
pub const COLUMN_BASE: &str = "Column";
/// Default base name for unnamed items.
pub const ITEM_BASE: &str = "Item";
/// Default base name for unnamed sub-items.
pub const SUB_ITEM_BASE: &str = "SubItem";

/// Return `base` followed by the smallest integer suffix, starting at 1,
/// that does not collide with any name in `existing`.
///
/// ```
/// use gridkit::model::naming::unique_name;
///
/// assert_eq!(unique_name("Item", ["Item1", "Item3"]), "Item2");
/// ```
pub fn unique_name<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    (1u64..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
