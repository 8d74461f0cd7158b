//! Pointer hit-testing.
//!
//! [`GridLayout`] is a snapshot of everything that decides what lies under
//! a pixel: column widths in display order, row and header heights, scroll
//! offsets and the viewport. [`classify`] maps a point in viewport
//! coordinates to a [`Region`]. Column spans are half-open, so a point on
//! the boundary between two columns belongs to the right-hand one.

use gridkit_core::logging::targets;

use crate::config::GridConfig;
use crate::geometry::{Point, Rect, Size};
use crate::model::GridModel;

/// Direction of a scroll affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What lies under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Nothing interactive.
    #[default]
    Nowhere,
    /// The header of a column (logical index).
    Header { column: usize },
    /// A cell (row, logical column index).
    Item { item: usize, column: usize },
    /// A scroll affordance.
    Scroll(ScrollDirection),
}

impl Region {
    pub fn is_nowhere(&self) -> bool {
        matches!(self, Self::Nowhere)
    }

    /// Row under the point, for item regions.
    pub fn item(&self) -> Option<usize> {
        match self {
            Self::Item { item, .. } => Some(*item),
            _ => None,
        }
    }

    /// Column under the point, for header and item regions.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Header { column } | Self::Item { column, .. } => Some(*column),
            _ => None,
        }
    }
}

/// A column's horizontal extent in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    /// Logical column index.
    pub column: usize,
    pub start: f32,
    pub width: f32,
}

impl ColumnSpan {
    pub fn end(&self) -> f32 {
        self.start + self.width
    }

    fn contains(&self, x: f32) -> bool {
        x >= self.start && x < self.end()
    }
}

/// A reserved rectangle that scrolls the grid when clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub direction: ScrollDirection,
    pub rect: Rect,
}

/// Geometry snapshot used for hit-testing and cell placement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    /// Column spans in display order.
    pub columns: Vec<ColumnSpan>,
    pub item_count: usize,
    pub row_height: f32,
    /// Zero when the header is hidden.
    pub header_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// `None` means unbounded: nothing is clipped and no scroll affordances
    /// exist.
    pub viewport: Option<Size>,
    pub scroll_areas: Vec<ScrollArea>,
}

impl GridLayout {
    /// Build a layout from the model and view state.
    pub fn compute(
        model: &GridModel,
        config: &GridConfig,
        viewport: Option<Size>,
        scroll_x: f32,
        scroll_y: f32,
    ) -> Self {
        let mut start = 0.0;
        let columns = model
            .columns_in_display_order()
            .map(|(column, c)| {
                let span = ColumnSpan {
                    column,
                    start,
                    width: c.width() as f32,
                };
                start = span.end();
                span
            })
            .collect();

        let mut layout = Self {
            columns,
            item_count: model.item_count(),
            row_height: config.row_height,
            header_height: config.effective_header_height(),
            scroll_x,
            scroll_y,
            viewport,
            scroll_areas: Vec::new(),
        };
        layout.scroll_areas = layout.compute_scroll_areas(config.scrollbar_thickness);
        layout
    }

    pub fn content_width(&self) -> f32 {
        self.columns.last().map_or(0.0, ColumnSpan::end)
    }

    pub fn content_height(&self) -> f32 {
        self.item_count as f32 * self.row_height
    }

    /// Whether content overflows the viewport `(horizontally, vertically)`.
    pub fn overflow(&self, thickness: f32) -> (bool, bool) {
        let Some(viewport) = self.viewport else {
            return (false, false);
        };
        let body_height = viewport.height - self.header_height;
        let mut vertical = self.content_height() > body_height;
        let mut horizontal = self.content_width() > viewport.width;
        if vertical && !horizontal {
            horizontal = self.content_width() > viewport.width - thickness;
        }
        if horizontal && !vertical {
            vertical = self.content_height() > body_height - thickness;
        }
        (horizontal, vertical)
    }

    fn compute_scroll_areas(&self, thickness: f32) -> Vec<ScrollArea> {
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        let (horizontal, vertical) = self.overflow(thickness);
        let mut areas = Vec::new();

        if vertical {
            let x = viewport.width - thickness;
            let top = self.header_height;
            let bottom = if horizontal {
                viewport.height - thickness
            } else {
                viewport.height
            };
            let half = (bottom - top).max(0.0) / 2.0;
            areas.push(ScrollArea {
                direction: ScrollDirection::Up,
                rect: Rect::new(x, top, thickness, half),
            });
            areas.push(ScrollArea {
                direction: ScrollDirection::Down,
                rect: Rect::new(x, top + half, thickness, half),
            });
        }
        if horizontal {
            let y = viewport.height - thickness;
            let right = if vertical {
                viewport.width - thickness
            } else {
                viewport.width
            };
            let half = right.max(0.0) / 2.0;
            areas.push(ScrollArea {
                direction: ScrollDirection::Left,
                rect: Rect::new(0.0, y, half, thickness),
            });
            areas.push(ScrollArea {
                direction: ScrollDirection::Right,
                rect: Rect::new(half, y, half, thickness),
            });
        }
        areas
    }

    /// Largest scroll offsets that keep content in view `(x, y)`.
    pub fn max_scroll(&self, thickness: f32) -> (f32, f32) {
        let Some(viewport) = self.viewport else {
            return (self.content_width(), self.content_height());
        };
        let (horizontal, vertical) = self.overflow(thickness);
        let visible_width = viewport.width - if vertical { thickness } else { 0.0 };
        let visible_height =
            viewport.height - self.header_height - if horizontal { thickness } else { 0.0 };
        (
            (self.content_width() - visible_width).max(0.0),
            (self.content_height() - visible_height).max(0.0),
        )
    }

    /// Span of a logical column.
    pub fn span(&self, column: usize) -> Option<&ColumnSpan> {
        self.columns.iter().find(|span| span.column == column)
    }

    /// Logical column under a viewport x coordinate.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        let x = x + self.scroll_x;
        self.columns
            .iter()
            .find(|span| span.contains(x))
            .map(|span| span.column)
    }

    /// Row under a viewport y coordinate below the header.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        if self.row_height <= 0.0 || y < self.header_height {
            return None;
        }
        let row = ((y - self.header_height + self.scroll_y) / self.row_height).floor();
        if row < 0.0 || row >= self.item_count as f32 {
            return None;
        }
        Some(row as usize)
    }

    /// Viewport rectangle of a cell, whether or not it is currently visible.
    pub fn cell_rect(&self, item: usize, column: usize) -> Option<Rect> {
        if item >= self.item_count {
            return None;
        }
        let span = self.span(column)?;
        Some(Rect::new(
            span.start - self.scroll_x,
            self.header_height + item as f32 * self.row_height - self.scroll_y,
            span.width,
            self.row_height,
        ))
    }

    /// Viewport rectangle of a column header.
    pub fn header_rect(&self, column: usize) -> Option<Rect> {
        let span = self.span(column)?;
        Some(Rect::new(
            span.start - self.scroll_x,
            0.0,
            span.width,
            self.header_height,
        ))
    }

    /// Whether a point lies inside the viewport.
    pub fn in_viewport(&self, point: Point) -> bool {
        match self.viewport {
            Some(viewport) => Rect::new(0.0, 0.0, viewport.width, viewport.height).contains(point),
            None => point.x >= 0.0 && point.y >= 0.0,
        }
    }
}

/// Classify a point in viewport coordinates.
///
/// An empty grid (no columns or no items) and points outside the viewport
/// always yield [`Region::Nowhere`]. Scroll affordances are checked before
/// header and cells.
pub fn classify(layout: &GridLayout, point: Point) -> Region {
    let region = classify_inner(layout, point);
    tracing::trace!(target: targets::REGION, x = point.x, y = point.y, ?region, "classified");
    region
}

fn classify_inner(layout: &GridLayout, point: Point) -> Region {
    if layout.columns.is_empty() || layout.item_count == 0 || !layout.in_viewport(point) {
        return Region::Nowhere;
    }

    if let Some(area) = layout.scroll_areas.iter().find(|a| a.rect.contains(point)) {
        return Region::Scroll(area.direction);
    }

    if point.y < layout.header_height {
        return match layout.column_at(point.x) {
            Some(column) => Region::Header { column },
            None => Region::Nowhere,
        };
    }

    match (layout.row_at(point.y), layout.column_at(point.x)) {
        (Some(item), Some(column)) => Region::Item { item, column },
        _ => Region::Nowhere,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two columns (100, 50), three rows of 20 px under a 24 px header.
    fn layout() -> GridLayout {
        GridLayout {
            columns: vec![
                ColumnSpan {
                    column: 0,
                    start: 0.0,
                    width: 100.0,
                },
                ColumnSpan {
                    column: 1,
                    start: 100.0,
                    width: 50.0,
                },
            ],
            item_count: 3,
            row_height: 20.0,
            header_height: 24.0,
            ..GridLayout::default()
        }
    }

    #[test]
    fn test_header_and_cells() {
        let layout = layout();
        assert_eq!(classify(&layout, Point::new(10.0, 5.0)), Region::Header { column: 0 });
        assert_eq!(classify(&layout, Point::new(120.0, 5.0)), Region::Header { column: 1 });
        assert_eq!(
            classify(&layout, Point::new(10.0, 24.0)),
            Region::Item { item: 0, column: 0 }
        );
        assert_eq!(
            classify(&layout, Point::new(149.0, 83.9)),
            Region::Item { item: 2, column: 1 }
        );
    }

    #[test]
    fn test_boundary_belongs_to_right_column() {
        let layout = layout();
        assert_eq!(
            classify(&layout, Point::new(100.0, 30.0)),
            Region::Item { item: 0, column: 1 }
        );
        assert_eq!(
            classify(&layout, Point::new(10.0, 44.0)),
            Region::Item { item: 1, column: 0 }
        );
    }

    #[test]
    fn test_outside_content_is_nowhere() {
        let layout = layout();
        assert_eq!(classify(&layout, Point::new(150.0, 30.0)), Region::Nowhere);
        assert_eq!(classify(&layout, Point::new(10.0, 84.0)), Region::Nowhere);
        assert_eq!(classify(&layout, Point::new(-1.0, 30.0)), Region::Nowhere);
    }

    #[test]
    fn test_empty_grid_is_nowhere() {
        let mut no_items = layout();
        no_items.item_count = 0;
        assert_eq!(classify(&no_items, Point::new(10.0, 5.0)), Region::Nowhere);

        let mut no_columns = layout();
        no_columns.columns.clear();
        assert_eq!(classify(&no_columns, Point::new(10.0, 30.0)), Region::Nowhere);
    }

    #[test]
    fn test_zero_width_column_is_unreachable() {
        let mut layout = layout();
        layout.columns.insert(
            1,
            ColumnSpan {
                column: 2,
                start: 100.0,
                width: 0.0,
            },
        );
        assert_eq!(
            classify(&layout, Point::new(100.0, 30.0)),
            Region::Item { item: 0, column: 1 }
        );
    }

    #[test]
    fn test_scroll_offsets() {
        let mut layout = layout();
        layout.scroll_x = 60.0;
        layout.scroll_y = 20.0;
        assert_eq!(
            classify(&layout, Point::new(30.0, 30.0)),
            Region::Item { item: 1, column: 0 }
        );
        assert_eq!(
            classify(&layout, Point::new(40.0, 30.0)),
            Region::Item { item: 1, column: 1 }
        );
        assert_eq!(classify(&layout, Point::new(40.0, 5.0)), Region::Header { column: 1 });
    }

    #[test]
    fn test_scroll_areas_take_precedence() {
        let mut layout = layout();
        layout.viewport = Some(Size::new(120.0, 64.0));
        layout.scroll_areas = layout.compute_scroll_areas(14.0);
        let directions: Vec<_> = layout.scroll_areas.iter().map(|a| a.direction).collect();
        assert_eq!(
            directions,
            [
                ScrollDirection::Up,
                ScrollDirection::Down,
                ScrollDirection::Left,
                ScrollDirection::Right
            ]
        );
        assert_eq!(
            classify(&layout, Point::new(110.0, 26.0)),
            Region::Scroll(ScrollDirection::Up)
        );
        assert_eq!(
            classify(&layout, Point::new(110.0, 48.0)),
            Region::Scroll(ScrollDirection::Down)
        );
        assert_eq!(
            classify(&layout, Point::new(5.0, 60.0)),
            Region::Scroll(ScrollDirection::Left)
        );
        assert_eq!(
            classify(&layout, Point::new(100.0, 60.0)),
            Region::Scroll(ScrollDirection::Right)
        );
        assert_eq!(classify(&layout, Point::new(110.0, 5.0)), Region::Header { column: 1 });
        assert_eq!(classify(&layout, Point::new(120.0, 30.0)), Region::Nowhere);
    }

    #[test]
    fn test_no_affordances_without_overflow() {
        let mut layout = layout();
        layout.viewport = Some(Size::new(400.0, 400.0));
        assert!(layout.compute_scroll_areas(14.0).is_empty());
        assert_eq!(layout.max_scroll(14.0), (0.0, 0.0));
    }

    #[test]
    fn test_cell_rect_center_round_trips() {
        let mut layout = layout();
        layout.scroll_x = 7.0;
        layout.scroll_y = 3.0;
        for item in 0..3 {
            for column in 0..2 {
                let rect = layout.cell_rect(item, column).unwrap();
                assert_eq!(
                    classify(&layout, rect.center()),
                    Region::Item { item, column },
                    "cell ({item}, {column})"
                );
            }
        }
        assert_eq!(layout.cell_rect(3, 0), None);
        assert_eq!(layout.cell_rect(0, 5), None);
    }

    #[test]
    fn test_compute_uses_display_order() {
        use crate::model::Column;

        let mut model = GridModel::new();
        model.insert_column(0, Column::new("A").with_width(30), 100).unwrap();
        model.insert_column(1, Column::new("B").with_width(70), 100).unwrap();
        model.move_column(1, 0).unwrap();

        let layout = GridLayout::compute(&model, &GridConfig::default(), None, 0.0, 0.0);
        assert_eq!(
            layout.columns[0],
            ColumnSpan {
                column: 1,
                start: 0.0,
                width: 70.0
            }
        );
        assert_eq!(
            layout.columns[1],
            ColumnSpan {
                column: 0,
                start: 70.0,
                width: 30.0
            }
        );
        assert_eq!(layout.content_width(), 100.0);
        assert_eq!(layout.header_rect(0), Some(Rect::new(70.0, 0.0, 30.0, 24.0)));
    }
}
