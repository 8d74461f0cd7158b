//! Grid configuration.

/// How clicks on item rows change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Clicks never select.
    None,
    /// A click selects the clicked item and deselects every other item.
    #[default]
    Single,
    /// A click toggles the clicked item and leaves the rest alone.
    Multi,
}

const ROW_HEIGHT: f32 = 24.0;
const HEADER_HEIGHT: f32 = 24.0;
const DEFAULT_COLUMN_WIDTH: u32 = 100;
const SCROLLBAR_THICKNESS: f32 = 14.0;
const HORIZONTAL_SCROLL_STEP: f32 = 20.0;

/// Layout and behavior settings for a [`GridListView`](crate::GridListView).
///
/// Values are plain data; build one with the `with_*` methods and hand it to
/// [`GridListView::with_config`](crate::GridListView::with_config).
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Height of every item row in pixels.
    pub row_height: f32,
    /// Height of the column header band in pixels.
    pub header_height: f32,
    /// Width given to columns added without an explicit width.
    pub default_column_width: u32,
    /// Thickness of the scroll affordance strips.
    pub scrollbar_thickness: f32,
    /// Pixels scrolled by one click on a left/right affordance.
    pub horizontal_scroll_step: f32,
    pub selection_mode: SelectionMode,
    /// Whether a header click sorts items by that column.
    pub sorting_enabled: bool,
    /// Whether the header band is shown at all.
    pub header_visible: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            header_height: HEADER_HEIGHT,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            scrollbar_thickness: SCROLLBAR_THICKNESS,
            horizontal_scroll_step: HORIZONTAL_SCROLL_STEP,
            selection_mode: SelectionMode::default(),
            sorting_enabled: false,
            header_visible: true,
        }
    }
}

impl GridConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width;
        self
    }

    pub fn with_scrollbar_thickness(mut self, thickness: f32) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_sorting_enabled(mut self, enabled: bool) -> Self {
        self.sorting_enabled = enabled;
        self
    }

    pub fn with_header_visible(mut self, visible: bool) -> Self {
        self.header_visible = visible;
        self
    }

    /// Header band height actually occupied, zero when the header is hidden.
    pub fn effective_header_height(&self) -> f32 {
        if self.header_visible {
            self.header_height.max(0.0)
        } else {
            0.0
        }
    }
}
