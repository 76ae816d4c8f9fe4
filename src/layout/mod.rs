//! Size estimation and viewport windowing.
//!
//! This module decides which logical window of the virtual dataset must be
//! fetched for the current scroll position, based on cached per-column
//! measurements and a running row-height estimate.

mod sizes;
mod viewport;

pub use sizes::ColumnSizes;
pub use viewport::Viewport;

/// Default column width in pixels, used until a column has been measured.
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in pixels, used until any row has been measured.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Extra rows/cols to include around the viewport to reduce popping during
/// scroll.
pub const VISIBLE_PADDING: u32 = 1;
