//! Viewport state management: scroll position to logical window.

use super::{ColumnSizes, VISIBLE_PADDING};
use crate::types::LogicalRect;

/// Viewport state - the scroll offsets and client size of the visible area.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in pixels.
    pub scroll_x: f32,
    /// Vertical scroll position in pixels.
    pub scroll_y: f32,
    /// Client width in pixels.
    pub width: f32,
    /// Client height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a zero-sized viewport at the origin.
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Resize the client area.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Visible row range `(y0, y1)` (exclusive end, overscan included) for
    /// the current scroll position, clamped to `num_rows` when known.
    ///
    /// Rows share a single height estimate, so the window is a direct
    /// division rather than a walk.
    pub fn visible_rows(&self, sizes: &ColumnSizes, num_rows: Option<u32>) -> (u32, u32) {
        let row_height = sizes.row_height().max(1.0);
        let y0 = floor_u32(self.scroll_y.max(0.0) / row_height);
        let fit = ceil_u32(self.height / row_height);
        let y1 = y0
            .saturating_add(fit)
            .saturating_add(VISIBLE_PADDING)
            .saturating_add(1);
        match num_rows {
            Some(n) => {
                let y1 = y1.min(n);
                (y0.min(y1), y1)
            }
            None => (y0, y1),
        }
    }

    /// Visible column range `(x0, x1)` (exclusive end, overscan included),
    /// clamped to `num_columns` when known.
    ///
    /// Column widths are irregular, so the cached width list is walked
    /// cumulatively instead of assuming a uniform width.
    pub fn visible_cols(&self, sizes: &ColumnSizes, num_columns: Option<u32>) -> (u32, u32) {
        let limit = num_columns.unwrap_or(u32::MAX);
        let scroll_x = self.scroll_x.max(0.0);

        let mut x0 = 0u32;
        let mut edge = 0.0f32;
        while x0 < limit {
            // Zero-width estimates would stall the walk.
            let w = sizes.column_width(x0).max(1.0);
            if edge + w > scroll_x {
                break;
            }
            edge += w;
            x0 += 1;
        }

        let mut x1 = x0;
        while x1 < limit && edge < scroll_x + self.width {
            edge += sizes.column_width(x1).max(1.0);
            x1 += 1;
        }
        let x1 = x1.saturating_add(VISIBLE_PADDING).min(limit);
        (x0.min(x1), x1)
    }

    /// The logical window to fetch for the current scroll position, or the
    /// empty rectangle when the client area has no visible extent.
    ///
    /// `dims` is `(num_columns, num_rows)` from the most recent response;
    /// before the first response the window is unclamped and starts at the
    /// origin.
    pub fn window(&self, sizes: &ColumnSizes, dims: Option<(u32, u32)>) -> LogicalRect {
        if self.width <= 0.0 || self.height <= 0.0 {
            return LogicalRect::EMPTY;
        }
        let (num_columns, num_rows) = match dims {
            Some((c, r)) => (Some(c), Some(r)),
            None => (None, None),
        };
        let (y0, y1) = self.visible_rows(sizes, num_rows);
        let (x0, x1) = self.visible_cols(sizes, num_columns);
        LogicalRect { x0, y0, x1, y1 }
    }
}

fn floor_u32(v: f32) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= u32::MAX as f32 {
        u32::MAX
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            v as u32
        }
    }
}

fn ceil_u32(v: f32) -> u32 {
    floor_u32(v.max(0.0).ceil())
}
