//! Scroll-related logic for `GridView`.
//!
//! Scroll offsets are clamped against the estimated scrollable extent; the
//! estimate is only as good as the columns measured so far, which is why
//! the extent is revised monotonically (see `ColumnSizes::scroll_extent`).

use super::GridView;
use crate::error::Result;
use crate::render::RenderSurface;

impl<S: RenderSurface> GridView<S> {
    /// Set absolute scroll offsets, clamped to the estimated scrollable
    /// extent once the dataset dimensions are known. Takes effect on the
    /// next draw.
    pub fn set_scroll(&self, x: f32, y: f32) {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        let (max_x, max_y) = match s.dims {
            Some((num_columns, num_rows)) => {
                let (total_w, total_h) = s.sizes.scroll_extent(num_columns, num_rows);
                (
                    (total_w - s.viewport.width).max(0.0),
                    (total_h - s.viewport.height).max(0.0),
                )
            }
            None => (f32::MAX, f32::MAX),
        };
        s.viewport.scroll_x = x.clamp(0.0, max_x);
        s.viewport.scroll_y = y.clamp(0.0, max_y);
    }

    /// Scroll by delta amounts.
    pub fn scroll_by(&self, delta_x: f32, delta_y: f32) {
        let (x, y) = self.scroll_position();
        self.set_scroll(x + delta_x, y + delta_y);
    }

    /// The current `(scroll_x, scroll_y)` offsets.
    pub fn scroll_position(&self) -> (f32, f32) {
        let s = self.state.borrow();
        (s.viewport.scroll_x, s.viewport.scroll_y)
    }

    /// Estimated total scrollable extent `(width, height)`, for sizing a
    /// host scroll shim. `None` before the dataset dimensions are known.
    ///
    /// The estimate improves as columns are measured but never shrinks
    /// under the user; only the reset operations let it down.
    pub fn scroll_extent(&self) -> Option<(f32, f32)> {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        s.dims
            .map(|(num_columns, num_rows)| s.sizes.scroll_extent(num_columns, num_rows))
    }

    /// Scroll so that logical cell `(x, y)` is the top-left of the view,
    /// then wait for the resulting draw pass to complete.
    ///
    /// The vertical offset is proportional to the estimated row height; the
    /// horizontal offset is weighted by the cached column widths, so
    /// already-measured columns land precisely.
    pub async fn scroll_to_cell(&self, x: u32, y: u32, num_columns: u32, num_rows: u32) -> Result<()> {
        {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let (total_w, total_h) = s.sizes.scroll_extent(num_columns, num_rows);
            let row_height = if num_rows == 0 {
                0.0
            } else {
                total_h / num_rows as f32
            };
            let max_x = (total_w - s.viewport.width).max(0.0);
            let max_y = (total_h - s.viewport.height).max(0.0);
            s.viewport.scroll_x = s.sizes.cumulative_width(x).clamp(0.0, max_x);
            s.viewport.scroll_y = (row_height * y as f32).clamp(0.0, max_y);
        }
        self.flush().await
    }
}
