//! Cached per-column size state.
//!
//! Columns are addressed by `size_key`: row-header columns occupy slots
//! `0..row_header_columns`, data column `x` occupies slot
//! `x + row_header_columns`. A slot is measured at most once; the cached
//! value is reused on every subsequent pass until an explicit reset.

use std::collections::HashMap;

use super::{DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};

/// Per-column size cache: measured `auto` widths, user `override` widths
/// (which always win), the ordered list of measured slots, and a running
/// row-height average feeding the viewport's row estimate.
#[derive(Debug, Clone, Default)]
pub struct ColumnSizes {
    auto: HashMap<u32, f32>,
    overrides: HashMap<u32, f32>,
    indices: Vec<u32>,
    row_height_sum: f64,
    row_height_samples: u32,
    row_header_columns: u32,
    extent_floor: (f32, f32),
}

impl ColumnSizes {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective width of a column slot: override, else measured, else the
    /// default estimate.
    pub fn width_for(&self, size_key: u32) -> f32 {
        self.overrides
            .get(&size_key)
            .or_else(|| self.auto.get(&size_key))
            .copied()
            .unwrap_or(DEFAULT_COL_WIDTH)
    }

    /// Width to pin on a rendered column, if any measurement or override
    /// exists. `None` leaves the column at its natural size.
    pub fn pinned_width(&self, size_key: u32) -> Option<f32> {
        self.overrides
            .get(&size_key)
            .or_else(|| self.auto.get(&size_key))
            .copied()
    }

    /// Effective width of data column `x` (slot `x + row_header_columns`).
    pub fn column_width(&self, x: u32) -> f32 {
        self.width_for(x.saturating_add(self.row_header_columns))
    }

    /// Estimated row height: the average of measured heights, or the
    /// default before any measurement exists.
    pub fn row_height(&self) -> f32 {
        if self.row_height_samples == 0 {
            DEFAULT_ROW_HEIGHT
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let avg = (self.row_height_sum / f64::from(self.row_height_samples)) as f32;
            avg
        }
    }

    /// Whether a slot has already been measured this cache generation.
    pub fn is_measured(&self, size_key: u32) -> bool {
        self.indices.contains(&size_key)
    }

    /// Record a measurement for a slot. Zero widths are remembered as
    /// measured but do not produce an `auto` entry; overridden slots keep
    /// their override.
    pub fn record_measurement(&mut self, size_key: u32, width: f32, height: f32) {
        if !self.indices.contains(&size_key) {
            self.indices.push(size_key);
        }
        if width > 0.0 && !self.overrides.contains_key(&size_key) {
            self.auto.insert(size_key, width);
        }
        if height > 0.0 {
            self.row_height_sum += f64::from(height);
            self.row_height_samples += 1;
        }
    }

    /// Set a user width override for a slot. Overrides beat `auto` widths
    /// and survive autosizing.
    pub fn set_override(&mut self, size_key: u32, width: f32) {
        self.overrides.insert(size_key, width.max(0.0));
    }

    /// Remove a user width override. Returns whether one existed.
    pub fn clear_override(&mut self, size_key: u32) -> bool {
        self.overrides.remove(&size_key).is_some()
    }

    /// Number of row-header columns of the most recent pass.
    pub fn row_header_columns(&self) -> u32 {
        self.row_header_columns
    }

    pub(crate) fn set_row_header_columns(&mut self, n: u32) {
        self.row_header_columns = n;
    }

    /// Estimated x offset of data column `x`: the cumulative width of all
    /// data columns before it.
    ///
    /// Computed from the default estimate plus per-slot corrections, so the
    /// cost scales with the number of *measured* columns, not with `x`.
    pub fn cumulative_width(&self, x: u32) -> f32 {
        let mut total = x as f32 * DEFAULT_COL_WIDTH;
        for (&key, &width) in &self.overrides {
            if self.slot_is_data_column_before(key, x) {
                total += width - DEFAULT_COL_WIDTH;
            }
        }
        for (&key, &width) in &self.auto {
            if !self.overrides.contains_key(&key) && self.slot_is_data_column_before(key, x) {
                total += width - DEFAULT_COL_WIDTH;
            }
        }
        total.max(0.0)
    }

    fn slot_is_data_column_before(&self, size_key: u32, x: u32) -> bool {
        size_key
            .checked_sub(self.row_header_columns)
            .is_some_and(|col| col < x)
    }

    /// Estimated total scrollable extent `(width, height)` for a dataset of
    /// the given dimensions.
    ///
    /// The estimate is revised monotonically as more columns are measured (a
    /// stored floor prevents the scroll shim from visibly shrinking under
    /// the user); [`ColumnSizes::reset_extent`] is the only way down.
    pub fn scroll_extent(&mut self, num_columns: u32, num_rows: u32) -> (f32, f32) {
        let width = self.cumulative_width(num_columns).max(self.extent_floor.0);
        let height = (num_rows as f32 * self.row_height()).max(self.extent_floor.1);
        self.extent_floor = (width, height);
        (width, height)
    }

    /// Invalidate measured widths, overrides and the measured-slot list.
    /// The row-height estimate is kept; it only improves with samples.
    pub fn reset_autosize(&mut self) {
        self.auto.clear();
        self.overrides.clear();
        self.indices.clear();
    }

    /// Forget the monotonic extent floor, allowing the scroll shim to
    /// shrink. Used by scroll-to-origin resets.
    pub fn reset_extent(&mut self) {
        self.extent_floor = (0.0, 0.0);
    }
}
