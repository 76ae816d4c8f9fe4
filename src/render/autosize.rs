//! Column autosizing from rendered content.
//!
//! A column slot is measured from its bottom rendered cell only the first
//! time the slot appears in the measured-slot list; later passes reuse the
//! cached value, trading perfect accuracy for scroll-time stability. User
//! overrides always win and are never cleared here.

use super::reconcile::ReconcileOutput;
use super::surface::RenderSurface;
use crate::layout::ColumnSizes;

/// Calculate amendments to the size cache from this render pass and apply
/// width pins to the leaf header cells.
pub(crate) fn autosize_pass<S: RenderSurface>(
    surface: &mut S,
    sizes: &mut ColumnSizes,
    pass: &ReconcileOutput,
) {
    for &(size_key, cell) in &pass.bottom_cells {
        if sizes.is_measured(size_key) {
            continue;
        }
        let extent = surface.measure(cell);
        sizes.record_measurement(size_key, extent.width, extent.height);
    }

    for &(size_key, cell) in &pass.leaf_header_cells {
        surface.set_column_width(cell, sizes.pinned_width(size_key));
    }
}
