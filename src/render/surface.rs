//! Rendering-surface trait for pluggable realizations.
//!
//! This module defines the `RenderSurface` trait that abstracts the live
//! table structure the reconciler patches, allowing different realizations
//! (an in-memory text grid, a DOM adapter, a TUI buffer) to be used
//! interchangeably. The engine only ever addresses cells through opaque
//! handles; a surface must keep handles stable while a cell's structure is
//! reused across passes.

use crate::types::CellValue;

/// Which region of the table a cell belongs to.
///
/// Body rows contain the row-header cells (columns `0..row_header_columns`)
/// followed by the data cells, exactly like the table rows they model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The column-header region: one row per header level.
    ColumnHeader,
    /// The body region: row-header cells plus data cells.
    Body,
}

/// Opaque, stable identity of one rendered cell.
///
/// A handle stays valid for as long as the surface keeps the underlying
/// structure alive (including while hidden); surfaces must never reuse an
/// id for a different cell, so that stale handles miss rather than alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellHandle(u64);

impl CellHandle {
    /// Mint a handle from a surface-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The surface-assigned id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A measured cell extent in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

/// Trait for rendering surfaces.
///
/// Implementations own the realized table structure. The reconciler drives
/// them index-by-index: shrinking truncates (hides) structure rather than
/// destroying it, and growth is expected to reuse hidden structure before
/// allocating, preserving cell identity across shrink/grow cycles.
pub trait RenderSurface {
    /// Get the cell at `(ridx, cidx)` of a section, creating it if needed
    /// and un-hiding it if it was truncated away. Returns a stable handle.
    fn cell(&mut self, section: Section, ridx: usize, cidx: usize) -> CellHandle;

    /// Replace a cell's rendered content.
    fn set_content(&mut self, cell: CellHandle, value: &CellValue);

    /// Set the column/row span of a cell. Covered neighbours stay
    /// materialized; the span is purely presentational.
    fn set_span(&mut self, cell: CellHandle, col_span: usize, row_span: usize);

    /// Measure a cell's rendered extent.
    fn measure(&self, cell: CellHandle) -> Extent;

    /// Pin a column's width on a cell (`Some`), or release it to its
    /// natural size (`None`).
    fn set_column_width(&mut self, cell: CellHandle, width: Option<f32>);

    /// Hide all rows of a section at index `keep` and beyond. Hidden rows
    /// keep their structure for reuse.
    fn truncate_rows(&mut self, section: Section, keep: usize);

    /// Hide all cells of a row at column index `keep` and beyond.
    fn truncate_columns(&mut self, section: Section, ridx: usize, keep: usize);

    /// Destroy a section's structure entirely. Handles into it go stale.
    fn clear_section(&mut self, section: Section);

    /// Destroy all structure. Handles go stale and are never reissued.
    fn clear(&mut self);
}
