//! The logical-coordinate <-> rendered-cell metadata index.
//!
//! Built fresh on every draw pass and owned by the current window; a handle
//! from a superseded pass simply misses. Coordinate lookups resolve through
//! the rendered cell for the current window, so a coordinate outside the
//! rendered slice (e.g. a pivot depth not present in the current response)
//! returns `None` rather than reconstructing synthetic metadata.

use std::collections::HashMap;

use crate::render::CellHandle;
use crate::types::{CellMeta, MetaQuery};

/// Bidirectional map between rendered cells and their logical coordinates.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    by_cell: HashMap<CellHandle, CellMeta>,
    body: HashMap<(u32, u32), CellHandle>,
    row_headers: HashMap<(u32, u32), CellHandle>,
    column_headers: HashMap<(u32, u32), CellHandle>,
    row_header_depth: u32,
    column_header_depth: u32,
}

impl MetadataIndex {
    /// Create an empty index for a window with the given header depths.
    pub fn new(row_header_depth: u32, column_header_depth: u32) -> Self {
        Self {
            row_header_depth,
            column_header_depth,
            ..Self::default()
        }
    }

    /// Number of row-header columns in the indexed window.
    pub fn row_header_depth(&self) -> u32 {
        self.row_header_depth
    }

    /// Number of column-header rows in the indexed window.
    pub fn column_header_depth(&self) -> u32 {
        self.column_header_depth
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.by_cell.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.by_cell.is_empty()
    }

    pub(crate) fn insert_body(&mut self, cell: CellHandle, dx: u32, dy: u32, meta: CellMeta) {
        self.body.insert((dx, dy), cell);
        self.by_cell.insert(cell, meta);
    }

    pub(crate) fn insert_row_header(
        &mut self,
        cell: CellHandle,
        level: u32,
        dy: u32,
        meta: CellMeta,
    ) {
        self.row_headers.insert((level, dy), cell);
        self.by_cell.insert(cell, meta);
    }

    pub(crate) fn insert_column_header(
        &mut self,
        cell: CellHandle,
        level: u32,
        dx: u32,
        meta: CellMeta,
    ) {
        self.column_headers.insert((level, dx), cell);
        self.by_cell.insert(cell, meta);
    }

    /// All rendered column-header cells at one header level.
    pub(crate) fn column_header_cells(&self, level: u32) -> impl Iterator<Item = CellHandle> + '_ {
        self.column_headers
            .iter()
            .filter_map(move |(&(l, _), &cell)| (l == level).then_some(cell))
    }

    /// Look up the metadata for a rendered cell or coordinate descriptor.
    pub fn lookup(&self, query: MetaQuery) -> Option<&CellMeta> {
        let cell = match query {
            MetaQuery::Cell(cell) => cell,
            MetaQuery::Body { dx, dy } => *self.body.get(&(dx, dy))?,
            MetaQuery::RowHeader { row_header_x, y } => {
                if row_header_x >= self.row_header_depth {
                    return None;
                }
                *self.row_headers.get(&(row_header_x, y))?
            }
            MetaQuery::ColumnHeader { column_header_y, x } => {
                if column_header_y >= self.column_header_depth {
                    return None;
                }
                *self.column_headers.get(&(column_header_y, x))?
            }
        };
        self.by_cell.get(&cell)
    }
}
