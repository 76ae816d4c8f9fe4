//! Per-cell rendering metadata records.
//!
//! Every rendered cell of the current window maps to one [`CellMeta`]
//! describing where it came from in the virtual dataset. Records are
//! rebuilt wholesale on every draw pass and never survive into the next.

use serde::Serialize;

use crate::render::CellHandle;
use crate::types::CellValue;

/// Rendering metadata for one cell of the current window.
///
/// Which fields are populated depends on the cell kind:
/// - body cells carry `x`/`y`, `dx`/`dy` and `size_key`;
/// - row-header cells carry `y`, `dy`, `row_header_x` and `size_key`;
/// - column-header cells carry `x`, `dx` and `column_header_y`, with
///   `size_key` only at the leaf level.
///
/// `size_key` is the unique column slot index of a full table row:
/// `x + total row-header columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellMeta {
    /// Column index in the virtual dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    /// Row index in the virtual dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    /// Viewport origin column, as passed to the data listener.
    pub x0: u32,
    /// Viewport origin row.
    pub y0: u32,
    /// Viewport corner column.
    pub x1: u32,
    /// Viewport corner row.
    pub y1: u32,
    /// Column index within the fetched slice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dx: Option<u32>,
    /// Row index within the fetched slice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dy: Option<u32>,
    /// Row-header level (0 = least specific) for row-header cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_header_x: Option<u32>,
    /// Column-header level (0 = least specific) for column-header cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_header_y: Option<u32>,
    /// Unique column slot index used for stable width addressing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_key: Option<u32>,
    /// The full row group-path for this cell's row, if headers were provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_header: Option<Vec<CellValue>>,
    /// The full column group-path for this cell's column, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_header: Option<Vec<CellValue>>,
    /// The rendered value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
}

/// A metadata lookup key: either a rendered cell's identity or a logical
/// coordinate descriptor resolved against the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaQuery {
    /// Direct lookup by rendered-cell identity.
    Cell(CellHandle),
    /// A body cell by slice-relative position.
    Body { dx: u32, dy: u32 },
    /// A row-header cell by header level and slice-relative row.
    RowHeader { row_header_x: u32, y: u32 },
    /// A column-header cell by header level and slice-relative column.
    ColumnHeader { column_header_y: u32, x: u32 },
}
