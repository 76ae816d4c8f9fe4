//! Incremental reconciliation of a data response onto a rendering surface.
//!
//! A full teardown/rebuild per scroll tick is the naive approach; this
//! module instead patches the surface index-by-index. Shrinking truncates
//! (the surface hides and keeps the structure), growth reuses hidden
//! structure before allocating, and only a header-depth change rebuilds the
//! header region. Column order never changes within a pass; only counts do.

use log::trace;

use super::surface::{CellHandle, RenderSurface, Section};
use crate::metadata::MetadataIndex;
use crate::types::{CellMeta, CellValue, DataResponse, LogicalRect};

/// Everything one reconciliation pass produces besides surface mutations.
#[derive(Debug)]
pub(crate) struct ReconcileOutput {
    /// The rebuilt metadata index for the new window.
    pub metadata: MetadataIndex,
    /// Bottom rendered cell of every column slot, for autosizing.
    pub bottom_cells: Vec<(u32, CellHandle)>,
    /// Leaf column-header cell of every column slot, for width pinning.
    pub leaf_header_cells: Vec<(u32, CellHandle)>,
    /// Number of row-header columns in this pass.
    pub row_header_columns: u32,
    /// Number of column-header rows in this pass.
    pub column_header_rows: u32,
}

/// Patch `surface` to display `response` for `window`.
///
/// `prev_column_header_rows` is the header depth of the previous pass; a
/// depth change rebuilds the header region (body identities are preserved).
pub(crate) fn reconcile<S: RenderSurface>(
    surface: &mut S,
    response: &DataResponse,
    window: &LogicalRect,
    prev_column_header_rows: u32,
) -> ReconcileOutput {
    let ncols = window.num_columns() as usize;
    let nrows = window.num_rows() as usize;
    let row_depth = response.row_header_depth() as usize;
    let col_depth = response.column_header_depth() as usize;

    if u32::try_from(col_depth).unwrap_or(u32::MAX) != prev_column_header_rows {
        trace!(
            "column header depth changed ({prev_column_header_rows} -> {col_depth}), rebuilding header region"
        );
        surface.clear_section(Section::ColumnHeader);
    }

    let mut out = ReconcileOutput {
        metadata: MetadataIndex::new(as_u32(row_depth), as_u32(col_depth)),
        bottom_cells: Vec::with_capacity(row_depth + ncols),
        leaf_header_cells: Vec::with_capacity(ncols),
        row_header_columns: as_u32(row_depth),
        column_header_rows: as_u32(col_depth),
    };

    draw_column_headers(surface, response, window, row_depth, col_depth, &mut out);
    draw_body(surface, response, window, row_depth, ncols, nrows, &mut out);

    surface.truncate_rows(Section::ColumnHeader, col_depth);
    for level in 0..col_depth {
        surface.truncate_columns(Section::ColumnHeader, level, row_depth + ncols);
    }
    surface.truncate_rows(Section::Body, nrows);
    for ridx in 0..nrows {
        surface.truncate_columns(Section::Body, ridx, row_depth + ncols);
    }

    trace!(
        "reconciled {}x{} window ({} header rows, {} header cols, {} cells indexed)",
        window.num_columns(),
        window.num_rows(),
        col_depth,
        row_depth,
        out.metadata.len()
    );
    out
}

fn draw_column_headers<S: RenderSurface>(
    surface: &mut S,
    response: &DataResponse,
    window: &LogicalRect,
    row_depth: usize,
    col_depth: usize,
    out: &mut ReconcileOutput,
) {
    let path_of = |dx: usize| {
        response
            .column_headers
            .as_ref()
            .and_then(|headers| headers.get(dx))
    };
    let ncols = window.num_columns() as usize;

    for level in 0..col_depth {
        // Corner cells above the row-header columns: empty, spanned, no
        // metadata.
        for c in 0..row_depth {
            let corner = surface.cell(Section::ColumnHeader, level, c);
            surface.set_content(corner, &CellValue::Empty);
            let span = if c == 0 { row_depth } else { 1 };
            surface.set_span(corner, span, 1);
        }

        let is_leaf = level + 1 == col_depth;
        let mut origin: Option<(usize, CellHandle)> = None;
        for dx in 0..ncols {
            let cell = surface.cell(Section::ColumnHeader, level, row_depth + dx);
            let path = path_of(dx);
            let value = path
                .and_then(|p| p.get(level))
                .cloned()
                .unwrap_or_default();

            let merged = !is_leaf && dx > 0 && prefix_matches(path_of(dx - 1), path, level + 1);
            if merged {
                surface.set_content(cell, &CellValue::Empty);
                surface.set_span(cell, 1, 1);
                if let Some((origin_dx, origin_cell)) = origin {
                    surface.set_span(origin_cell, dx - origin_dx + 1, 1);
                }
            } else {
                surface.set_content(cell, &value);
                surface.set_span(cell, 1, 1);
                origin = Some((dx, cell));
            }

            let meta = CellMeta {
                x: Some(window.x0 + as_u32(dx)),
                dx: Some(as_u32(dx)),
                column_header_y: Some(as_u32(level)),
                x0: window.x0,
                y0: window.y0,
                x1: window.x1,
                y1: window.y1,
                size_key: is_leaf.then(|| as_u32(row_depth + dx)),
                column_header: path.map(|p| pad_path(p, col_depth)),
                value: Some(value),
                ..CellMeta::default()
            };
            out.metadata
                .insert_column_header(cell, as_u32(level), as_u32(dx), meta);
            if is_leaf {
                out.leaf_header_cells.push((as_u32(row_depth + dx), cell));
            }
        }
    }
}

fn draw_body<S: RenderSurface>(
    surface: &mut S,
    response: &DataResponse,
    window: &LogicalRect,
    row_depth: usize,
    ncols: usize,
    nrows: usize,
    out: &mut ReconcileOutput,
) {
    let path_of = |dy: usize| {
        response
            .row_headers
            .as_ref()
            .and_then(|headers| headers.get(dy))
    };
    let col_path_of = |dx: usize| {
        response
            .column_headers
            .as_ref()
            .and_then(|headers| headers.get(dx))
    };
    let col_depth = response.column_header_depth() as usize;

    // Per-level merge origins: (slice row, cell) of the open group.
    let mut origins: Vec<Option<(usize, CellHandle)>> = vec![None; row_depth];

    for dy in 0..nrows {
        let y = window.y0 + as_u32(dy);
        let last_row = dy + 1 == nrows;

        for level in 0..row_depth {
            let cell = surface.cell(Section::Body, dy, level);
            let path = path_of(dy);
            let value = path
                .and_then(|p| p.get(level))
                .cloned()
                .unwrap_or_default();

            let is_leaf = level + 1 == row_depth;
            let merged = !is_leaf && dy > 0 && prefix_matches(path_of(dy - 1), path, level + 1);
            if merged {
                surface.set_content(cell, &CellValue::Empty);
                surface.set_span(cell, 1, 1);
                if let Some(Some((origin_dy, origin_cell))) = origins.get(level) {
                    surface.set_span(*origin_cell, 1, dy - origin_dy + 1);
                }
            } else {
                surface.set_content(cell, &value);
                surface.set_span(cell, 1, 1);
                if let Some(slot) = origins.get_mut(level) {
                    *slot = Some((dy, cell));
                }
            }

            let meta = CellMeta {
                y: Some(y),
                dy: Some(as_u32(dy)),
                row_header_x: Some(as_u32(level)),
                x0: window.x0,
                y0: window.y0,
                x1: window.x1,
                y1: window.y1,
                size_key: Some(as_u32(level)),
                row_header: path.map(|p| pad_path(p, row_depth)),
                value: Some(value),
                ..CellMeta::default()
            };
            out.metadata
                .insert_row_header(cell, as_u32(level), as_u32(dy), meta);
            if last_row {
                out.bottom_cells.push((as_u32(level), cell));
            }
        }

        for dx in 0..ncols {
            let cell = surface.cell(Section::Body, dy, row_depth + dx);
            let datum = response.data.get(dx).and_then(|col| col.get(dy));
            match datum {
                Some(value) => {
                    surface.set_content(cell, value);
                    let meta = CellMeta {
                        x: Some(window.x0 + as_u32(dx)),
                        y: Some(y),
                        dx: Some(as_u32(dx)),
                        dy: Some(as_u32(dy)),
                        x0: window.x0,
                        y0: window.y0,
                        x1: window.x1,
                        y1: window.y1,
                        size_key: Some(as_u32(row_depth + dx)),
                        row_header: path_of(dy).map(|p| pad_path(p, row_depth)),
                        column_header: col_path_of(dx).map(|p| pad_path(p, col_depth)),
                        value: Some(value.clone()),
                        ..CellMeta::default()
                    };
                    out.metadata.insert_body(cell, as_u32(dx), as_u32(dy), meta);
                }
                None => {
                    // The response under-delivered at a dataset edge: the
                    // slot stays for alignment but is not indexed.
                    surface.set_content(cell, &CellValue::Empty);
                }
            }
            if last_row {
                out.bottom_cells.push((as_u32(row_depth + dx), cell));
            }
        }
    }
}

/// Whether two group paths agree on their first `upto` segments. Missing
/// paths (a malformed response) never merge.
fn prefix_matches(a: Option<&Vec<CellValue>>, b: Option<&Vec<CellValue>>, upto: usize) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (0..upto).all(|i| {
            a.get(i).unwrap_or(&CellValue::Empty) == b.get(i).unwrap_or(&CellValue::Empty)
        }),
        _ => false,
    }
}

fn pad_path(path: &[CellValue], depth: usize) -> Vec<CellValue> {
    let mut padded = path.to_vec();
    padded.resize(depth, CellValue::Empty);
    padded
}

fn as_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
