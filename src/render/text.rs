//! In-memory monospace surface.
//!
//! `TextSurface` realizes the table as a grid of text cells with
//! deterministic glyph metrics. It is the reference surface used by the
//! test suite and benchmarks, and a reasonable starting point for terminal
//! embeddings.

use std::collections::HashMap;

use super::surface::{CellHandle, Extent, RenderSurface, Section};
use crate::types::CellValue;

/// Advance width of one glyph in pixels.
pub const CHAR_WIDTH: f32 = 8.0;

/// Horizontal padding applied to each side of a cell's content.
pub const CELL_PADDING: f32 = 4.0;

/// Rendered height of one row in pixels.
pub const LINE_HEIGHT: f32 = 20.0;

#[derive(Debug, Default)]
struct TextCell {
    content: String,
    col_span: usize,
    row_span: usize,
    pinned_width: Option<f32>,
}

#[derive(Debug, Default)]
struct RowSlots {
    slots: Vec<u64>,
    visible: usize,
}

#[derive(Debug, Default)]
struct SectionGrid {
    rows: Vec<RowSlots>,
    visible_rows: usize,
}

/// A rendering surface backed by an arena of text cells.
///
/// Cell ids are minted monotonically (starting at 1; 0 is never issued)
/// and never reissued, so handles from a cleared surface can never alias a
/// live cell. Truncation only hides; hidden rows and cells are reused,
/// identity intact, when the window grows back.
#[derive(Debug)]
pub struct TextSurface {
    cells: HashMap<u64, TextCell>,
    header: SectionGrid,
    body: SectionGrid,
    next_id: u64,
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            header: SectionGrid::default(),
            body: SectionGrid::default(),
            next_id: 1,
        }
    }

    fn grid(&self, section: Section) -> &SectionGrid {
        match section {
            Section::ColumnHeader => &self.header,
            Section::Body => &self.body,
        }
    }

    fn grid_mut(&mut self, section: Section) -> &mut SectionGrid {
        match section {
            Section::ColumnHeader => &mut self.header,
            Section::Body => &mut self.body,
        }
    }

    /// Number of currently visible rows in a section.
    pub fn visible_row_count(&self, section: Section) -> usize {
        self.grid(section).visible_rows
    }

    /// Number of allocated rows (visible or hidden) in a section.
    pub fn allocated_row_count(&self, section: Section) -> usize {
        self.grid(section).rows.len()
    }

    /// Number of visible cells in a row.
    pub fn visible_column_count(&self, section: Section, ridx: usize) -> usize {
        self.grid(section).rows.get(ridx).map_or(0, |r| r.visible)
    }

    /// Look up an already-allocated cell without creating or un-hiding it.
    pub fn peek_cell(&self, section: Section, ridx: usize, cidx: usize) -> Option<CellHandle> {
        self.grid(section)
            .rows
            .get(ridx)
            .and_then(|r| r.slots.get(cidx))
            .map(|&id| CellHandle::new(id))
    }

    /// A cell's rendered text, if the handle is live.
    pub fn content_of(&self, cell: CellHandle) -> Option<&str> {
        self.cells.get(&cell.id()).map(|c| c.content.as_str())
    }

    /// A cell's pinned width, if the handle is live and a pin is set.
    pub fn pinned_width_of(&self, cell: CellHandle) -> Option<f32> {
        self.cells.get(&cell.id()).and_then(|c| c.pinned_width)
    }

    /// A cell's `(col_span, row_span)`.
    pub fn span_of(&self, cell: CellHandle) -> (usize, usize) {
        self.cells
            .get(&cell.id())
            .map_or((1, 1), |c| (c.col_span.max(1), c.row_span.max(1)))
    }

    /// The visible cells of a row joined with `|`, for assertions.
    pub fn row_text(&self, section: Section, ridx: usize) -> String {
        let Some(row) = self.grid(section).rows.get(ridx) else {
            return String::new();
        };
        row.slots
            .iter()
            .take(row.visible)
            .map(|id| {
                self.cells
                    .get(id)
                    .map_or(String::new(), |c| c.content.clone())
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    fn drop_section_cells(cells: &mut HashMap<u64, TextCell>, grid: &mut SectionGrid) {
        for row in grid.rows.drain(..) {
            for id in row.slots {
                cells.remove(&id);
            }
        }
        grid.visible_rows = 0;
    }
}

impl RenderSurface for TextSurface {
    fn cell(&mut self, section: Section, ridx: usize, cidx: usize) -> CellHandle {
        let next_id = &mut self.next_id;
        let grid = match section {
            Section::ColumnHeader => &mut self.header,
            Section::Body => &mut self.body,
        };
        while grid.rows.len() <= ridx {
            grid.rows.push(RowSlots::default());
        }
        grid.visible_rows = grid.visible_rows.max(ridx + 1);

        let mut minted = Vec::new();
        let Some(row) = grid.rows.get_mut(ridx) else {
            // Unreachable by construction; keep the surface total anyway.
            return CellHandle::new(0);
        };
        while row.slots.len() <= cidx {
            let id = *next_id;
            *next_id += 1;
            row.slots.push(id);
            minted.push(id);
        }
        row.visible = row.visible.max(cidx + 1);
        let handle = row.slots.get(cidx).copied().unwrap_or(0);
        for id in minted {
            self.cells.insert(id, TextCell::default());
        }
        CellHandle::new(handle)
    }

    fn set_content(&mut self, cell: CellHandle, value: &CellValue) {
        if let Some(c) = self.cells.get_mut(&cell.id()) {
            c.content = value.to_string();
        }
    }

    fn set_span(&mut self, cell: CellHandle, col_span: usize, row_span: usize) {
        if let Some(c) = self.cells.get_mut(&cell.id()) {
            c.col_span = col_span;
            c.row_span = row_span;
        }
    }

    fn measure(&self, cell: CellHandle) -> Extent {
        self.cells.get(&cell.id()).map_or(Extent::default(), |c| {
            let glyphs = c.content.chars().count() as f32;
            Extent {
                width: glyphs * CHAR_WIDTH + 2.0 * CELL_PADDING,
                height: LINE_HEIGHT,
            }
        })
    }

    fn set_column_width(&mut self, cell: CellHandle, width: Option<f32>) {
        if let Some(c) = self.cells.get_mut(&cell.id()) {
            c.pinned_width = width;
        }
    }

    fn truncate_rows(&mut self, section: Section, keep: usize) {
        let grid = self.grid_mut(section);
        grid.visible_rows = grid.visible_rows.min(keep);
    }

    fn truncate_columns(&mut self, section: Section, ridx: usize, keep: usize) {
        if let Some(row) = self.grid_mut(section).rows.get_mut(ridx) {
            row.visible = row.visible.min(keep);
        }
    }

    fn clear_section(&mut self, section: Section) {
        let cells = &mut self.cells;
        match section {
            Section::ColumnHeader => Self::drop_section_cells(cells, &mut self.header),
            Section::Body => Self::drop_section_cells(cells, &mut self.body),
        }
    }

    fn clear(&mut self) {
        let cells = &mut self.cells;
        Self::drop_section_cells(cells, &mut self.header);
        Self::drop_section_cells(cells, &mut self.body);
        self.cells.clear();
    }
}
