//! Common test utilities and fixture data sources.
//!
//! Provides deterministic virtual datasets for driving a `GridView` in
//! tests: every cell renders as `"{x},{y}"`, and optional group headers
//! follow a fixed band/group layout so span merging is predictable.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use gridview::{CellValue, DataListener, DataResponse, GridError, LogicalRect, Result};

/// Build the response slice a well-behaved dataset would return for
/// `window`, clamped to the dataset dimensions.
pub fn slice_response(
    window: LogicalRect,
    num_columns: u32,
    num_rows: u32,
    with_row_headers: bool,
    with_column_headers: bool,
) -> DataResponse {
    let w = window.clamp_to(num_columns, num_rows);
    let data = (w.x0..w.x1)
        .map(|x| {
            (w.y0..w.y1)
                .map(|y| CellValue::Text(format!("{x},{y}")))
                .collect()
        })
        .collect();
    let row_headers = with_row_headers.then(|| {
        (w.y0..w.y1)
            .map(|y| {
                vec![
                    CellValue::Text(format!("band {}", y / 10)),
                    CellValue::Text(format!("row {y}")),
                ]
            })
            .collect()
    });
    let column_headers = with_column_headers.then(|| {
        (w.x0..w.x1)
            .map(|x| {
                vec![
                    CellValue::Text(format!("group {}", x / 2)),
                    CellValue::Text(format!("col {x}")),
                ]
            })
            .collect()
    });
    DataResponse {
        num_rows,
        num_columns,
        data,
        row_headers,
        column_headers,
    }
}

/// A deterministic data source that records every fetch it serves.
pub struct CountingSource {
    pub num_columns: u32,
    pub num_rows: u32,
    pub with_row_headers: bool,
    pub with_column_headers: bool,
    /// Yield to the scheduler once per fetch, so overlapping draw requests
    /// can pile up behind an in-flight pass.
    pub yields: bool,
    /// When set, fetches fail with `GridError::Fetch`.
    pub fail: Rc<Cell<bool>>,
    /// Count of successfully served fetches.
    pub fetches: Rc<Cell<usize>>,
    /// Every window served, in order.
    pub windows: Rc<RefCell<Vec<LogicalRect>>>,
}

impl CountingSource {
    pub fn new(num_columns: u32, num_rows: u32) -> Self {
        Self {
            num_columns,
            num_rows,
            with_row_headers: false,
            with_column_headers: false,
            yields: false,
            fail: Rc::new(Cell::new(false)),
            fetches: Rc::new(Cell::new(0)),
            windows: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_headers(mut self) -> Self {
        self.with_row_headers = true;
        self.with_column_headers = true;
        self
    }

    pub fn yielding(mut self) -> Self {
        self.yields = true;
        self
    }

    /// Handles for asserting on fetch activity after the source has been
    /// moved into the view.
    pub fn probes(
        &self,
    ) -> (
        Rc<Cell<usize>>,
        Rc<RefCell<Vec<LogicalRect>>>,
        Rc<Cell<bool>>,
    ) {
        (
            Rc::clone(&self.fetches),
            Rc::clone(&self.windows),
            Rc::clone(&self.fail),
        )
    }
}

#[async_trait(?Send)]
impl DataListener for CountingSource {
    async fn fetch(&self, window: LogicalRect) -> Result<DataResponse> {
        if self.yields {
            tokio::task::yield_now().await;
        }
        if self.fail.get() {
            return Err(GridError::Fetch("fixture failure".to_string()));
        }
        self.fetches.set(self.fetches.get() + 1);
        self.windows.borrow_mut().push(window);
        Ok(slice_response(
            window,
            self.num_columns,
            self.num_rows,
            self.with_row_headers,
            self.with_column_headers,
        ))
    }
}

/// A source that claims a larger dataset than it delivers: `data` stops at
/// `delivered_rows` even though `num_rows` says otherwise.
pub struct ShortSource {
    pub num_columns: u32,
    pub num_rows: u32,
    pub delivered_rows: u32,
}

#[async_trait(?Send)]
impl DataListener for ShortSource {
    async fn fetch(&self, window: LogicalRect) -> Result<DataResponse> {
        let mut response = slice_response(window, self.num_columns, self.num_rows, false, false);
        let keep = self.delivered_rows.saturating_sub(window.y0) as usize;
        for column in &mut response.data {
            column.truncate(keep);
        }
        Ok(response)
    }
}
