//! Metadata index tests
//!
//! Tests for handle and coordinate lookups, the size_key scheme, staleness
//! across passes, and serde output of the public records.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::CountingSource;
use gridview::{CellValue, GridView, MetaQuery, Section};

#[tokio::test]
async fn test_body_metadata_matches_position() {
    let view = GridView::new();
    view.resize(320.0, 100.0);
    view.set_data_listener(CountingSource::new(10, 100).with_headers());
    view.draw().await.unwrap();

    let window = view.last_window();
    let row_header_columns = 2u32;

    let meta = view.get_meta(MetaQuery::Body { dx: 1, dy: 2 }).unwrap();
    assert_eq!(meta.x, Some(window.x0 + 1));
    assert_eq!(meta.y, Some(window.y0 + 2));
    assert_eq!(meta.dx, Some(1));
    assert_eq!(meta.dy, Some(2));
    assert_eq!((meta.x0, meta.y0, meta.x1, meta.y1), (window.x0, window.y0, window.x1, window.y1));
    assert_eq!(
        meta.size_key,
        Some(1 + row_header_columns),
        "size_key is x plus the row-header column count"
    );
    assert_eq!(meta.value, Some(CellValue::Text("1,2".to_string())));
    assert_eq!(
        meta.row_header,
        Some(vec![
            CellValue::Text("band 0".to_string()),
            CellValue::Text("row 2".to_string()),
        ])
    );

    // The same record is reachable through the rendered cell's identity.
    let handle = view
        .with_surface(|s| s.peek_cell(Section::Body, 2, (row_header_columns + 1) as usize))
        .unwrap();
    assert_eq!(view.get_meta(MetaQuery::Cell(handle)).unwrap(), meta);
}

#[tokio::test]
async fn test_row_and_column_header_lookups() {
    let view = GridView::new();
    view.resize(320.0, 100.0);
    view.set_data_listener(CountingSource::new(10, 100).with_headers());
    view.draw().await.unwrap();

    let row_meta = view
        .get_meta(MetaQuery::RowHeader {
            row_header_x: 1,
            y: 3,
        })
        .unwrap();
    assert_eq!(row_meta.row_header_x, Some(1));
    assert_eq!(row_meta.dy, Some(3));
    assert_eq!(row_meta.size_key, Some(1), "row-header slots use their level");
    assert_eq!(row_meta.value, Some(CellValue::Text("row 3".to_string())));

    let col_meta = view
        .get_meta(MetaQuery::ColumnHeader {
            column_header_y: 1,
            x: 2,
        })
        .unwrap();
    assert_eq!(col_meta.column_header_y, Some(1));
    assert_eq!(col_meta.value, Some(CellValue::Text("col 2".to_string())));
    assert_eq!(col_meta.size_key, Some(2 + 2), "leaf headers carry size_key");

    // A pivot depth not present in the current response misses.
    assert!(view
        .get_meta(MetaQuery::RowHeader {
            row_header_x: 2,
            y: 0,
        })
        .is_none());
    assert!(view
        .get_meta(MetaQuery::ColumnHeader {
            column_header_y: 7,
            x: 0,
        })
        .is_none());
}

#[tokio::test]
async fn test_stale_cells_miss_after_superseding_pass() {
    let view = GridView::new();
    view.resize(320.0, 400.0);
    view.set_data_listener(CountingSource::new(10, 1_000));
    view.draw().await.unwrap();

    let deep_rows = view.with_surface(|s| s.visible_row_count(Section::Body));
    let deep_cell = view
        .with_surface(|s| s.peek_cell(Section::Body, deep_rows - 1, 0))
        .unwrap();
    assert!(view.get_meta(MetaQuery::Cell(deep_cell)).is_some());

    // Shrink the window; the deep row is no longer part of the pass.
    view.resize(320.0, 100.0);
    view.draw().await.unwrap();
    assert!(
        view.get_meta(MetaQuery::Cell(deep_cell)).is_none(),
        "cells outside the superseding pass return no metadata"
    );
}

#[tokio::test]
async fn test_clear_invalidates_all_handles() {
    let view = GridView::new();
    view.resize(320.0, 100.0);
    view.set_data_listener(CountingSource::new(10, 100));
    view.draw().await.unwrap();

    let cell = view
        .with_surface(|s| s.peek_cell(Section::Body, 0, 0))
        .unwrap();
    view.clear();
    assert!(view.get_meta(MetaQuery::Cell(cell)).is_none());

    view.draw().await.unwrap();
    assert!(
        view.get_meta(MetaQuery::Cell(cell)).is_none(),
        "handles from before clear() never alias rebuilt cells"
    );
    let fresh = view
        .with_surface(|s| s.peek_cell(Section::Body, 0, 0))
        .unwrap();
    assert_ne!(cell, fresh);
    assert!(view.get_meta(MetaQuery::Cell(fresh)).is_some());
}

#[tokio::test]
async fn test_metadata_serializes() {
    let view = GridView::new();
    view.resize(320.0, 100.0);
    view.set_data_listener(CountingSource::new(10, 100).with_headers());
    view.draw().await.unwrap();

    let meta = view.get_meta(MetaQuery::Body { dx: 0, dy: 0 }).unwrap();
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["x"], 0);
    assert_eq!(json["y"], 0);
    assert_eq!(json["size_key"], 2);

    let stats = view.get_draw_fps();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["num_frames"], 1);
}
