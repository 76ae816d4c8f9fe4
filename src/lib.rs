//! gridview - virtual-scrolling grid engine
//!
//! Renders an arbitrarily large two-dimensional dataset as a bounded-size
//! table by fetching only the visible window from an asynchronous data
//! listener and incrementally reconciling it onto a rendering surface:
//! - Viewport windowing from cached size estimates, with overscan
//! - Index-by-index surface reuse (shrink hides, growth reuses)
//! - Hierarchical row/column group headers with span merging
//! - One-shot column autosizing with user overrides
//! - Coalesced draw scheduling (bursts collapse to one trailing pass)
//! - Per-cell metadata lookup and draw-rate statistics
//!
//! # Usage
//!
//! ```
//! use gridview::{CellValue, DataResponse, GridView, LogicalRect};
//!
//! let view = GridView::new();
//! view.resize(640.0, 400.0);
//! view.set_data_listener(|window: LogicalRect| -> gridview::Result<DataResponse> {
//!     let data = (window.x0..window.x1)
//!         .map(|x| {
//!             (window.y0..window.y1)
//!                 .map(|y| CellValue::Text(format!("{x},{y}")))
//!                 .collect()
//!         })
//!         .collect();
//!     Ok(DataResponse {
//!         num_rows: 1_000_000,
//!         num_columns: 26,
//!         data,
//!         ..DataResponse::default()
//!     })
//! });
//! // view.draw().await?; from any single-threaded async context
//! ```

pub mod error;
pub mod layout;
pub mod metadata;
pub mod perf;
pub mod render;
pub mod scheduler;
pub mod types;
pub mod viewer;

pub use error::{GridError, Result};
pub use metadata::MetadataIndex;
pub use perf::DrawStats;
pub use render::{CellHandle, Extent, RenderSurface, Section, TextSurface};
pub use scheduler::DrawPhase;
pub use viewer::{DataListener, GridView, RenderContext, StyleListener};

pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
