//! Main GridView struct - the primary entry point for the engine.
//!
//! This module provides the `GridView` struct that handles:
//! - Owning the rendering surface, size caches and metadata index
//! - Coordinating viewport computation, data fetch and reconciliation
//! - Coalescing draw requests so one pass is in flight at a time
//! - Invoking style listeners and collecting frame statistics
//!
//! State lives in a single-owner `Rc<RefCell<..>>` driven by a cooperative
//! event loop; no borrow is held across an await point.

mod listeners;
mod scroll;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::debug;

pub use listeners::{DataListener, RenderContext, StyleListener};

use crate::error::{GridError, Result};
use crate::layout::{ColumnSizes, Viewport};
use crate::metadata::MetadataIndex;
use crate::perf::{DrawStats, PerfTracker};
use crate::render::autosize::autosize_pass;
use crate::render::reconcile::reconcile;
use crate::render::{RenderSurface, TextSurface};
use crate::scheduler::{DrawPhase, DrawScheduler};
use crate::types::{CellMeta, LogicalRect, MetaQuery};

/// Shared per-view state, mutated only by the active draw pass.
pub(crate) struct ViewState<S: RenderSurface> {
    pub(crate) surface: S,
    pub(crate) viewport: Viewport,
    pub(crate) sizes: ColumnSizes,
    pub(crate) metadata: MetadataIndex,
    pub(crate) listener: Option<Rc<dyn DataListener>>,
    pub(crate) style_listeners: Vec<(usize, Box<dyn StyleListener<S>>)>,
    pub(crate) next_style_key: usize,
    /// `(num_columns, num_rows)` from the most recent response.
    pub(crate) dims: Option<(u32, u32)>,
    pub(crate) last_window: LogicalRect,
    pub(crate) column_header_rows: u32,
    pub(crate) perf: PerfTracker,
}

/// A virtual-scrolling view over an arbitrarily large dataset.
///
/// The view fetches only the visible window from its [`DataListener`] and
/// incrementally reconciles it onto the rendering surface `S`. Cloning
/// produces another handle to the same view.
pub struct GridView<S: RenderSurface = TextSurface> {
    state: Rc<RefCell<ViewState<S>>>,
    scheduler: DrawScheduler,
}

impl<S: RenderSurface> Clone for GridView<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl Default for GridView<TextSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView<TextSurface> {
    /// Create a view rendering onto the built-in text surface.
    pub fn new() -> Self {
        Self::new_with_surface(TextSurface::new())
    }
}

impl<S: RenderSurface> GridView<S> {
    /// Create a view rendering onto `surface`.
    pub fn new_with_surface(surface: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewState {
                surface,
                viewport: Viewport::new(),
                sizes: ColumnSizes::new(),
                metadata: MetadataIndex::default(),
                listener: None,
                style_listeners: Vec::new(),
                next_style_key: 0,
                dims: None,
                last_window: LogicalRect::EMPTY,
                column_header_rows: 0,
                perf: PerfTracker::new(),
            })),
            scheduler: DrawScheduler::default(),
        }
    }

    /// Set the data listener called whenever a new data slice is needed.
    ///
    /// Draw calls fail with [`GridError::MissingListener`] until one is set.
    /// Replacing the listener invalidates the autosize caches and viewport
    /// bounds; a response already in flight is unaffected.
    pub fn set_data_listener(&self, listener: impl DataListener + 'static) {
        let mut s = self.state.borrow_mut();
        s.listener = Some(Rc::new(listener));
        s.dims = None;
        s.last_window = LogicalRect::EMPTY;
        s.sizes.reset_autosize();
    }

    /// Add a style listener, called after every re-render (draw calls and
    /// scroll-triggered passes alike). Returns a key for removal.
    pub fn add_style_listener(&self, listener: impl StyleListener<S> + 'static) -> usize {
        let mut s = self.state.borrow_mut();
        let key = s.next_style_key;
        s.next_style_key += 1;
        s.style_listeners.push((key, Box::new(listener)));
        key
    }

    /// Remove a style listener by its key. Returns whether it existed.
    pub fn remove_style_listener(&self, key: usize) -> bool {
        let mut s = self.state.borrow_mut();
        let before = s.style_listeners.len();
        s.style_listeners.retain(|(k, _)| *k != key);
        s.style_listeners.len() != before
    }

    /// Resize the client area. Takes effect on the next draw.
    pub fn resize(&self, width: f32, height: f32) {
        self.state.borrow_mut().viewport.resize(width, height);
    }

    /// The current viewport state.
    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport.clone()
    }

    /// The logical window of the most recent completed pass.
    pub fn last_window(&self) -> LogicalRect {
        self.state.borrow().last_window
    }

    /// Where the active draw pass currently is.
    pub fn draw_phase(&self) -> DrawPhase {
        self.scheduler.phase()
    }

    /// Inspect the rendering surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow().surface)
    }

    /// Metadata for a rendered cell or coordinate descriptor, resolved
    /// against the current window.
    pub fn get_meta(&self, query: MetaQuery) -> Option<CellMeta> {
        self.state.borrow().metadata.lookup(query).cloned()
    }

    /// Performance statistics aggregated since the previous call. Reading
    /// resets the accumulators.
    pub fn get_draw_fps(&self) -> DrawStats {
        self.state.borrow_mut().perf.read()
    }

    /// Request a draw. Overlapping requests coalesce: while a pass is in
    /// flight, any number of further requests collapse into one trailing
    /// pass with a freshly computed viewport, and every caller resolves
    /// once the pass covering its request completes.
    pub async fn draw(&self) -> Result<()> {
        let ticket = self.scheduler.request();
        if !self.scheduler.try_drive() {
            return self.scheduler.wait(ticket).await;
        }
        let result = loop {
            let target = self.scheduler.latest();
            let result = self.draw_pass().await;
            self.scheduler.finish_pass(target, &result);
            if self.scheduler.latest() == target {
                break result;
            }
            debug!("draw requests arrived mid-pass; running trailing pass");
        };
        self.scheduler.stop_driving();
        result
    }

    /// Wait for any in-flight and pending draw to complete. A synonym for
    /// [`GridView::draw`], used by programmatic scroll operations that must
    /// observe post-render layout.
    pub async fn flush(&self) -> Result<()> {
        self.draw().await
    }

    /// One full reconciliation pass: viewport -> fetch -> patch -> autosize
    /// -> metadata -> style listeners -> perf sample.
    async fn draw_pass(&self) -> Result<()> {
        let started = Instant::now();
        let (listener, window) = {
            let s = self.state.borrow();
            let listener = s.listener.clone().ok_or(GridError::MissingListener)?;
            (listener, s.viewport.window(&s.sizes, s.dims))
        };
        if window.is_empty() {
            debug!("viewport has no visible extent; draw is a no-op");
            return Ok(());
        }

        self.scheduler.set_phase(DrawPhase::Fetching);
        debug!(
            "fetching window x {}..{} y {}..{}",
            window.x0, window.x1, window.y0, window.y1
        );
        let response = listener.fetch(window).await.map_err(|e| match e {
            GridError::Fetch(msg) => GridError::Fetch(msg),
            other => GridError::Fetch(other.to_string()),
        })?;

        self.scheduler.set_phase(DrawPhase::Reconciling);
        {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            s.dims = Some((response.num_columns, response.num_rows));
            let window = window.clamp_to(response.num_columns, response.num_rows);
            let pass = reconcile(&mut s.surface, &response, &window, s.column_header_rows);
            autosize_pass(&mut s.surface, &mut s.sizes, &pass);
            s.sizes.set_row_header_columns(pass.row_header_columns);
            s.column_header_rows = pass.column_header_rows;
            s.metadata = pass.metadata;
            s.last_window = window;
        }

        self.run_style_listeners().await;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.state.borrow_mut().perf.record(elapsed_ms);
        Ok(())
    }

    async fn run_style_listeners(&self) {
        let mut listeners = std::mem::take(&mut self.state.borrow_mut().style_listeners);
        if !listeners.is_empty() {
            let ctx = RenderContext::new(Rc::clone(&self.state));
            for (_key, listener) in &mut listeners {
                listener.on_render(&ctx).await;
            }
        }
        // Listeners registered while the phase ran go after the existing
        // ones, preserving registration order.
        let mut s = self.state.borrow_mut();
        let added = std::mem::take(&mut s.style_listeners);
        s.style_listeners = listeners;
        s.style_listeners.extend(added);
    }

    /// Clear the rendering surface and all caches. Scroll position is
    /// retained.
    pub fn clear(&self) {
        let mut s = self.state.borrow_mut();
        s.surface.clear();
        s.metadata = MetadataIndex::default();
        s.sizes.reset_autosize();
        s.sizes.reset_extent();
        s.dims = None;
        s.last_window = LogicalRect::EMPTY;
        s.column_header_rows = 0;
    }

    /// Reset the scroll position back to the origin and invalidate the
    /// viewport bounds and autosize caches.
    pub fn reset_scroll(&self) {
        let mut s = self.state.borrow_mut();
        s.viewport.scroll_x = 0.0;
        s.viewport.scroll_y = 0.0;
        s.sizes.reset_autosize();
        s.sizes.reset_extent();
        s.last_window = LogicalRect::EMPTY;
    }

    /// Reset column autosizing, such that column sizes will be recalculated
    /// on the next draw call. Width pins on rendered header cells are
    /// released immediately.
    pub fn reset_autosize(&self) {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        s.sizes.reset_autosize();
        if let Some(level) = s.metadata.column_header_depth().checked_sub(1) {
            for cell in s.metadata.column_header_cells(level) {
                s.surface.set_column_width(cell, None);
            }
        }
    }

    /// Set a user width override for a column slot. Overrides beat measured
    /// widths and survive autosizing; they take effect on the next draw.
    pub fn set_column_width_override(&self, size_key: u32, width: f32) {
        self.state.borrow_mut().sizes.set_override(size_key, width);
    }

    /// Remove a user width override. Returns whether one existed.
    pub fn clear_column_width_override(&self, size_key: u32) -> bool {
        self.state.borrow_mut().sizes.clear_override(size_key)
    }
}
