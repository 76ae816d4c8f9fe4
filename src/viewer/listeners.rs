//! Listener seams: the data source and post-render style callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use super::ViewState;
use crate::error::Result;
use crate::render::RenderSurface;
use crate::types::{CellMeta, DataResponse, LogicalRect, MetaQuery};

/// The asynchronous data source of a grid view.
///
/// Called with the logical viewport whenever a new data slice is needed to
/// render. Implementations must resolve even for out-of-range requests
/// (before `num_rows`/`num_columns` are known) with a best-effort response;
/// returning an error aborts the draw pass and leaves the previous window
/// on screen.
#[async_trait(?Send)]
pub trait DataListener {
    /// Produce the slice covering `viewport`.
    async fn fetch(&self, viewport: LogicalRect) -> Result<DataResponse>;
}

/// Plain synchronous closures are data listeners too.
#[async_trait(?Send)]
impl<F> DataListener for F
where
    F: Fn(LogicalRect) -> Result<DataResponse>,
{
    async fn fetch(&self, viewport: LogicalRect) -> Result<DataResponse> {
        self(viewport)
    }
}

/// What a style listener sees after a draw pass: the rendering surface and
/// the freshly rebuilt metadata index.
///
/// The context re-borrows the shared view state per call instead of holding
/// a borrow across the listener's await points, so listeners are free to
/// call back into the view for reads. Structural mutation from inside a
/// listener is not protected by the draw scheduler.
pub struct RenderContext<S: RenderSurface> {
    state: Rc<RefCell<ViewState<S>>>,
}

impl<S: RenderSurface> RenderContext<S> {
    pub(crate) fn new(state: Rc<RefCell<ViewState<S>>>) -> Self {
        Self { state }
    }

    /// Metadata for a rendered cell or coordinate descriptor.
    pub fn get_meta(&self, query: MetaQuery) -> Option<CellMeta> {
        self.state.borrow().metadata.lookup(query).cloned()
    }

    /// Inspect the rendering surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow().surface)
    }

    /// The logical window of the pass that just completed.
    pub fn window(&self) -> LogicalRect {
        self.state.borrow().last_window
    }
}

/// A possibly-async callback invoked after every reconciliation pass, in
/// registration order.
#[async_trait(?Send)]
pub trait StyleListener<S: RenderSurface> {
    /// Style the freshly rendered window.
    async fn on_render(&mut self, ctx: &RenderContext<S>);
}

/// Plain synchronous closures are style listeners too.
#[async_trait(?Send)]
impl<S, F> StyleListener<S> for F
where
    S: RenderSurface,
    F: FnMut(&RenderContext<S>),
{
    async fn on_render(&mut self, ctx: &RenderContext<S>) {
        self(ctx);
    }
}
