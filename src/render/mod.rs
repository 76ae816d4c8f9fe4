//! Surface reconciliation with pluggable rendering surfaces.
//!
//! This module provides:
//! - The surface-agnostic `RenderSurface` trait and cell handles
//! - The built-in monospace `TextSurface` (primary, deterministic)
//! - The incremental reconciler and the per-pass autosizer

pub mod surface;
pub mod text;

pub(crate) mod autosize;
pub(crate) mod reconcile;

pub use surface::{CellHandle, Extent, RenderSurface, Section};
pub use text::TextSurface;
