//! Host adapter utilities for the `windowed` crate.
//!
//! The `windowed` crate is UI-agnostic and only does the math. This crate connects it to a host
//! through three small capability traits:
//!
//! - [`ScrollContainer`]: the scrollable box (scroll position, viewport size, `scroll_by`)
//! - [`ResizeObserver`]: per-element resize notifications
//! - [`ObservedElement`]: a rendered element with an identity and index markers
//!
//! On top of them it provides the scroll/viewport tracker, the element observation registry and
//! the measurement reconciler, and two controllers that drive a list or a grid end to end,
//! including anchor correction.
//!
//! This crate is framework-agnostic (no DOM or GUI toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod grid;
mod host;
mod reconciler;
mod registry;
mod tracker;


pub use controller::ListController;
pub use grid::GridController;
pub use host::{
    BoxSize, COLUMN_INDEX_MARKER, INDEX_MARKER, ObservedElement, ROW_INDEX_MARKER,
    ResizeObserver, ScrollContainer, ScrollPosition, ViewportSize,
};
pub use reconciler::{MarkerError, MeasurementReconciler, parse_index};
pub use registry::ObservationRegistry;
pub use tracker::ScrollTracker;
