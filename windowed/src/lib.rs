//! A headless windowing engine for long lists and large grids.
//!
//! For host integration (scroll containers, resize observers, controllers), see the
//! `windowed-adapter` crate.
//!
//! Given a collection, an item size source and a scrollable viewport, the engine computes the
//! range of items worth rendering, the offset of each of them and the total scrollable extent.
//! Items without a known size are laid out from an estimate and re-laid out once the host
//! reports their measured size. When a measurement lands above the viewport the engine reports
//! the scroll correction that keeps the visible content in place.
//!
//! It is UI-agnostic. The host layer is expected to provide:
//! - viewport size (height/width)
//! - scroll offsets
//! - item size estimates and (optionally) measured sizes
//! - a millisecond clock for the `is_scrolling` debounce
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod axis;
mod cache;
mod debounce;
mod error;
mod grid;
mod key;
mod list;
mod options;
mod range;
mod resolver;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use axis::AxisState;
pub use cache::{CellKey, ColumnWidthCache, MeasuredSizeCache, MeasuredSizes};
pub use debounce::ScrollingDebouncer;
pub use error::{ConfigError, ConfigResult};
pub use grid::VirtualGrid;
pub use list::VirtualList;
pub use options::{
    AxisOptions, DEFAULT_COLUMN_OVERSCAN, DEFAULT_LIST_OVERSCAN, DEFAULT_ROW_OVERSCAN,
    DEFAULT_SCROLLING_DELAY_MS, EvictionPolicy, FixedSize, GridOptions, KeyFn, ListOptions,
    SizeFn,
};
pub use range::{AxisLayout, RangeResult, compute_range, compute_uniform_range};
pub use resolver::SizeResolver;
pub use state::{GridSnapshot, ListSnapshot};
pub use types::{
    Align, Axis, AxisPhase, Item, Observation, ScrollDirection, SizeUpdate, WindowRange,
};

/// Default item key: the item's index.
pub type ItemKey = u64;

#[doc(hidden)]
pub use key::{KeyCacheKey, KeySet};
