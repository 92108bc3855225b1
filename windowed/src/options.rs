use alloc::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::{Axis, ItemKey};

/// Per-item size function (index → size).
pub type SizeFn = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Per-item key function (index → stable identity).
pub type KeyFn<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

pub const DEFAULT_LIST_OVERSCAN: usize = 3;
pub const DEFAULT_ROW_OVERSCAN: usize = 1;
pub const DEFAULT_COLUMN_OVERSCAN: usize = 3;
pub const DEFAULT_SCROLLING_DELAY_MS: u64 = 100;

/// A size that is known up front and never measured.
#[derive(Clone)]
pub enum FixedSize {
    /// Every item has the same size. Ranges are computed by division instead of a scan.
    Uniform(u32),
    /// A known size per item.
    PerItem(SizeFn),
}

impl core::fmt::Debug for FixedSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uniform(size) => f.debug_tuple("Uniform").field(size).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// The validated size source of an axis.
#[derive(Clone)]
pub(crate) enum Sizing {
    Uniform(u32),
    Fixed(SizeFn),
    Estimated(SizeFn),
}

impl Sizing {
    pub(crate) fn is_fixed(&self) -> bool {
        !matches!(self, Self::Estimated(_))
    }
}

/// Configuration of one axis.
///
/// Closures are stored in `Arc`s so options stay cheap to clone.
pub struct AxisOptions<K = ItemKey> {
    pub count: usize,
    /// Known sizes. Takes precedence over measurements and estimates.
    pub fixed_size: Option<FixedSize>,
    /// Size used for items that have not been measured yet.
    pub estimate_size: Option<SizeFn>,
    pub get_item_key: KeyFn<K>,
    /// Extra items rendered past each edge of the viewport.
    pub overscan: usize,
}

impl<K> Clone for AxisOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            fixed_size: self.fixed_size.clone(),
            estimate_size: self.estimate_size.clone(),
            get_item_key: Arc::clone(&self.get_item_key),
            overscan: self.overscan,
        }
    }
}

impl AxisOptions<ItemKey> {
    /// Creates options for an axis keyed by index (`ItemKey = u64`).
    ///
    /// No size source is set; pick one with `with_uniform_size`, `with_fixed_size` or
    /// `with_estimate_size`.
    pub fn new(count: usize) -> Self {
        Self::new_with_key(count, |i| i as u64)
    }
}

impl<K> AxisOptions<K> {
    /// Creates options with a custom key mapping.
    ///
    /// Measured sizes are cached by key, so `get_item_key(i)` should return a stable identity
    /// for the item at index `i` to keep measurements across reordering.
    pub fn new_with_key(
        count: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            fixed_size: None,
            estimate_size: None,
            get_item_key: Arc::new(get_item_key),
            overscan: DEFAULT_LIST_OVERSCAN,
        }
    }

    pub fn with_uniform_size(mut self, size: u32) -> Self {
        self.fixed_size = Some(FixedSize::Uniform(size));
        self
    }

    pub fn with_fixed_size(mut self, size: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        self.fixed_size = Some(FixedSize::PerItem(Arc::new(size)));
        self
    }

    pub fn with_estimate_size(
        mut self,
        estimate: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_size = Some(Arc::new(estimate));
        self
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Checks that a size source is configured.
    pub fn validate(&self, axis: Axis) -> ConfigResult<()> {
        self.sizing(axis).map(|_| ())
    }

    pub(crate) fn sizing(&self, axis: Axis) -> ConfigResult<Sizing> {
        match (&self.fixed_size, &self.estimate_size) {
            (Some(FixedSize::Uniform(size)), _) => Ok(Sizing::Uniform(*size)),
            (Some(FixedSize::PerItem(f)), _) => Ok(Sizing::Fixed(Arc::clone(f))),
            (None, Some(f)) => Ok(Sizing::Estimated(Arc::clone(f))),
            (None, None) => Err(ConfigError::missing_size_function(axis)),
        }
    }
}

impl<K> core::fmt::Debug for AxisOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisOptions")
            .field("count", &self.count)
            .field("fixed_size", &self.fixed_size)
            .field("has_estimate_size", &self.estimate_size.is_some())
            .field("overscan", &self.overscan)
            .finish_non_exhaustive()
    }
}

/// What happens to cached measurements whose keys leave the collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvictionPolicy {
    /// Keep every entry until `reset_measurements`/`prune_measurements` is called.
    Retain,
    /// Drop entries for keys no longer produced by `get_item_key` whenever the count changes.
    #[default]
    PruneOnCountChange,
}

/// Configuration for [`crate::VirtualList`].
pub struct ListOptions<K = ItemKey> {
    pub items: AxisOptions<K>,
    /// Quiet period after the last scroll event before `is_scrolling` resets.
    pub scrolling_delay_ms: u64,
    pub eviction: EvictionPolicy,
}

impl<K> Clone for ListOptions<K> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            scrolling_delay_ms: self.scrolling_delay_ms,
            eviction: self.eviction,
        }
    }
}

impl<K> ListOptions<K> {
    pub fn new(items: AxisOptions<K>) -> Self {
        Self {
            items,
            scrolling_delay_ms: DEFAULT_SCROLLING_DELAY_MS,
            eviction: EvictionPolicy::default(),
        }
    }

    pub fn with_scrolling_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_delay_ms = delay_ms;
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }
}

impl<K> core::fmt::Debug for ListOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("items", &self.items)
            .field("scrolling_delay_ms", &self.scrolling_delay_ms)
            .field("eviction", &self.eviction)
            .finish()
    }
}

/// Configuration for [`crate::VirtualGrid`].
///
/// Rows default to an overscan of 1 and columns to 3.
pub struct GridOptions<R = ItemKey, C = ItemKey> {
    pub rows: AxisOptions<R>,
    pub columns: AxisOptions<C>,
    pub scrolling_delay_ms: u64,
    pub eviction: EvictionPolicy,
}

impl<R, C> Clone for GridOptions<R, C> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            scrolling_delay_ms: self.scrolling_delay_ms,
            eviction: self.eviction,
        }
    }
}

impl<R, C> GridOptions<R, C> {
    /// Creates grid options, applying the per-axis default overscans.
    pub fn new(rows: AxisOptions<R>, columns: AxisOptions<C>) -> Self {
        Self {
            rows: rows.with_overscan(DEFAULT_ROW_OVERSCAN),
            columns: columns.with_overscan(DEFAULT_COLUMN_OVERSCAN),
            scrolling_delay_ms: DEFAULT_SCROLLING_DELAY_MS,
            eviction: EvictionPolicy::default(),
        }
    }

    pub fn with_scrolling_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_delay_ms = delay_ms;
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn with_overscan(mut self, rows: usize, columns: usize) -> Self {
        self.rows.overscan = rows;
        self.columns.overscan = columns;
        self
    }
}

impl<R, C> core::fmt::Debug for GridOptions<R, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("scrolling_delay_ms", &self.scrolling_delay_ms)
            .field("eviction", &self.eviction)
            .finish()
    }
}
