use alloc::vec::Vec;

use crate::axis::AxisState;
use crate::cache::MeasuredSizeCache;
use crate::debounce::ScrollingDebouncer;
use crate::error::ConfigResult;
use crate::key::{KeyCacheKey, KeySet};
use crate::options::{EvictionPolicy, ListOptions};
use crate::range::RangeResult;
use crate::state::ListSnapshot;
use crate::{Align, Axis, AxisPhase, Item, ItemKey, Observation, ScrollDirection, SizeUpdate};

/// A vertically windowed list.
///
/// This type is UI-agnostic: the host feeds it scroll offsets, the viewport height and
/// measured item heights, and reads back the items to render. The measured-size cache belongs to
/// the instance, so several lists can coexist without sharing state.
#[derive(Clone, Debug)]
pub struct VirtualList<K = ItemKey> {
    axis: AxisState<K>,
    cache: MeasuredSizeCache<K>,
    scrolling: ScrollingDebouncer,
    eviction: EvictionPolicy,
}

impl<K: KeyCacheKey + Clone> VirtualList<K> {
    /// Creates a list, failing when the items have neither a fixed size nor an estimate.
    pub fn new(options: ListOptions<K>) -> ConfigResult<Self> {
        Ok(Self {
            axis: AxisState::new(Axis::Vertical, options.items)?,
            cache: MeasuredSizeCache::new(),
            scrolling: ScrollingDebouncer::new(options.scrolling_delay_ms),
            eviction: options.eviction,
        })
    }

    pub fn axis(&self) -> &AxisState<K> {
        &self.axis
    }

    /// Replaces the options. Cached measurements are kept (and pruned per the eviction policy
    /// when the count changes).
    pub fn set_options(&mut self, options: ListOptions<K>) -> ConfigResult<()> {
        let prev_count = self.axis.count();
        self.axis.set_options(options.items)?;
        self.scrolling.set_delay_ms(options.scrolling_delay_ms);
        self.eviction = options.eviction;
        if self.axis.count() != prev_count {
            self.on_count_changed();
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.axis.count()
    }

    pub fn set_count(&mut self, count: usize) {
        if self.axis.set_count(count) {
            self.on_count_changed();
        }
    }

    fn on_count_changed(&mut self) {
        if self.eviction == EvictionPolicy::PruneOnCountChange {
            self.prune_measurements();
        }
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.axis.set_overscan(overscan);
    }

    /// Changes the index → key mapping (e.g. after the collection was reordered).
    ///
    /// Cached sizes follow their keys to the new indexes.
    pub fn set_get_item_key(&mut self, f: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.axis.set_get_item_key(f);
    }

    pub fn key_for(&self, index: usize) -> K {
        self.axis.key_for(index)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.axis.scroll_offset()
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.axis.set_scroll_offset(offset);
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.axis.scroll_direction()
    }

    pub fn viewport_extent(&self) -> u32 {
        self.axis.viewport_extent()
    }

    pub fn set_viewport_extent(&mut self, extent: u32) {
        self.axis.set_viewport_extent(extent);
    }

    /// Applies a scroll notification from the host and marks the list as scrolling.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, "VirtualList::apply_scroll_event");
        self.axis.set_scroll_offset(offset);
        self.scrolling.notify_scroll(now_ms);
    }

    /// Runs the `is_scrolling` debounce. Returns `true` when scrolling just stopped.
    pub fn update_scrolling(&mut self, now_ms: u64) -> bool {
        self.scrolling.poll(now_ms)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling.is_scrolling()
    }

    pub fn scrolling(&self) -> &ScrollingDebouncer {
        &self.scrolling
    }

    /// Cancels the pending `is_scrolling` reset (teardown).
    pub fn cancel_scrolling(&mut self) {
        self.scrolling.cancel();
    }

    /// Returns the items to render for the current scroll offset and viewport.
    pub fn compute_range(&mut self) -> &RangeResult<K> {
        self.axis.compute(&self.cache)
    }

    pub fn total_extent(&mut self) -> u64 {
        self.compute_range().total_extent
    }

    pub fn phase(&self) -> AxisPhase {
        self.axis.phase()
    }

    pub fn item(&mut self, index: usize) -> Option<Item<K>> {
        self.axis.item(index, &self.cache)
    }

    pub fn index_at_offset(&mut self, offset: u64) -> Option<usize> {
        self.axis.index_at_offset(offset, &self.cache)
    }

    pub fn scroll_to_index_offset(&mut self, index: usize, align: Align) -> u64 {
        self.axis.scroll_to_index_offset(index, align, &self.cache)
    }

    /// The measured size cached for the item at `index`.
    pub fn measured_size(&self, index: usize) -> Option<u32> {
        if index >= self.axis.count() {
            return None;
        }
        self.cache.get(&self.axis.key_for(index))
    }

    /// Feeds an observed item size back into the list.
    ///
    /// Writes the size into the cache keyed by the item's key and, when the item starts before
    /// the scroll offset, reports the scroll delta the host must apply so the content in view
    /// does not move.
    pub fn record_size(
        &mut self,
        index: usize,
        size: u32,
        observation: Observation,
    ) -> SizeUpdate {
        if index >= self.axis.count() {
            wwarn!(
                index,
                count = self.axis.count(),
                "record_size: index out of range"
            );
            return SizeUpdate::Ignored;
        }
        if self.axis.is_fixed() {
            wtrace!(index, size, "record_size: fixed sizes are not measured");
            return SizeUpdate::Ignored;
        }

        let key = self.axis.key_for(index);
        let cached = self.cache.get(&key);
        if observation == Observation::Initial && cached.is_some() {
            return SizeUpdate::Ignored;
        }
        if cached == Some(size) {
            return SizeUpdate::Unchanged;
        }

        // Read the laid-out position before the cache write invalidates it.
        let scroll_offset = self.axis.scroll_offset();
        let Some(item) = self.axis.item(index, &self.cache) else {
            return SizeUpdate::Ignored;
        };

        self.cache.insert(key, size);
        self.axis.invalidate();

        let delta = size as i64 - item.size as i64;
        let anchor_correction = (delta != 0 && item.offset < scroll_offset).then_some(delta);
        wtrace!(
            index,
            size,
            delta,
            anchor = ?anchor_correction,
            "record_size"
        );
        SizeUpdate::Changed {
            delta,
            anchor_correction,
        }
    }

    /// Number of cached measured sizes.
    pub fn measurement_cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn measurements(&self) -> &MeasuredSizeCache<K> {
        &self.cache
    }

    pub fn export_measurement_cache(&self) -> Vec<(K, u32)> {
        self.cache.export()
    }

    /// Replaces the cached measured sizes (e.g. with the cache of a previous mount).
    pub fn import_measurement_cache(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.cache.import(entries);
        wdebug!(entries = self.cache.len(), "import_measurement_cache");
        self.axis.invalidate();
    }

    pub fn reset_measurements(&mut self) {
        self.cache.clear();
        self.axis.invalidate();
    }

    /// Drops cached sizes whose keys are no longer produced for `0..count`.
    pub fn prune_measurements(&mut self) -> usize {
        let live: KeySet<K> = (0..self.axis.count())
            .map(|i| self.axis.key_for(i))
            .collect();
        let dropped = self.cache.retain_keys(&live);
        if dropped > 0 {
            wdebug!(dropped, "prune_measurements");
            self.axis.invalidate();
        }
        dropped
    }

    pub fn snapshot(&self) -> ListSnapshot<K> {
        ListSnapshot {
            scroll_offset: self.axis.scroll_offset(),
            viewport_extent: self.axis.viewport_extent(),
            measurements: self.cache.export(),
        }
    }

    /// Restores scroll state and measurements. `is_scrolling` is cleared.
    pub fn restore(&mut self, snapshot: ListSnapshot<K>) {
        self.axis.set_scroll_offset(snapshot.scroll_offset);
        self.axis.set_viewport_extent(snapshot.viewport_extent);
        self.import_measurement_cache(snapshot.measurements);
        self.scrolling.cancel();
    }
}
