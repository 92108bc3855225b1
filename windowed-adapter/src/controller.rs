use core::fmt;

use windowed::{
    Align, ConfigResult, ItemKey, KeyCacheKey, ListOptions, Observation, RangeResult, SizeUpdate,
    VirtualList,
};

use crate::{
    BoxSize, MeasurementReconciler, ObservedElement, ResizeObserver, ScrollContainer,
    ScrollTracker, ViewportSize,
};

/// Wires a [`VirtualList`] to a host scroll container and its rendered item elements.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` once the container exists, and `unmount` on teardown
/// - `on_scroll` / `on_viewport_resize` when container events occur
/// - `on_element_rendered` / `on_size_changed` for item elements (marked with `data-index`)
/// - `tick(now_ms)` from a timer armed at `list().scrolling().pending_reset()`
///
/// Item heights are read from the block size of the observed content box. Anchor corrections are
/// applied to the container with `scroll_by(0, delta)`.
pub struct ListController<E: ObservedElement, K = ItemKey> {
    list: VirtualList<K>,
    tracker: ScrollTracker,
    reconciler: MeasurementReconciler<E>,
}

impl<E: ObservedElement, K: KeyCacheKey + Clone> ListController<E, K> {
    pub fn new(options: ListOptions<K>) -> ConfigResult<Self> {
        Ok(Self::from_list(VirtualList::new(options)?))
    }

    pub fn from_list(list: VirtualList<K>) -> Self {
        Self {
            list,
            tracker: ScrollTracker::new(),
            reconciler: MeasurementReconciler::new(),
        }
    }

    pub fn list(&self) -> &VirtualList<K> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<K> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList<K> {
        self.list
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn reconciler(&self) -> &MeasurementReconciler<E> {
        &self.reconciler
    }

    /// Reads the container's scroll position and viewport so the first range is right.
    pub fn mount<S: ScrollContainer + ?Sized>(&mut self, container: &S) {
        self.tracker.mount(container);
        let position = self.tracker.position();
        self.list.set_viewport_extent(self.tracker.viewport().height);
        self.list.set_scroll_offset(position.top);
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_mounted()
    }

    /// Call this when the container reports a scroll.
    pub fn on_scroll<S: ScrollContainer + ?Sized>(&mut self, container: &S, now_ms: u64) {
        if let Some(position) = self.tracker.on_scroll(container) {
            self.list.apply_scroll_event(position.top, now_ms);
        }
    }

    pub fn on_viewport_resize(&mut self, size: ViewportSize) {
        if self.tracker.on_resize(size) {
            self.list.set_viewport_extent(size.height);
        }
    }

    /// Runs the `is_scrolling` debounce. Returns `true` when scrolling just stopped.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.list.update_scrolling(now_ms)
    }

    pub fn is_scrolling(&self) -> bool {
        self.list.is_scrolling()
    }

    /// The items to render.
    pub fn range(&mut self) -> &RangeResult<K> {
        self.list.compute_range()
    }

    /// Call this when an item element has been rendered.
    ///
    /// The element is observed for resizes. When the host already knows its size, pass it as
    /// `size`: it is recorded unless the item's key already has a measured size.
    pub fn on_element_rendered<O, S>(
        &mut self,
        element: &E,
        size: Option<BoxSize>,
        observer: &mut O,
        container: &mut S,
    ) -> SizeUpdate
    where
        O: ResizeObserver<E> + ?Sized,
        S: ScrollContainer + ?Sized,
    {
        self.measure(element, size, Observation::Initial, observer, container)
    }

    /// Call this from the resize observer's callback.
    pub fn on_size_changed<O, S>(
        &mut self,
        element: &E,
        size: BoxSize,
        observer: &mut O,
        container: &mut S,
    ) -> SizeUpdate
    where
        O: ResizeObserver<E> + ?Sized,
        S: ScrollContainer + ?Sized,
    {
        self.measure(element, Some(size), Observation::Resize, observer, container)
    }

    fn measure<O, S>(
        &mut self,
        element: &E,
        size: Option<BoxSize>,
        observation: Observation,
        observer: &mut O,
        container: &mut S,
    ) -> SizeUpdate
    where
        O: ResizeObserver<E> + ?Sized,
        S: ScrollContainer + ?Sized,
    {
        if !self.tracker.is_mounted() {
            return SizeUpdate::Ignored;
        }
        let Ok(Some(index)) = self.reconciler.accept_item(element, observer) else {
            return SizeUpdate::Ignored;
        };
        let Some(size) = size else {
            return SizeUpdate::Ignored;
        };

        // Decide against the container's current offset, before the correction moves it.
        self.sync_scroll(container);
        let update = self.list.record_size(index, size.block, observation);
        if let Some(dy) = update.anchor_correction() {
            wtrace!(index, dy, "anchor correction");
            container.scroll_by(0, dy);
            self.sync_scroll(container);
        }
        update
    }

    /// Picks up a programmatic scroll without raising `is_scrolling`.
    fn sync_scroll<S: ScrollContainer + ?Sized>(&mut self, container: &S) {
        if let Some(position) = self.tracker.on_scroll(container) {
            self.list.set_scroll_offset(position.top);
        }
    }

    /// Scrolls the container so `index` is aligned as requested. Returns the target offset.
    pub fn scroll_to_index<S: ScrollContainer + ?Sized>(
        &mut self,
        index: usize,
        align: Align,
        container: &mut S,
    ) -> u64 {
        self.sync_scroll(container);
        let target = self.list.scroll_to_index_offset(index, align);
        let dy = target as i64 - self.list.scroll_offset() as i64;
        if dy != 0 {
            container.scroll_by(0, dy);
            self.sync_scroll(container);
        }
        target
    }

    /// Stops observing one element (e.g. when the host drops it).
    pub fn forget<O>(&mut self, id: &E::Id, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.reconciler.forget(id, observer)
    }

    /// Releases every observation and the pending `is_scrolling` reset. Events are ignored
    /// until the next `mount`.
    pub fn unmount<O: ResizeObserver<E> + ?Sized>(&mut self, observer: &mut O) {
        self.reconciler.teardown(observer);
        self.tracker.unmount();
        self.list.cancel_scrolling();
        wdebug!("ListController::unmount");
    }
}

impl<E: ObservedElement, K: fmt::Debug> fmt::Debug for ListController<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("list", &self.list)
            .field("tracker", &self.tracker)
            .field("reconciler", &self.reconciler)
            .finish()
    }
}
