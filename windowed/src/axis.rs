use core::cmp;

use crate::cache::MeasuredSizes;
use crate::error::ConfigResult;
use crate::options::{AxisOptions, Sizing};
use crate::range::{RangeResult, compute_range, compute_uniform_range};
use crate::resolver::SizeResolver;
use crate::{Align, Axis, AxisPhase, Item, ScrollDirection};

/// Scroll state, configuration and the memoized window of one axis.
///
/// The memoized [`RangeResult`] is dropped whenever an input changes and rebuilt by the next
/// [`AxisState::compute`]. Measured sizes live outside the axis and are passed in, so the owner
/// must call [`AxisState::invalidate`] after writing to its cache.
#[derive(Clone)]
pub struct AxisState<K> {
    axis: Axis,
    options: AxisOptions<K>,
    sizing: Sizing,
    scroll_offset: u64,
    viewport_extent: u32,
    scroll_direction: Option<ScrollDirection>,
    computed: Option<RangeResult<K>>,
    phase: AxisPhase,
}

impl<K> AxisState<K> {
    pub fn new(axis: Axis, options: AxisOptions<K>) -> ConfigResult<Self> {
        let sizing = options.sizing(axis)?;
        wdebug!(
            %axis,
            count = options.count,
            overscan = options.overscan,
            fixed = sizing.is_fixed(),
            "AxisState::new"
        );
        Ok(Self {
            axis,
            options,
            sizing,
            scroll_offset: 0,
            viewport_extent: 0,
            scroll_direction: None,
            computed: None,
            phase: AxisPhase::Uncomputed,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn options(&self) -> &AxisOptions<K> {
        &self.options
    }

    /// Replaces the options. On error the previous options stay in place.
    pub fn set_options(&mut self, options: AxisOptions<K>) -> ConfigResult<()> {
        self.sizing = options.sizing(self.axis)?;
        self.options = options;
        self.invalidate();
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) -> bool {
        if self.options.count == count {
            return false;
        }
        self.options.count = count;
        self.invalidate();
        true
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.invalidate();
    }

    pub fn set_get_item_key(&mut self, f: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.options = self.options.clone().with_get_item_key(f);
        self.invalidate();
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    /// `true` when sizes come from a fixed size and measurements are ignored.
    pub fn is_fixed(&self) -> bool {
        self.sizing.is_fixed()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_scroll_offset(&mut self, offset: u64) -> bool {
        if self.scroll_offset == offset {
            return false;
        }
        self.scroll_direction = match offset.cmp(&self.scroll_offset) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.scroll_offset = offset;
        self.invalidate();
        true
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport_extent
    }

    pub fn set_viewport_extent(&mut self, extent: u32) -> bool {
        if self.viewport_extent == extent {
            return false;
        }
        self.viewport_extent = extent;
        self.invalidate();
        true
    }

    pub fn phase(&self) -> AxisPhase {
        self.phase
    }

    /// Drops the memoized window.
    pub fn invalidate(&mut self) {
        self.computed = None;
    }

    /// The last computed window, if it is still current.
    pub fn computed(&self) -> Option<&RangeResult<K>> {
        self.computed.as_ref()
    }

    /// Returns the window for the current inputs, computing it if needed.
    pub fn compute<M: MeasuredSizes<K> + ?Sized>(&mut self, measured: &M) -> &RangeResult<K> {
        let result = match self.computed.take() {
            Some(result) => result,
            None => {
                let result = self.build(measured);
                self.phase = self.phase_of(&result, measured);
                wtrace!(
                    axis = %self.axis,
                    scroll_offset = self.scroll_offset,
                    viewport_extent = self.viewport_extent,
                    start = ?result.start_index(),
                    end = ?result.end_index(),
                    total = result.total_extent,
                    "computed range"
                );
                result
            }
        };
        self.computed.insert(result)
    }

    fn build<M: MeasuredSizes<K> + ?Sized>(&self, measured: &M) -> RangeResult<K> {
        let count = self.options.count;
        let overscan = self.options.overscan;
        let key = |i| (self.options.get_item_key)(i);
        if let Sizing::Uniform(size) = self.sizing {
            return compute_uniform_range(
                count,
                size,
                key,
                self.scroll_offset,
                self.viewport_extent,
                overscan,
            );
        }
        let resolver =
            SizeResolver::with_sizing(self.sizing.clone(), &self.options.get_item_key, measured);
        compute_range(
            count,
            |i| resolver.resolve(i),
            key,
            self.scroll_offset,
            self.viewport_extent,
            overscan,
        )
    }

    fn phase_of<M: MeasuredSizes<K> + ?Sized>(
        &self,
        result: &RangeResult<K>,
        measured: &M,
    ) -> AxisPhase {
        let Some(visible) = result.visible else {
            return AxisPhase::Stable;
        };
        if self.sizing.is_fixed() {
            return AxisPhase::Stable;
        }
        let resolver =
            SizeResolver::with_sizing(self.sizing.clone(), &self.options.get_item_key, measured);
        let measured_count = visible.indices().filter(|&i| resolver.is_measured(i)).count();
        if measured_count == 0 {
            AxisPhase::Estimated
        } else if measured_count == visible.len() {
            AxisPhase::Stable
        } else {
            AxisPhase::PartiallyMeasured
        }
    }

    /// Looks up an item in the current layout.
    pub fn item<M: MeasuredSizes<K> + ?Sized>(
        &mut self,
        index: usize,
        measured: &M,
    ) -> Option<Item<K>> {
        let layout = &self.compute(measured).layout;
        let offset = layout.offset(index)?;
        let size = layout.size(index)?;
        Some(Item {
            index,
            key: self.key_for(index),
            size,
            offset,
        })
    }

    pub fn index_at_offset<M: MeasuredSizes<K> + ?Sized>(
        &mut self,
        offset: u64,
        measured: &M,
    ) -> Option<usize> {
        self.compute(measured).layout.index_at_offset(offset)
    }

    /// The largest scroll offset that still fills the viewport.
    pub fn max_scroll_offset<M: MeasuredSizes<K> + ?Sized>(&mut self, measured: &M) -> u64 {
        let view = self.viewport_extent as u64;
        self.compute(measured).total_extent.saturating_sub(view)
    }

    /// Computes the scroll offset that brings `index` into view with the given alignment.
    pub fn scroll_to_index_offset<M: MeasuredSizes<K> + ?Sized>(
        &mut self,
        index: usize,
        align: Align,
        measured: &M,
    ) -> u64 {
        let count = self.options.count;
        if count == 0 {
            return 0;
        }
        let index = cmp::min(index, count - 1);
        let view = self.viewport_extent as u64;
        let current = self.scroll_offset;
        let max_scroll = self.max_scroll_offset(measured);
        let layout = &self.compute(measured).layout;
        let start = layout.offset(index).unwrap_or(0);
        let end = start.saturating_add(layout.size(index).unwrap_or(0) as u64);

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(end.saturating_sub(start) / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                if start >= current && end <= current.saturating_add(view) {
                    current
                } else if start < current {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };
        cmp::min(target, max_scroll)
    }
}

impl<K> core::fmt::Debug for AxisState<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisState")
            .field("axis", &self.axis)
            .field("options", &self.options)
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_extent", &self.viewport_extent)
            .field("scroll_direction", &self.scroll_direction)
            .field("phase", &self.phase)
            .field("computed", &self.computed.is_some())
            .finish()
    }
}
