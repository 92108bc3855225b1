use alloc::vec::Vec;
use core::cmp;

use crate::{Item, WindowRange};

/// Offsets of every item on one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisLayout {
    /// `count` items of `size` each; offsets are computed on demand.
    Uniform { count: usize, size: u32 },
    /// Prefix offsets: `offsets[i]` is the start of item `i`, the last entry is the total.
    Offsets(Vec<u64>),
}

impl AxisLayout {
    pub fn len(&self) -> usize {
        match self {
            Self::Uniform { count, .. } => *count,
            Self::Offsets(offsets) => offsets.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::Uniform { count, size } => (*count as u64).saturating_mul(*size as u64),
            Self::Offsets(offsets) => offsets.last().copied().unwrap_or(0),
        }
    }

    pub fn offset(&self, index: usize) -> Option<u64> {
        if index >= self.len() {
            return None;
        }
        match self {
            Self::Uniform { size, .. } => Some((index as u64).saturating_mul(*size as u64)),
            Self::Offsets(offsets) => Some(offsets[index]),
        }
    }

    pub fn size(&self, index: usize) -> Option<u32> {
        if index >= self.len() {
            return None;
        }
        match self {
            Self::Uniform { size, .. } => Some(*size),
            Self::Offsets(offsets) => Some((offsets[index + 1] - offsets[index]) as u32),
        }
    }

    /// Returns the item covering `offset` (the first item whose end is past it), clamped to the
    /// last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.len();
        if count == 0 {
            return None;
        }
        let index = match self {
            Self::Uniform { size: 0, .. } => count,
            Self::Uniform { size, .. } => {
                usize::try_from(offset / *size as u64).unwrap_or(usize::MAX)
            }
            Self::Offsets(offsets) => offsets[1..].partition_point(|&end| end <= offset),
        };
        Some(cmp::min(index, count - 1))
    }
}

/// The window to render on one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeResult<K> {
    /// Overscan-expanded render range; `None` when nothing is in view.
    pub range: Option<WindowRange>,
    /// Strictly visible range (no overscan).
    pub visible: Option<WindowRange>,
    /// Sum of all item sizes.
    pub total_extent: u64,
    /// Items of `range`, in index order.
    pub items: Vec<Item<K>>,
    pub layout: AxisLayout,
}

impl<K> RangeResult<K> {
    fn empty(layout: AxisLayout) -> Self {
        Self {
            range: None,
            visible: None,
            total_extent: layout.total(),
            items: Vec::new(),
            layout,
        }
    }

    pub fn start_index(&self) -> Option<usize> {
        self.range.map(|r| r.start_index)
    }

    pub fn end_index(&self) -> Option<usize> {
        self.range.map(|r| r.end_index)
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    fn from_visible(
        layout: AxisLayout,
        visible: Option<(usize, usize)>,
        overscan: usize,
        mut key: impl FnMut(usize) -> K,
    ) -> Self {
        let Some((first, last)) = visible else {
            return Self::empty(layout);
        };
        let count = layout.len();
        let range = WindowRange {
            start_index: first.saturating_sub(overscan),
            end_index: cmp::min(count - 1, last.saturating_add(overscan)),
        };
        let items = range
            .indices()
            .map(|index| Item {
                index,
                key: key(index),
                size: layout.size(index).unwrap_or(0),
                offset: layout.offset(index).unwrap_or(0),
            })
            .collect();
        Self {
            range: Some(range),
            visible: Some(WindowRange {
                start_index: first,
                end_index: last,
            }),
            total_extent: layout.total(),
            items,
            layout,
        }
    }
}

/// Computes the render window with a single forward pass over every item.
///
/// The first item whose end passes `scroll_offset` starts the visible range; the first item
/// whose end reaches `scroll_offset + viewport_extent` ends it. Both boundaries are then widened
/// by `overscan` and clamped to `0..count`. When no item reaches the trailing edge the range runs
/// to the last item.
pub fn compute_range<K>(
    count: usize,
    mut resolve: impl FnMut(usize) -> u32,
    key: impl FnMut(usize) -> K,
    scroll_offset: u64,
    viewport_extent: u32,
    overscan: usize,
) -> RangeResult<K> {
    let leading = scroll_offset;
    let trailing = scroll_offset.saturating_add(viewport_extent as u64);

    let mut offsets = Vec::with_capacity(count + 1);
    let mut total = 0u64;
    let mut first = None;
    let mut last = None;
    for index in 0..count {
        offsets.push(total);
        let end = total.saturating_add(resolve(index) as u64);
        if first.is_none() && end > leading {
            first = Some(index);
        }
        if last.is_none() && end >= trailing {
            last = Some(index);
        }
        total = end;
    }
    offsets.push(total);

    let layout = AxisLayout::Offsets(offsets);
    if viewport_extent == 0 {
        return RangeResult::empty(layout);
    }
    let visible = first.map(|first| (first, last.unwrap_or(count - 1)));
    RangeResult::from_visible(layout, visible, overscan, key)
}

/// Computes the render window for items that all share `size`, by division.
///
/// `start = floor(scroll / size)` and `end = floor((scroll + viewport) / size)`, then overscan
/// and clamping as in [`compute_range`].
pub fn compute_uniform_range<K>(
    count: usize,
    size: u32,
    key: impl FnMut(usize) -> K,
    scroll_offset: u64,
    viewport_extent: u32,
    overscan: usize,
) -> RangeResult<K> {
    let layout = AxisLayout::Uniform { count, size };
    if count == 0 || size == 0 || viewport_extent == 0 {
        return RangeResult::empty(layout);
    }

    let size = size as u64;
    let first = scroll_offset / size;
    if first >= count as u64 {
        return RangeResult::empty(layout);
    }
    let last = scroll_offset.saturating_add(viewport_extent as u64) / size;
    let last = cmp::min(last, count as u64 - 1);

    // Both bounds are below `count` here.
    RangeResult::from_visible(
        layout,
        Some((first as usize, last as usize)),
        overscan,
        key,
    )
}
