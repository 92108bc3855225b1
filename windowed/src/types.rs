use core::fmt;

/// One scrolling dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Rows; scrolled by the container's top offset.
    Vertical,
    /// Columns; scrolled by the container's left offset.
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A positioned item on one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K> {
    pub index: usize,
    pub key: K,
    /// Height for rows, width for columns.
    pub size: u32,
    /// Sum of the sizes of all preceding items.
    pub offset: u64,
}

impl<K> Item<K> {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// An inclusive index range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indices(&self) -> core::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// How far measurement has progressed for the items currently in view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisPhase {
    /// No range has been computed yet.
    #[default]
    Uncomputed,
    /// Every visible item is laid out from its estimate.
    Estimated,
    /// Some, but not all, visible items have a measured size.
    PartiallyMeasured,
    /// Every visible item is measured (or the axis has fixed sizes).
    Stable,
}

/// Where a size report comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// First report for a freshly rendered element. Never overrides a cached size.
    Initial,
    /// A resize notification from the host.
    Resize,
}

/// Outcome of feeding a measured size back into an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeUpdate {
    /// Nothing was written (out of range, fixed axis, or an initial report for a cached key).
    Ignored,
    /// The cache already held this exact size.
    Unchanged,
    /// The cache was written.
    Changed {
        /// New size minus the size the item was last laid out with.
        delta: i64,
        /// Scroll delta the host must apply on this axis to keep visible content stationary.
        anchor_correction: Option<i64>,
    },
}

impl SizeUpdate {
    pub fn anchor_correction(&self) -> Option<i64> {
        match self {
            Self::Changed {
                anchor_correction, ..
            } => *anchor_correction,
            _ => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}
