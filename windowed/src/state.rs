use alloc::vec::Vec;

use crate::CellKey;

/// A serializable snapshot of a list: scroll state plus the measured-size cache.
///
/// Restoring it on a new mount lets the first render use the sizes measured by the previous
/// one. With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListSnapshot<K> {
    pub scroll_offset: u64,
    pub viewport_extent: u32,
    pub measurements: Vec<(K, u32)>,
}

/// A serializable snapshot of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot<R, C> {
    pub scroll_top: u64,
    pub scroll_left: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub row_heights: Vec<(R, u32)>,
    pub cell_widths: Vec<(CellKey<R, C>, u32)>,
}
