use windowed::KeyCacheKey;

/// Marker carrying the item index of a list element.
pub const INDEX_MARKER: &str = "data-index";
/// Marker carrying the row index of a grid row or cell element.
pub const ROW_INDEX_MARKER: &str = "data-row-index";
/// Marker carrying the column index of a grid cell element.
pub const COLUMN_INDEX_MARKER: &str = "data-column-index";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub top: u64,
    pub left: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// A content-box size reported by a resize observer.
///
/// `inline` is the width and `block` the height for horizontal writing modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxSize {
    pub inline: u32,
    pub block: u32,
}

impl BoxSize {
    pub fn new(inline: u32, block: u32) -> Self {
        Self { inline, block }
    }
}

/// The scrollable box the host renders into.
pub trait ScrollContainer {
    fn scroll_position(&self) -> ScrollPosition;

    fn viewport_size(&self) -> ViewportSize;

    /// Scrolls by a relative amount. Only used for anchor correction and scroll-to requests.
    fn scroll_by(&mut self, dx: i64, dy: i64);
}

/// A rendered element that can be observed for size changes.
pub trait ObservedElement {
    /// Stable identity of the element for as long as it is attached.
    type Id: KeyCacheKey + Clone;

    fn id(&self) -> Self::Id;

    /// `false` once the element has been removed from the rendered tree.
    fn is_connected(&self) -> bool;

    /// Reads a marker attribute such as [`INDEX_MARKER`].
    fn marker(&self, name: &str) -> Option<&str>;
}

/// The host's per-element resize notification capability.
pub trait ResizeObserver<E: ObservedElement> {
    fn observe(&mut self, element: &E);

    fn unobserve(&mut self, id: &E::Id);
}
