use core::cmp::Ordering;

use windowed::{Axis, ScrollDirection};

use crate::{ScrollContainer, ScrollPosition, ViewportSize};

/// Latest scroll position and viewport size of a container.
///
/// Values are read once on mount so the first range is right before any event fires. After
/// [`ScrollTracker::unmount`], notifications are ignored until the next mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollTracker {
    position: ScrollPosition,
    viewport: ViewportSize,
    vertical: Option<ScrollDirection>,
    horizontal: Option<ScrollDirection>,
    mounted: bool,
}

fn direction(from: u64, to: u64, prev: Option<ScrollDirection>) -> Option<ScrollDirection> {
    match to.cmp(&from) {
        Ordering::Greater => Some(ScrollDirection::Forward),
        Ordering::Less => Some(ScrollDirection::Backward),
        Ordering::Equal => prev,
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount<S: ScrollContainer + ?Sized>(&mut self, container: &S) {
        self.position = container.scroll_position();
        self.viewport = container.viewport_size();
        self.vertical = None;
        self.horizontal = None;
        self.mounted = true;
        wdebug!(
            top = self.position.top,
            left = self.position.left,
            width = self.viewport.width,
            height = self.viewport.height,
            "ScrollTracker::mount"
        );
    }

    /// Stops tracking. Later notifications are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Re-reads the scroll position. Returns the new position, or `None` when unmounted.
    pub fn on_scroll<S: ScrollContainer + ?Sized>(
        &mut self,
        container: &S,
    ) -> Option<ScrollPosition> {
        if !self.mounted {
            return None;
        }
        let next = container.scroll_position();
        self.vertical = direction(self.position.top, next.top, self.vertical);
        self.horizontal = direction(self.position.left, next.left, self.horizontal);
        self.position = next;
        Some(next)
    }

    /// Records a container resize. Returns `false` when unmounted or unchanged.
    pub fn on_resize(&mut self, size: ViewportSize) -> bool {
        if !self.mounted || self.viewport == size {
            return false;
        }
        self.viewport = size;
        true
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn direction(&self, axis: Axis) -> Option<ScrollDirection> {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }
}
