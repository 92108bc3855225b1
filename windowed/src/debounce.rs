/// Raises `is_scrolling` on the first scroll event of a burst and clears it after a quiet
/// period.
///
/// At most one reset is pending at a time; every scroll event replaces it. Time is supplied by
/// the caller in milliseconds, so hosts can drive it from any clock. `pending_reset` tells the
/// host when to call `poll` next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollingDebouncer {
    delay_ms: u64,
    is_scrolling: bool,
    reset_at_ms: Option<u64>,
}

impl ScrollingDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            is_scrolling: false,
            reset_at_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// When the pending reset fires, if one is scheduled.
    pub fn pending_reset(&self) -> Option<u64> {
        self.reset_at_ms
    }

    /// Records a scroll event. Returns `true` when this starts a new burst.
    pub fn notify_scroll(&mut self, now_ms: u64) -> bool {
        let started = !self.is_scrolling;
        self.is_scrolling = true;
        self.reset_at_ms = Some(now_ms.saturating_add(self.delay_ms));
        if started {
            wtrace!(now_ms, "scroll burst started");
        }
        started
    }

    /// Fires the pending reset if it is due. Returns `true` when `is_scrolling` went false.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(reset_at) = self.reset_at_ms else {
            return false;
        };
        if now_ms < reset_at {
            return false;
        }
        self.reset_at_ms = None;
        self.is_scrolling = false;
        wtrace!(now_ms, "scroll burst ended");
        true
    }

    /// Drops any pending reset and clears the flag (teardown).
    pub fn cancel(&mut self) {
        self.reset_at_ms = None;
        self.is_scrolling = false;
    }
}

impl Default for ScrollingDebouncer {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_SCROLLING_DELAY_MS)
    }
}
