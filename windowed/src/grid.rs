use alloc::vec::Vec;

use crate::axis::AxisState;
use crate::cache::{CellKey, ColumnWidthCache, LiveColumnWidths, MeasuredSizeCache};
use crate::debounce::ScrollingDebouncer;
use crate::error::ConfigResult;
use crate::key::{KeyCacheKey, KeySet};
use crate::options::{EvictionPolicy, GridOptions};
use crate::range::RangeResult;
use crate::resolver::SizeResolver;
use crate::state::GridSnapshot;
use crate::{Align, Axis, AxisPhase, ItemKey, Observation, SizeUpdate};

/// A windowed grid: rows and columns are windowed independently.
///
/// Rows are sized like a [`crate::VirtualList`]. Columns without a fixed width take the widest
/// measured cell of the column, across the rows currently in the grid, and fall back to the
/// estimate until such a cell is measured.
#[derive(Clone, Debug)]
pub struct VirtualGrid<R = ItemKey, C = ItemKey> {
    rows: AxisState<R>,
    columns: AxisState<C>,
    row_heights: MeasuredSizeCache<R>,
    cell_widths: ColumnWidthCache<R, C>,
    /// Keys of the rows `0..rows.count()`.
    live_rows: KeySet<R>,
    scrolling: ScrollingDebouncer,
    eviction: EvictionPolicy,
}

impl<R, C> VirtualGrid<R, C>
where
    R: KeyCacheKey + Clone,
    C: KeyCacheKey + Clone,
{
    /// Creates a grid, failing when either axis has neither a fixed size nor an estimate.
    pub fn new(options: GridOptions<R, C>) -> ConfigResult<Self> {
        let mut grid = Self {
            rows: AxisState::new(Axis::Vertical, options.rows)?,
            columns: AxisState::new(Axis::Horizontal, options.columns)?,
            row_heights: MeasuredSizeCache::new(),
            cell_widths: ColumnWidthCache::new(),
            live_rows: KeySet::new(),
            scrolling: ScrollingDebouncer::new(options.scrolling_delay_ms),
            eviction: options.eviction,
        };
        grid.refresh_live_rows();
        Ok(grid)
    }

    pub fn rows(&self) -> &AxisState<R> {
        &self.rows
    }

    pub fn columns(&self) -> &AxisState<C> {
        &self.columns
    }

    pub fn set_options(&mut self, options: GridOptions<R, C>) -> ConfigResult<()> {
        // Validate both axes before touching either.
        options.rows.validate(Axis::Vertical)?;
        options.columns.validate(Axis::Horizontal)?;
        let counts = (self.rows.count(), self.columns.count());
        self.rows.set_options(options.rows)?;
        self.columns.set_options(options.columns)?;
        self.scrolling.set_delay_ms(options.scrolling_delay_ms);
        self.eviction = options.eviction;
        // The row key function may have changed even when the count did not.
        self.refresh_live_rows();
        if counts != (self.rows.count(), self.columns.count()) {
            self.on_count_changed();
        }
        Ok(())
    }

    pub fn set_counts(&mut self, rows: usize, columns: usize) {
        let rows_changed = self.rows.set_count(rows);
        let columns_changed = self.columns.set_count(columns);
        if rows_changed {
            self.refresh_live_rows();
        }
        if rows_changed || columns_changed {
            self.on_count_changed();
        }
    }

    /// Column widths depend on which rows are live, so the columns are re-laid out too.
    fn refresh_live_rows(&mut self) {
        self.live_rows = (0..self.rows.count()).map(|i| self.rows.key_for(i)).collect();
        self.columns.invalidate();
    }

    fn on_count_changed(&mut self) {
        if self.eviction == EvictionPolicy::PruneOnCountChange {
            self.prune_measurements();
        }
    }

    pub fn set_row_key(&mut self, f: impl Fn(usize) -> R + Send + Sync + 'static) {
        self.rows.set_get_item_key(f);
        self.refresh_live_rows();
    }

    pub fn set_column_key(&mut self, f: impl Fn(usize) -> C + Send + Sync + 'static) {
        self.columns.set_get_item_key(f);
    }

    pub fn scroll_top(&self) -> u64 {
        self.rows.scroll_offset()
    }

    pub fn scroll_left(&self) -> u64 {
        self.columns.scroll_offset()
    }

    pub fn set_scroll(&mut self, top: u64, left: u64) {
        self.rows.set_scroll_offset(top);
        self.columns.set_scroll_offset(left);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.rows.set_viewport_extent(height);
        self.columns.set_viewport_extent(width);
    }

    /// Applies a scroll notification from the host and marks the grid as scrolling.
    pub fn apply_scroll_event(&mut self, top: u64, left: u64, now_ms: u64) {
        wtrace!(top, left, now_ms, "VirtualGrid::apply_scroll_event");
        self.set_scroll(top, left);
        self.scrolling.notify_scroll(now_ms);
    }

    pub fn update_scrolling(&mut self, now_ms: u64) -> bool {
        self.scrolling.poll(now_ms)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling.is_scrolling()
    }

    pub fn scrolling(&self) -> &ScrollingDebouncer {
        &self.scrolling
    }

    pub fn cancel_scrolling(&mut self) {
        self.scrolling.cancel();
    }

    pub fn compute_rows(&mut self) -> &RangeResult<R> {
        self.rows.compute(&self.row_heights)
    }

    pub fn compute_columns(&mut self) -> &RangeResult<C> {
        self.columns
            .compute(&LiveColumnWidths::new(&self.cell_widths, &self.live_rows))
    }

    pub fn total_rows_height(&mut self) -> u64 {
        self.compute_rows().total_extent
    }

    pub fn total_columns_width(&mut self) -> u64 {
        self.compute_columns().total_extent
    }

    pub fn row_phase(&self) -> AxisPhase {
        self.rows.phase()
    }

    pub fn column_phase(&self) -> AxisPhase {
        self.columns.phase()
    }

    pub fn scroll_to_row_offset(&mut self, row: usize, align: Align) -> u64 {
        self.rows.scroll_to_index_offset(row, align, &self.row_heights)
    }

    pub fn scroll_to_column_offset(&mut self, column: usize, align: Align) -> u64 {
        let widths = LiveColumnWidths::new(&self.cell_widths, &self.live_rows);
        self.columns.scroll_to_index_offset(column, align, &widths)
    }

    /// The resolved width of every column.
    pub fn column_widths(&self) -> Vec<u32> {
        let options = self.columns.options();
        let widths = LiveColumnWidths::new(&self.cell_widths, &self.live_rows);
        match SizeResolver::new(options, Axis::Horizontal, &widths) {
            Ok(resolver) => (0..options.count).map(|i| resolver.resolve(i)).collect(),
            // Options were validated when they were set.
            Err(_) => Vec::new(),
        }
    }

    pub fn column_width(&self, column: usize) -> Option<u32> {
        let options = self.columns.options();
        if column >= options.count {
            return None;
        }
        let widths = LiveColumnWidths::new(&self.cell_widths, &self.live_rows);
        SizeResolver::new(options, Axis::Horizontal, &widths)
            .ok()
            .map(|resolver| resolver.resolve(column))
    }

    /// Feeds an observed row height back into the grid. See [`crate::VirtualList::record_size`].
    pub fn record_row_height(
        &mut self,
        row: usize,
        height: u32,
        observation: Observation,
    ) -> SizeUpdate {
        if row >= self.rows.count() {
            wwarn!(row, count = self.rows.count(), "record_row_height: row out of range");
            return SizeUpdate::Ignored;
        }
        if self.rows.is_fixed() {
            return SizeUpdate::Ignored;
        }

        let key = self.rows.key_for(row);
        let cached = self.row_heights.get(&key);
        if observation == Observation::Initial && cached.is_some() {
            return SizeUpdate::Ignored;
        }
        if cached == Some(height) {
            return SizeUpdate::Unchanged;
        }

        let scroll_top = self.rows.scroll_offset();
        let Some(item) = self.rows.item(row, &self.row_heights) else {
            return SizeUpdate::Ignored;
        };

        self.row_heights.insert(key, height);
        self.rows.invalidate();

        let delta = height as i64 - item.size as i64;
        let anchor_correction = (delta != 0 && item.offset < scroll_top).then_some(delta);
        wtrace!(row, height, delta, anchor = ?anchor_correction, "record_row_height");
        SizeUpdate::Changed {
            delta,
            anchor_correction,
        }
    }

    /// Feeds an observed cell width back into the grid.
    ///
    /// The width is cached per `(row key, column key)`. `delta` is the change of the column's
    /// width (its widest cell), which is what moves the columns after it, and the anchor
    /// correction applies to the horizontal scroll offset.
    pub fn record_cell_width(
        &mut self,
        row: usize,
        column: usize,
        width: u32,
        observation: Observation,
    ) -> SizeUpdate {
        if row >= self.rows.count() || column >= self.columns.count() {
            wwarn!(
                row,
                column,
                rows = self.rows.count(),
                columns = self.columns.count(),
                "record_cell_width: cell out of range"
            );
            return SizeUpdate::Ignored;
        }
        if self.columns.is_fixed() {
            return SizeUpdate::Ignored;
        }

        let row_key = self.rows.key_for(row);
        let column_key = self.columns.key_for(column);
        let cached = self.cell_widths.get(&row_key, &column_key);
        if observation == Observation::Initial && cached.is_some() {
            return SizeUpdate::Ignored;
        }
        if cached == Some(width) {
            return SizeUpdate::Unchanged;
        }

        let scroll_left = self.columns.scroll_offset();
        let widths = LiveColumnWidths::new(&self.cell_widths, &self.live_rows);
        let Some(item) = self.columns.item(column, &widths) else {
            return SizeUpdate::Ignored;
        };

        self.cell_widths.insert(CellKey::new(row_key, column_key), width);
        self.columns.invalidate();

        let column_width = self.column_width(column).unwrap_or(item.size);
        let delta = column_width as i64 - item.size as i64;
        let anchor_correction = (delta != 0 && item.offset < scroll_left).then_some(delta);
        wtrace!(
            row,
            column,
            width,
            column_width,
            delta,
            anchor = ?anchor_correction,
            "record_cell_width"
        );
        SizeUpdate::Changed {
            delta,
            anchor_correction,
        }
    }

    pub fn row_heights(&self) -> &MeasuredSizeCache<R> {
        &self.row_heights
    }

    pub fn cell_widths(&self) -> &ColumnWidthCache<R, C> {
        &self.cell_widths
    }

    pub fn reset_measurements(&mut self) {
        self.row_heights.clear();
        self.cell_widths.clear();
        self.rows.invalidate();
        self.columns.invalidate();
    }

    /// Drops cached sizes for row and column keys no longer in the grid.
    pub fn prune_measurements(&mut self) -> usize {
        let columns: KeySet<C> = (0..self.columns.count())
            .map(|i| self.columns.key_for(i))
            .collect();
        let dropped = self.row_heights.retain_keys(&self.live_rows)
            + self.cell_widths.retain_keys(&self.live_rows, &columns);
        if dropped > 0 {
            wdebug!(dropped, "prune_measurements");
            self.rows.invalidate();
            self.columns.invalidate();
        }
        dropped
    }

    pub fn snapshot(&self) -> GridSnapshot<R, C> {
        GridSnapshot {
            scroll_top: self.rows.scroll_offset(),
            scroll_left: self.columns.scroll_offset(),
            viewport_width: self.columns.viewport_extent(),
            viewport_height: self.rows.viewport_extent(),
            row_heights: self.row_heights.export(),
            cell_widths: self.cell_widths.export(),
        }
    }

    pub fn restore(&mut self, snapshot: GridSnapshot<R, C>) {
        self.set_scroll(snapshot.scroll_top, snapshot.scroll_left);
        self.set_viewport(snapshot.viewport_width, snapshot.viewport_height);
        self.row_heights.import(snapshot.row_heights);
        self.cell_widths.import(snapshot.cell_widths);
        self.rows.invalidate();
        self.columns.invalidate();
        self.scrolling.cancel();
    }
}
