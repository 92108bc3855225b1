use core::fmt;

use windowed::{
    Align, ConfigResult, GridOptions, ItemKey, KeyCacheKey, Observation, RangeResult, SizeUpdate,
    VirtualGrid,
};

use crate::{
    BoxSize, MeasurementReconciler, ObservedElement, ResizeObserver, ScrollContainer,
    ScrollTracker, ViewportSize,
};

/// Wires a [`VirtualGrid`] to a host scroll container.
///
/// Row elements carry `data-row-index` and report their height (block size). Cell elements
/// carry `data-row-index` and `data-column-index` and report their width (inline size). Row
/// corrections scroll vertically, cell corrections horizontally.
pub struct GridController<E: ObservedElement, R = ItemKey, C = ItemKey> {
    grid: VirtualGrid<R, C>,
    tracker: ScrollTracker,
    rows: MeasurementReconciler<E>,
    cells: MeasurementReconciler<E>,
}

impl<E, R, C> GridController<E, R, C>
where
    E: ObservedElement,
    R: KeyCacheKey + Clone,
    C: KeyCacheKey + Clone,
{
    pub fn new(options: GridOptions<R, C>) -> ConfigResult<Self> {
        Ok(Self::from_grid(VirtualGrid::new(options)?))
    }

    pub fn from_grid(grid: VirtualGrid<R, C>) -> Self {
        Self {
            grid,
            tracker: ScrollTracker::new(),
            rows: MeasurementReconciler::new(),
            cells: MeasurementReconciler::new(),
        }
    }

    pub fn grid(&self) -> &VirtualGrid<R, C> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VirtualGrid<R, C> {
        &mut self.grid
    }

    pub fn into_grid(self) -> VirtualGrid<R, C> {
        self.grid
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn mount<S: ScrollContainer + ?Sized>(&mut self, container: &S) {
        self.tracker.mount(container);
        let position = self.tracker.position();
        let viewport = self.tracker.viewport();
        self.grid.set_viewport(viewport.width, viewport.height);
        self.grid.set_scroll(position.top, position.left);
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_mounted()
    }

    pub fn on_scroll<S: ScrollContainer + ?Sized>(&mut self, container: &S, now_ms: u64) {
        if let Some(position) = self.tracker.on_scroll(container) {
            self.grid.apply_scroll_event(position.top, position.left, now_ms);
        }
    }

    pub fn on_viewport_resize(&mut self, size: ViewportSize) {
        if self.tracker.on_resize(size) {
            self.grid.set_viewport(size.width, size.height);
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.grid.update_scrolling(now_ms)
    }

    pub fn is_scrolling(&self) -> bool {
        self.grid.is_scrolling()
    }

    /// The rows to render.
    pub fn rows(&mut self) -> &RangeResult<R> {
        self.grid.compute_rows()
    }

    /// The columns to render.
    pub fn columns(&mut self) -> &RangeResult<C> {
        self.grid.compute_columns()
    }

    pub fn on_row_rendered<O, S>(
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
        self.measure_row(element, size, Observation::Initial, observer, container)
    }

    pub fn on_row_resized<O, S>(
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
        self.measure_row(element, Some(size), Observation::Resize, observer, container)
    }

    pub fn on_cell_rendered<O, S>(
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
        self.measure_cell(element, size, Observation::Initial, observer, container)
    }

    pub fn on_cell_resized<O, S>(
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
        self.measure_cell(element, Some(size), Observation::Resize, observer, container)
    }

    fn measure_row<O, S>(
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
        let Ok(Some(row)) = self.rows.accept_row(element, observer) else {
            return SizeUpdate::Ignored;
        };
        let Some(size) = size else {
            return SizeUpdate::Ignored;
        };

        self.sync_scroll(container);
        let update = self.grid.record_row_height(row, size.block, observation);
        if let Some(dy) = update.anchor_correction() {
            wtrace!(row, dy, "row anchor correction");
            container.scroll_by(0, dy);
            self.sync_scroll(container);
        }
        update
    }

    fn measure_cell<O, S>(
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
        let Ok(Some((row, column))) = self.cells.accept_cell(element, observer) else {
            return SizeUpdate::Ignored;
        };
        let Some(size) = size else {
            return SizeUpdate::Ignored;
        };

        self.sync_scroll(container);
        let update = self
            .grid
            .record_cell_width(row, column, size.inline, observation);
        if let Some(dx) = update.anchor_correction() {
            wtrace!(row, column, dx, "column anchor correction");
            container.scroll_by(dx, 0);
            self.sync_scroll(container);
        }
        update
    }

    fn sync_scroll<S: ScrollContainer + ?Sized>(&mut self, container: &S) {
        if let Some(position) = self.tracker.on_scroll(container) {
            self.grid.set_scroll(position.top, position.left);
        }
    }

    /// Scrolls the container so the cell is aligned as requested on both axes. Returns the
    /// target `(top, left)`.
    pub fn scroll_to_cell<S: ScrollContainer + ?Sized>(
        &mut self,
        row: usize,
        column: usize,
        align: Align,
        container: &mut S,
    ) -> (u64, u64) {
        self.sync_scroll(container);
        let top = self.grid.scroll_to_row_offset(row, align);
        let left = self.grid.scroll_to_column_offset(column, align);
        let dy = top as i64 - self.grid.scroll_top() as i64;
        let dx = left as i64 - self.grid.scroll_left() as i64;
        if dx != 0 || dy != 0 {
            container.scroll_by(dx, dy);
            self.sync_scroll(container);
        }
        (top, left)
    }

    pub fn forget_row<O>(&mut self, id: &E::Id, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.rows.forget(id, observer)
    }

    pub fn forget_cell<O>(&mut self, id: &E::Id, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.cells.forget(id, observer)
    }

    /// Number of observed row and cell elements.
    pub fn observed(&self) -> (usize, usize) {
        (self.rows.registry().len(), self.cells.registry().len())
    }

    pub fn unmount<O: ResizeObserver<E> + ?Sized>(&mut self, observer: &mut O) {
        self.rows.teardown(observer);
        self.cells.teardown(observer);
        self.tracker.unmount();
        self.grid.cancel_scrolling();
        wdebug!("GridController::unmount");
    }
}

impl<E: ObservedElement, R: fmt::Debug, C: fmt::Debug> fmt::Debug for GridController<E, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("grid", &self.grid)
            .field("tracker", &self.tracker)
            .field("rows", &self.rows)
            .field("cells", &self.cells)
            .finish()
    }
}
