use crate::*;

use alloc::vec::Vec;
use std::string::ToString;

fn estimated_list(count: usize, estimate: u32) -> VirtualList {
    VirtualList::new(ListOptions::new(
        AxisOptions::new(count).with_estimate_size(move |_| estimate),
    ))
    .unwrap()
}

fn uniform_list(count: usize, size: u32) -> VirtualList {
    VirtualList::new(ListOptions::new(AxisOptions::new(count).with_uniform_size(size))).unwrap()
}

/// Index of the first visible item and how far the viewport starts inside it.
fn top_visible(list: &mut VirtualList) -> (usize, u64) {
    let scroll = list.scroll_offset();
    let r = list.compute_range();
    let top = r.visible.unwrap().start_index;
    (top, scroll - r.layout.offset(top).unwrap())
}

fn indices<K>(r: &RangeResult<K>) -> Vec<usize> {
    r.items.iter().map(|it| it.index).collect()
}

#[test]
fn uniform_range_is_computed_by_division() {
    let mut list = uniform_list(10_000, 40);
    list.set_viewport_extent(600);

    let r = list.compute_range();
    assert_eq!(r.start_index(), Some(0));
    assert_eq!(r.end_index(), Some(18));
    assert_eq!(
        r.visible,
        Some(WindowRange {
            start_index: 0,
            end_index: 15
        })
    );
    assert_eq!(r.total_extent, 400_000);
    assert_eq!(r.items.len(), 19);
    assert_eq!(r.items[5].offset, 200);
    assert_eq!(r.items[5].size, 40);
    assert!(matches!(r.layout, AxisLayout::Uniform { .. }));
}

#[test]
fn uniform_range_clamps_to_last_item() {
    let mut list = uniform_list(10_000, 40);
    list.set_viewport_extent(600);
    list.set_scroll_offset(399_500);

    let r = list.compute_range();
    assert_eq!(r.visible.map(|v| v.start_index), Some(9_987));
    assert_eq!(r.start_index(), Some(9_984));
    assert_eq!(r.end_index(), Some(9_999));
}

#[test]
fn empty_collection_has_no_items() {
    for scroll in [0u64, 500, u64::MAX] {
        let mut list = estimated_list(0, 50);
        list.set_viewport_extent(600);
        list.set_scroll_offset(scroll);
        let r = list.compute_range();
        assert!(r.is_empty());
        assert!(r.items.is_empty());
        assert_eq!(r.total_extent, 0);

        let mut list = uniform_list(0, 40);
        list.set_viewport_extent(600);
        list.set_scroll_offset(scroll);
        let r = list.compute_range();
        assert!(r.is_empty());
        assert_eq!(r.total_extent, 0);
    }
}

#[test]
fn zero_viewport_has_no_items() {
    let mut list = estimated_list(100, 10);
    let r = list.compute_range();
    assert!(r.is_empty());
    assert_eq!(r.total_extent, 1_000);

    let mut list = uniform_list(100, 10);
    let r = list.compute_range();
    assert!(r.is_empty());
    assert_eq!(r.total_extent, 1_000);
}

#[test]
fn scroll_past_total_extent_has_no_items() {
    let mut list = estimated_list(10, 10);
    list.set_viewport_extent(50);
    list.set_scroll_offset(100);
    assert!(list.compute_range().is_empty());

    list.set_scroll_offset(99);
    let r = list.compute_range();
    assert_eq!(r.visible.map(|v| v.start_index), Some(9));
    assert_eq!(r.start_index(), Some(6));
    assert_eq!(r.end_index(), Some(9));

    let mut list = uniform_list(10, 10);
    list.set_viewport_extent(50);
    list.set_scroll_offset(100);
    assert!(list.compute_range().is_empty());
}

#[test]
fn zero_uniform_size_has_no_items() {
    let mut list = uniform_list(10, 0);
    list.set_viewport_extent(50);
    let r = list.compute_range();
    assert!(r.is_empty());
    assert_eq!(r.total_extent, 0);
}

#[test]
fn dynamic_range_uses_first_crossing() {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new(20)
            .with_fixed_size(|i| if i % 2 == 0 { 10 } else { 30 })
            .with_overscan(1),
    ))
    .unwrap();
    // Offsets: 0, 10, 40, 50, 80, 90, 120, ...
    list.set_viewport_extent(50);
    list.set_scroll_offset(45);

    let r = list.compute_range();
    assert_eq!(
        r.visible,
        Some(WindowRange {
            start_index: 2,
            end_index: 5
        })
    );
    assert_eq!(indices(r), [1, 2, 3, 4, 5, 6]);
    assert_eq!(r.items[0].offset, 10);
    assert_eq!(r.items[0].size, 30);
    assert_eq!(r.items[5].offset, 120);
    assert_eq!(r.total_extent, 400);
}

#[test]
fn item_ending_on_trailing_edge_closes_the_dynamic_range() {
    let mut dynamic = VirtualList::new(ListOptions::new(
        AxisOptions::new(100)
            .with_fixed_size(|_| 10)
            .with_overscan(0),
    ))
    .unwrap();
    dynamic.set_viewport_extent(30);
    assert_eq!(indices(dynamic.compute_range()), [0, 1, 2]);

    // The division path counts the item starting on the trailing edge too.
    let mut uniform = VirtualList::new(ListOptions::new(
        AxisOptions::new(100)
            .with_uniform_size(10)
            .with_overscan(0),
    ))
    .unwrap();
    uniform.set_viewport_extent(30);
    assert_eq!(indices(uniform.compute_range()), [0, 1, 2, 3]);
}

#[test]
fn short_content_runs_to_last_item() {
    let mut list = estimated_list(3, 10);
    list.set_viewport_extent(100);
    let r = list.compute_range();
    assert_eq!(
        r.visible,
        Some(WindowRange {
            start_index: 0,
            end_index: 2
        })
    );
    assert_eq!(r.total_extent, 30);
}

#[test]
fn total_extent_is_independent_of_scroll_and_overscan() {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new(50).with_fixed_size(|i| i as u32 + 1),
    ))
    .unwrap();
    list.set_viewport_extent(100);
    for scroll in [0u64, 500, 1_274, 2_000] {
        for overscan in [0usize, 3, 100] {
            list.set_scroll_offset(scroll);
            list.set_overscan(overscan);
            assert_eq!(list.total_extent(), 1_275);
        }
    }
}

#[test]
fn compute_range_is_idempotent() {
    let mut list = estimated_list(1_000, 25);
    list.set_viewport_extent(400);
    list.set_scroll_offset(1_234);
    list.record_size(60, 70, Observation::Initial);

    let first = list.compute_range().clone();
    let second = list.compute_range().clone();
    assert_eq!(first, second);

    // Recomputing from scratch gives the same answer as the memoized result.
    assert!(list.axis().computed().is_some());
    list.set_overscan(4);
    list.set_overscan(3);
    assert!(list.axis().computed().is_none());
    assert_eq!(list.compute_range(), &first);
}

#[test]
fn free_range_function_reports_keys_and_offsets() {
    let sizes = [5u32, 15, 10, 20];
    let r = compute_range(sizes.len(), |i| sizes[i], |i| i * 100, 12, 10, 0);
    assert_eq!(
        r.visible,
        Some(WindowRange {
            start_index: 1,
            end_index: 2
        })
    );
    assert_eq!(r.items[0].key, 100);
    assert_eq!(r.items[1].key, 200);
    assert_eq!(r.items[1].offset, 20);
    assert_eq!(r.items[1].end(), 30);
    assert_eq!(r.total_extent, 50);
}

#[test]
fn missing_size_function_is_a_config_error() {
    let err = VirtualList::new(ListOptions::new(AxisOptions::new(10))).err();
    assert_eq!(
        err,
        Some(ConfigError::MissingSizeFunction {
            axis: Axis::Vertical
        })
    );

    let err = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(10).with_uniform_size(30),
        AxisOptions::new(10),
    ))
    .err()
    .unwrap();
    assert_eq!(
        err.to_string(),
        "horizontal axis needs either a fixed item size or an item size estimate"
    );
}

#[test]
fn rejected_options_keep_the_previous_ones() {
    let mut list = estimated_list(10, 10);
    assert!(list.set_options(ListOptions::new(AxisOptions::new(20))).is_err());
    assert_eq!(list.count(), 10);
    assert_eq!(list.total_extent(), 100);
}

#[test]
fn fixed_size_wins_over_estimate_and_ignores_measurements() {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new(10)
            .with_uniform_size(20)
            .with_estimate_size(|_| 50),
    ))
    .unwrap();
    list.set_viewport_extent(100);
    assert_eq!(list.total_extent(), 200);
    assert_eq!(list.record_size(0, 80, Observation::Resize), SizeUpdate::Ignored);
    assert_eq!(list.measurement_cache_len(), 0);
    assert_eq!(list.total_extent(), 200);
    list.compute_range();
    assert_eq!(list.phase(), AxisPhase::Stable);
}

#[test]
fn measurement_replaces_estimate() {
    let mut list = estimated_list(100, 50);
    list.set_viewport_extent(200);
    assert_eq!(list.total_extent(), 5_000);

    assert_eq!(
        list.record_size(0, 80, Observation::Initial),
        SizeUpdate::Changed {
            delta: 30,
            anchor_correction: None
        }
    );
    assert_eq!(list.measured_size(0), Some(80));
    assert_eq!(list.total_extent(), 5_030);
    assert_eq!(list.item(1).map(|it| it.offset), Some(80));

    // A fresh element reporting again never overrides the cache.
    assert_eq!(list.record_size(0, 90, Observation::Initial), SizeUpdate::Ignored);
    assert_eq!(list.record_size(0, 80, Observation::Resize), SizeUpdate::Unchanged);
    assert_eq!(
        list.record_size(0, 60, Observation::Resize),
        SizeUpdate::Changed {
            delta: -20,
            anchor_correction: None
        }
    );
    assert_eq!(list.total_extent(), 5_010);
}

#[test]
fn out_of_range_measurement_is_ignored() {
    let mut list = estimated_list(5, 10);
    assert_eq!(list.record_size(5, 20, Observation::Resize), SizeUpdate::Ignored);
    assert_eq!(list.measured_size(5), None);
    assert_eq!(list.measurement_cache_len(), 0);
}

#[test]
fn anchor_correction_keeps_visible_content_in_place() {
    let mut list = estimated_list(100, 50);
    list.set_viewport_extent(200);
    list.set_scroll_offset(1_010);
    assert_eq!(top_visible(&mut list), (20, 10));

    let update = list.record_size(5, 80, Observation::Initial);
    assert_eq!(
        update,
        SizeUpdate::Changed {
            delta: 30,
            anchor_correction: Some(30)
        }
    );
    let correction = update.anchor_correction().unwrap();
    list.set_scroll_offset((list.scroll_offset() as i64 + correction) as u64);
    assert_eq!(list.scroll_offset(), 1_040);
    assert_eq!(top_visible(&mut list), (20, 10));

    // Items below the viewport only move content the user does not see.
    let update = list.record_size(50, 10, Observation::Initial);
    assert_eq!(update.anchor_correction(), None);
    assert!(update.is_changed());
    assert_eq!(top_visible(&mut list), (20, 10));
}

#[test]
fn item_straddling_scroll_offset_is_anchored() {
    let mut list = estimated_list(100, 50);
    list.set_viewport_extent(200);
    list.set_scroll_offset(1_010);

    let update = list.record_size(20, 20, Observation::Resize);
    assert_eq!(update.anchor_correction(), Some(-30));

    let update = list.record_size(21, 70, Observation::Resize);
    assert_eq!(update.anchor_correction(), None);
}

#[test]
fn reordering_keeps_sizes_with_their_keys() {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new_with_key(5, |i| 100 + i as u64).with_estimate_size(|_| 10),
    ))
    .unwrap();
    list.set_viewport_extent(1_000);
    list.record_size(1, 40, Observation::Initial);
    list.record_size(3, 70, Observation::Initial);
    assert_eq!(list.total_extent(), 140);

    list.set_get_item_key(|i| 100 + (4 - i) as u64);
    assert_eq!(list.key_for(3), 101);
    assert_eq!(list.measured_size(3), Some(40));
    assert_eq!(list.measured_size(1), Some(70));
    assert_eq!(list.item(1).map(|it| it.size), Some(70));
    assert_eq!(list.item(3).map(|it| it.offset), Some(90));
    assert_eq!(list.total_extent(), 140);
    assert_eq!(list.measurement_cache_len(), 2);
}

#[test]
fn count_change_prunes_removed_keys_by_default() {
    let mut list = estimated_list(10, 10);
    list.record_size(2, 20, Observation::Initial);
    list.record_size(8, 20, Observation::Initial);
    list.set_count(5);
    assert_eq!(list.measurement_cache_len(), 1);
    assert_eq!(list.measured_size(2), Some(20));

    let mut list = VirtualList::new(
        ListOptions::new(AxisOptions::new(10).with_estimate_size(|_| 10))
            .with_eviction(EvictionPolicy::Retain),
    )
    .unwrap();
    list.record_size(2, 20, Observation::Initial);
    list.record_size(8, 20, Observation::Initial);
    list.set_count(5);
    assert_eq!(list.measurement_cache_len(), 2);
    assert_eq!(list.prune_measurements(), 1);
    assert_eq!(list.measurement_cache_len(), 1);

    list.reset_measurements();
    assert_eq!(list.measurement_cache_len(), 0);
    assert_eq!(list.total_extent(), 50);
}

#[test]
fn phase_follows_measurement_of_visible_items() {
    let mut list = estimated_list(10, 10);
    list.set_viewport_extent(30);
    assert_eq!(list.phase(), AxisPhase::Uncomputed);

    list.compute_range();
    assert_eq!(list.phase(), AxisPhase::Estimated);

    list.record_size(0, 10, Observation::Initial);
    list.compute_range();
    assert_eq!(list.phase(), AxisPhase::PartiallyMeasured);

    list.record_size(1, 10, Observation::Initial);
    list.record_size(2, 10, Observation::Initial);
    list.compute_range();
    assert_eq!(list.phase(), AxisPhase::Stable);

    // Overscanned items do not count; the newly exposed ones do.
    list.set_scroll_offset(50);
    list.compute_range();
    assert_eq!(list.phase(), AxisPhase::Estimated);
}

#[test]
fn debouncer_clears_after_quiet_period() {
    let mut d = ScrollingDebouncer::new(100);
    assert!(!d.is_scrolling());
    assert!(d.notify_scroll(0));
    assert!(d.is_scrolling());
    assert!(!d.notify_scroll(50));
    assert_eq!(d.pending_reset(), Some(150));

    assert!(!d.poll(120));
    assert!(d.is_scrolling());
    assert!(d.poll(150));
    assert!(!d.is_scrolling());
    assert_eq!(d.pending_reset(), None);
    assert!(!d.poll(500));

    assert!(d.notify_scroll(600));
    d.cancel();
    assert!(!d.is_scrolling());
    assert!(!d.poll(1_000));
}

#[test]
fn list_scroll_events_drive_is_scrolling() {
    let mut list = estimated_list(100, 10);
    assert_eq!(list.scrolling().delay_ms(), DEFAULT_SCROLLING_DELAY_MS);
    list.apply_scroll_event(10, 1_000);
    list.apply_scroll_event(20, 1_090);
    assert!(list.is_scrolling());
    assert!(!list.update_scrolling(1_150));
    assert!(list.update_scrolling(1_190));
    assert!(!list.is_scrolling());
    assert_eq!(list.scroll_offset(), 20);

    list.apply_scroll_event(30, 2_000);
    list.cancel_scrolling();
    assert!(!list.is_scrolling());
}

#[test]
fn scroll_direction_follows_offset_changes() {
    let mut list = estimated_list(100, 10);
    assert_eq!(list.scroll_direction(), None);
    list.set_scroll_offset(100);
    assert_eq!(list.scroll_direction(), Some(ScrollDirection::Forward));
    list.set_scroll_offset(50);
    assert_eq!(list.scroll_direction(), Some(ScrollDirection::Backward));
    list.set_scroll_offset(50);
    assert_eq!(list.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn index_at_offset_uses_item_ends() {
    let mut list = estimated_list(10, 10);
    assert_eq!(list.index_at_offset(0), Some(0));
    assert_eq!(list.index_at_offset(25), Some(2));
    assert_eq!(list.index_at_offset(30), Some(3));
    assert_eq!(list.index_at_offset(10_000), Some(9));

    let mut uniform = uniform_list(10, 10);
    assert_eq!(uniform.index_at_offset(30), Some(3));
    assert_eq!(uniform.index_at_offset(10_000), Some(9));

    assert_eq!(estimated_list(0, 10).index_at_offset(0), None);
}

#[test]
fn scroll_to_index_offset_aligns_and_clamps() {
    let mut list = uniform_list(100, 10);
    list.set_viewport_extent(50);

    assert_eq!(list.scroll_to_index_offset(20, Align::Start), 200);
    assert_eq!(list.scroll_to_index_offset(20, Align::End), 160);
    assert_eq!(list.scroll_to_index_offset(20, Align::Center), 180);
    assert_eq!(list.scroll_to_index_offset(20, Align::Auto), 160);
    assert_eq!(list.scroll_to_index_offset(99, Align::Start), 950);
    assert_eq!(list.scroll_to_index_offset(1_000, Align::Start), 950);

    list.set_scroll_offset(300);
    assert_eq!(list.scroll_to_index_offset(31, Align::Auto), 300);
    assert_eq!(list.scroll_to_index_offset(20, Align::Auto), 200);

    assert_eq!(estimated_list(0, 10).scroll_to_index_offset(5, Align::Start), 0);
}

#[test]
fn list_snapshot_restores_measurements_and_scroll() {
    let mut list = estimated_list(100, 50);
    list.set_viewport_extent(300);
    list.record_size(3, 120, Observation::Initial);
    list.record_size(4, 10, Observation::Initial);
    list.apply_scroll_event(700, 0);
    let snapshot = list.snapshot();
    assert_eq!(snapshot.measurements.len(), 2);

    let mut restored = estimated_list(100, 50);
    restored.restore(snapshot);
    assert_eq!(restored.scroll_offset(), 700);
    assert_eq!(restored.viewport_extent(), 300);
    assert_eq!(restored.measured_size(3), Some(120));
    assert!(!restored.is_scrolling());
    assert_eq!(restored.total_extent(), list.total_extent());
    assert_eq!(restored.compute_range(), list.compute_range());

    // Measurements from a previous mount win over first-render reports.
    assert_eq!(
        restored.record_size(3, 50, Observation::Initial),
        SizeUpdate::Ignored
    );
}

#[test]
fn export_import_round_trips_cache() {
    let mut list = estimated_list(10, 10);
    list.record_size(1, 15, Observation::Initial);
    let mut exported = list.export_measurement_cache();
    exported.sort();
    assert_eq!(exported, [(1u64, 15u32)]);

    let mut other = estimated_list(10, 10);
    other.import_measurement_cache(exported);
    assert_eq!(other.measured_size(1), Some(15));
    assert_eq!(other.total_extent(), 105);
}

fn scenario_grid() -> VirtualGrid {
    let mut grid = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(10).with_uniform_size(30),
        AxisOptions::new(8).with_estimate_size(|_| 200),
    ))
    .unwrap();
    grid.set_viewport(800, 300);
    grid
}

#[test]
fn grid_uses_widest_measured_cell_per_column() {
    let mut grid = scenario_grid();
    assert_eq!(grid.total_columns_width(), 1_600);

    assert_eq!(
        grid.record_cell_width(2, 5, 240, Observation::Initial),
        SizeUpdate::Changed {
            delta: 40,
            anchor_correction: None
        }
    );
    assert_eq!(grid.column_width(5), Some(240));
    assert_eq!(grid.column_widths()[5], 240);
    assert_eq!(grid.total_columns_width(), 1_640);

    let columns = grid.compute_columns();
    assert_eq!(columns.start_index(), Some(0));
    assert_eq!(columns.end_index(), Some(6));
    assert_eq!(columns.items[5].size, 240);
    assert_eq!(columns.items[6].offset, 1_240);

    // A narrower cell in the same column does not shrink it.
    assert_eq!(
        grid.record_cell_width(7, 5, 220, Observation::Initial),
        SizeUpdate::Changed {
            delta: 0,
            anchor_correction: None
        }
    );
    assert_eq!(grid.column_width(5), Some(240));

    assert_eq!(
        grid.record_cell_width(2, 5, 210, Observation::Resize),
        SizeUpdate::Changed {
            delta: -20,
            anchor_correction: None
        }
    );
    assert_eq!(grid.column_width(5), Some(220));
    assert_eq!(grid.cell_widths().len(), 2);
}

#[test]
fn grid_cell_anchor_correction_is_horizontal() {
    let mut grid = scenario_grid();
    grid.set_scroll(90, 1_200);

    let update = grid.record_cell_width(2, 5, 240, Observation::Initial);
    assert_eq!(update.anchor_correction(), Some(40));
    assert_eq!(grid.scroll_top(), 90);

    let update = grid.record_cell_width(2, 7, 260, Observation::Initial);
    assert_eq!(update.anchor_correction(), None);
}

#[test]
fn grid_axes_window_independently() {
    let mut grid = scenario_grid();
    grid.set_scroll(90, 450);

    let rows = grid.compute_rows();
    assert_eq!(rows.visible.map(|v| v.start_index), Some(3));
    assert_eq!(rows.start_index(), Some(2));
    assert_eq!(rows.end_index(), Some(9));
    assert_eq!(rows.total_extent, 300);

    let columns = grid.compute_columns();
    assert_eq!(
        columns.visible,
        Some(WindowRange {
            start_index: 2,
            end_index: 6
        })
    );
    assert_eq!(columns.start_index(), Some(0));
    assert_eq!(columns.end_index(), Some(7));
}

#[test]
fn grid_defaults_overscan_per_axis() {
    let grid = scenario_grid();
    assert_eq!(grid.rows().options().overscan, DEFAULT_ROW_OVERSCAN);
    assert_eq!(grid.columns().options().overscan, DEFAULT_COLUMN_OVERSCAN);
    assert_eq!(grid.rows().axis(), Axis::Vertical);
    assert_eq!(grid.columns().axis(), Axis::Horizontal);
}

#[test]
fn grid_row_heights_and_fixed_axes() {
    let mut grid = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(100).with_estimate_size(|_| 40),
        AxisOptions::new(4).with_uniform_size(100),
    ))
    .unwrap();
    grid.set_viewport(400, 200);
    grid.set_scroll(400, 0);

    let update = grid.record_row_height(3, 60, Observation::Initial);
    assert_eq!(update.anchor_correction(), Some(20));
    assert_eq!(grid.total_rows_height(), 4_020);
    assert_eq!(
        grid.record_cell_width(0, 0, 300, Observation::Resize),
        SizeUpdate::Ignored
    );
    assert_eq!(grid.total_columns_width(), 400);

    grid.compute_rows();
    grid.compute_columns();
    assert_eq!(grid.row_phase(), AxisPhase::Estimated);
    assert_eq!(grid.column_phase(), AxisPhase::Stable);
}

#[test]
fn grid_column_phase_tracks_cell_measurements() {
    let mut grid = scenario_grid();
    grid.set_viewport(400, 300);
    grid.compute_columns();
    assert_eq!(grid.column_phase(), AxisPhase::Estimated);

    grid.record_cell_width(0, 0, 200, Observation::Initial);
    grid.compute_columns();
    assert_eq!(grid.column_phase(), AxisPhase::PartiallyMeasured);

    grid.record_cell_width(4, 1, 200, Observation::Initial);
    grid.compute_columns();
    assert_eq!(grid.column_phase(), AxisPhase::Stable);
}

#[test]
fn grid_prunes_cells_of_removed_rows_and_columns() {
    let mut grid = scenario_grid();
    grid.record_cell_width(9, 1, 250, Observation::Initial);
    grid.record_cell_width(1, 7, 250, Observation::Initial);
    grid.record_cell_width(1, 1, 230, Observation::Initial);
    assert_eq!(grid.cell_widths().len(), 3);

    grid.set_counts(5, 5);
    assert_eq!(grid.cell_widths().len(), 1);
    assert_eq!(grid.column_width(1), Some(230));

    grid.reset_measurements();
    assert!(grid.cell_widths().is_empty());
    assert_eq!(grid.total_columns_width(), 1_000);
}

#[test]
fn retained_cells_of_removed_rows_do_not_widen_columns() {
    let mut grid = VirtualGrid::new(
        GridOptions::new(
            AxisOptions::new(10).with_uniform_size(30),
            AxisOptions::new(8).with_estimate_size(|_| 200),
        )
        .with_eviction(EvictionPolicy::Retain),
    )
    .unwrap();
    grid.set_viewport(800, 300);
    grid.record_cell_width(9, 5, 500, Observation::Resize);
    assert_eq!(grid.column_width(5), Some(500));

    grid.set_counts(2, 8);
    assert_eq!(grid.cell_widths().len(), 1);
    assert_eq!(grid.column_width(5), Some(200));
    assert_eq!(grid.total_columns_width(), 1_600);

    // Growing back brings the row, and its width, back.
    grid.set_counts(10, 8);
    assert_eq!(grid.column_width(5), Some(500));
    assert_eq!(grid.total_columns_width(), 1_900);
}

#[test]
fn rekeyed_rows_drop_their_cell_widths_from_columns() {
    let mut grid = scenario_grid();
    grid.record_cell_width(2, 5, 500, Observation::Resize);
    assert_eq!(grid.total_columns_width(), 1_900);

    grid.set_row_key(|i| 1_000 + i as u64);
    assert_eq!(grid.column_width(5), Some(200));
    assert_eq!(grid.column_widths(), [200; 8]);
    assert_eq!(grid.total_columns_width(), 1_600);

    grid.record_cell_width(2, 5, 240, Observation::Initial);
    assert_eq!(grid.column_width(5), Some(240));
}

#[test]
fn grid_snapshot_round_trips() {
    let mut grid = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(50).with_estimate_size(|_| 30),
        AxisOptions::new(8).with_estimate_size(|_| 200),
    ))
    .unwrap();
    grid.set_viewport(640, 480);
    grid.apply_scroll_event(120, 300, 0);
    grid.record_row_height(1, 45, Observation::Initial);
    grid.record_cell_width(1, 2, 260, Observation::Initial);

    let snapshot = grid.snapshot();
    assert_eq!(snapshot.scroll_top, 120);
    assert_eq!(snapshot.viewport_width, 640);
    assert_eq!(snapshot.cell_widths, [(CellKey::new(1u64, 2u64), 260u32)]);

    let mut restored = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(50).with_estimate_size(|_| 30),
        AxisOptions::new(8).with_estimate_size(|_| 200),
    ))
    .unwrap();
    restored.restore(snapshot);
    assert_eq!(restored.scroll_left(), 300);
    assert_eq!(restored.total_rows_height(), 1_515);
    assert_eq!(restored.total_columns_width(), 1_660);
    assert!(!restored.is_scrolling());
}

#[test]
fn grid_scroll_events_drive_is_scrolling() {
    let mut grid = scenario_grid();
    grid.apply_scroll_event(10, 20, 0);
    assert!(grid.is_scrolling());
    assert_eq!((grid.scroll_top(), grid.scroll_left()), (10, 20));
    assert!(grid.update_scrolling(100));
    assert!(!grid.is_scrolling());
}

#[test]
fn grid_scroll_to_offsets_use_each_axis() {
    let mut grid = scenario_grid();
    grid.record_cell_width(0, 1, 300, Observation::Initial);
    assert_eq!(grid.scroll_to_row_offset(4, Align::Start), 0);
    assert_eq!(grid.scroll_to_row_offset(9, Align::End), 0);
    assert_eq!(grid.scroll_to_column_offset(2, Align::Start), 500);
    assert_eq!(grid.scroll_to_column_offset(7, Align::Start), 900);
}
