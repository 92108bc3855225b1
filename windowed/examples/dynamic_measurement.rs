// Example: measured sizes and anchor correction.
use windowed::{AxisOptions, ConfigError, ListOptions, Observation, VirtualList};

fn main() -> Result<(), ConfigError> {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new(100).with_estimate_size(|_| 10),
    ))?;
    list.set_viewport_extent(30);
    list.set_scroll_offset(200);

    let off = list.scroll_offset();
    let total = list.total_extent();
    let range = list.compute_range().range.clone();
    let phase = list.phase();
    println!("before: off={off} total={total} range={range:?} phase={phase:?}");

    // Item 0 sits above the viewport: its new size moves everything below it, so the host is
    // told how far to scroll to keep the visible items where they are.
    let update = list.record_size(0, 30, Observation::Initial);
    if let Some(delta) = update.anchor_correction() {
        let off = (list.scroll_offset() as i64 + delta) as u64;
        list.set_scroll_offset(off);
    }
    println!(
        "record_size(0): {update:?} off={} total={}",
        list.scroll_offset(),
        list.total_extent()
    );

    // Measuring the visible items settles the phase.
    if let Some(visible) = list.compute_range().visible {
        for index in visible.indices() {
            list.record_size(index, 10, Observation::Initial);
        }
    }
    list.compute_range();
    println!("after measuring visible items: phase={:?}", list.phase());
    Ok(())
}
