// Example: carry measurements over to a new mount.
use windowed::{AxisOptions, ConfigError, ListOptions, Observation, VirtualList};

fn options() -> ListOptions {
    ListOptions::new(AxisOptions::new(10).with_estimate_size(|_| 1))
}

fn main() -> Result<(), ConfigError> {
    let mut first = VirtualList::new(options())?;
    first.set_viewport_extent(5);
    first.record_size(2, 10, Observation::Initial);
    first.record_size(5, 42, Observation::Initial);
    first.set_scroll_offset(12);

    let snapshot = first.snapshot();
    println!("exported_cache_len={}", snapshot.measurements.len());

    let mut second = VirtualList::new(options())?;
    println!(
        "before restore: size2={:?} size5={:?}",
        second.item(2).map(|it| it.size),
        second.item(5).map(|it| it.size)
    );

    second.restore(snapshot);
    println!(
        "after restore: cache_len={} size2={:?} size5={:?} off={}",
        second.measurement_cache_len(),
        second.item(2).map(|it| it.size),
        second.item(5).map(|it| it.size),
        second.scroll_offset()
    );

    // The first report of a freshly rendered element does not override the restored size.
    println!(
        "initial report for item 5: {:?}",
        second.record_size(5, 1, Observation::Initial)
    );
    Ok(())
}
