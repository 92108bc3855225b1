// Example: measured sizes follow their keys when the collection is reordered.
use std::sync::Arc;

use windowed::{AxisOptions, ConfigError, ListOptions, Observation, VirtualList};

fn main() -> Result<(), ConfigError> {
    let ids: Arc<Vec<u64>> = Arc::new((0..10).map(|i| 1_000 + i).collect());
    let keys = Arc::clone(&ids);
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new_with_key(ids.len(), move |i| keys[i]).with_estimate_size(|_| 20),
    ))?;
    list.set_viewport_extent(100);
    list.record_size(0, 55, Observation::Initial);
    println!("key 1000 at index 0: size={:?}", list.measured_size(0));

    let reversed: Arc<Vec<u64>> = Arc::new(ids.iter().rev().copied().collect());
    list.set_get_item_key(move |i| reversed[i]);
    println!(
        "after reverse: key={} size={:?} total={}",
        list.key_for(9),
        list.measured_size(9),
        list.total_extent()
    );
    Ok(())
}
