// Example: minimal usage and scroll-to helper.
use windowed::{Align, AxisOptions, ConfigError, ListOptions, VirtualList};

fn main() -> Result<(), ConfigError> {
    let mut list = VirtualList::new(ListOptions::new(
        AxisOptions::new(1_000_000).with_uniform_size(40),
    ))?;
    list.set_viewport_extent(600);
    list.set_scroll_offset(123_456);

    let r = list.compute_range();
    println!("total_extent={}", r.total_extent);
    println!("render_range={:?} visible={:?}", r.range, r.visible);
    println!("first_rendered={:?}", r.items.first());

    let off = list.scroll_to_index_offset(999_999, Align::End);
    list.set_scroll_offset(off);
    println!(
        "after scroll_to_index: offset={} range={:?}",
        list.scroll_offset(),
        list.compute_range().range
    );
    Ok(())
}
