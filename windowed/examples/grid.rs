// Example: a grid with fixed-height rows and auto-sized columns.
use windowed::{AxisOptions, ConfigError, GridOptions, Observation, VirtualGrid};

fn main() -> Result<(), ConfigError> {
    let mut grid = VirtualGrid::new(GridOptions::new(
        AxisOptions::new(10_000).with_uniform_size(35),
        AxisOptions::new(50).with_estimate_size(|_| 200),
    ))?;
    grid.set_viewport(800, 600);
    grid.set_scroll(3_500, 900);

    let rows = grid.compute_rows().range.clone();
    let columns = grid.compute_columns().range.clone();
    let width = grid.total_columns_width();
    println!("rows={rows:?} columns={columns:?} width={width}");

    // Columns take the widest cell measured so far.
    let update = grid.record_cell_width(102, 5, 240, Observation::Initial);
    println!(
        "record_cell_width(102, 5): {update:?} column5={:?} width={}",
        grid.column_width(5),
        grid.total_columns_width()
    );

    // Column 2 starts left of the viewport: its growth is compensated on scroll-left.
    let update = grid.record_cell_width(103, 2, 260, Observation::Initial);
    if let Some(delta) = update.anchor_correction() {
        let left = (grid.scroll_left() as i64 + delta) as u64;
        grid.set_scroll(grid.scroll_top(), left);
    }
    println!(
        "record_cell_width(103, 2): {update:?} scroll_left={}",
        grid.scroll_left()
    );
    Ok(())
}
