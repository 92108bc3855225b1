// Example: drive a list from a simulated host (scroll box, elements, resize observer).
use std::collections::{BTreeMap, HashSet};

use windowed::{AxisOptions, ConfigError, ListOptions};
use windowed_adapter::{
    BoxSize, INDEX_MARKER, ListController, ObservedElement, ResizeObserver, ScrollContainer,
    ScrollPosition, ViewportSize,
};

struct ScrollBox {
    top: u64,
    height: u32,
}

impl ScrollContainer for ScrollBox {
    fn scroll_position(&self) -> ScrollPosition {
        ScrollPosition {
            top: self.top,
            left: 0,
        }
    }

    fn viewport_size(&self) -> ViewportSize {
        ViewportSize {
            width: 400,
            height: self.height,
        }
    }

    fn scroll_by(&mut self, _dx: i64, dy: i64) {
        self.top = (self.top as i64 + dy).max(0) as u64;
    }
}

struct Row {
    index: usize,
    index_marker: String,
    connected: bool,
}

impl Row {
    fn new(index: usize) -> Self {
        Self {
            index,
            index_marker: index.to_string(),
            connected: true,
        }
    }
}

impl ObservedElement for Row {
    type Id = usize;

    fn id(&self) -> usize {
        self.index
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn marker(&self, name: &str) -> Option<&str> {
        (name == INDEX_MARKER).then_some(self.index_marker.as_str())
    }
}

#[derive(Default)]
struct Observer {
    observed: HashSet<usize>,
}

impl ResizeObserver<Row> for Observer {
    fn observe(&mut self, element: &Row) {
        self.observed.insert(element.index);
    }

    fn unobserve(&mut self, id: &usize) {
        self.observed.remove(id);
    }
}

/// Rows with text wrap to a height that depends on the row.
fn rendered_height(index: usize) -> u32 {
    24 + (index % 4) as u32 * 18
}

fn main() -> Result<(), ConfigError> {
    let mut scroll_box = ScrollBox {
        top: 2_000,
        height: 480,
    };
    let mut observer = Observer::default();
    let mut controller: ListController<Row> = ListController::new(ListOptions::new(
        AxisOptions::new(5_000).with_estimate_size(|_| 40),
    ))?;
    controller.mount(&scroll_box);

    // Render passes until every visible row is measured.
    let mut rendered: BTreeMap<usize, Row> = BTreeMap::new();
    for pass in 0..4 {
        let indices: Vec<usize> = controller.range().items.iter().map(|it| it.index).collect();
        for index in &indices {
            let row = rendered.entry(*index).or_insert_with(|| Row::new(*index));
            let size = BoxSize::new(400, rendered_height(*index));
            let update =
                controller.on_element_rendered(row, Some(size), &mut observer, &mut scroll_box);
            if update.anchor_correction().is_some() {
                println!("pass {pass}: row {index} corrected scroll by {update:?}");
            }
        }
        controller.range();
        println!(
            "pass {pass}: top={} rendered={:?} phase={:?} observed={}",
            scroll_box.top,
            indices.first().zip(indices.last()),
            controller.list().phase(),
            observer.observed.len()
        );
    }

    // Rows scrolled out of view are detached; their next notification unobserves them.
    scroll_box.top += 2_000;
    controller.on_scroll(&scroll_box, 0);
    let visible = controller.range().range;
    for row in rendered.values_mut() {
        row.connected = visible.is_some_and(|r| r.contains(row.index));
        if !row.connected {
            controller.on_size_changed(row, BoxSize::default(), &mut observer, &mut scroll_box);
        }
    }
    println!("after scrolling away: observed={}", observer.observed.len());

    controller.tick(100);
    controller.unmount(&mut observer);
    println!(
        "after unmount: observed={} scrolling={}",
        observer.observed.len(),
        controller.is_scrolling()
    );
    Ok(())
}
