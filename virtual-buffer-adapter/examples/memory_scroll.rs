use virtual_buffer::BufferOptions;
use virtual_buffer_adapter::{Adapter, MemoryDatasource};

fn print_rows(a: &Adapter<String, MemoryDatasource<String>>) {
    let rows: Vec<String> = a
        .rows()
        .iter()
        .map(|r| format!("{}: {}", r.index, r.item))
        .collect();
    println!(
        "scroll_top={} top={} bottom={} rows={rows:?}",
        a.scroll_top(),
        a.top_padding(),
        a.bottom_padding()
    );
}

fn main() {
    // Example: a synchronous adapter over an in-memory list, with out-of-band edits.
    let items = (1..=30).map(|i| format!("item{i}")).collect();
    let mut a = Adapter::new(
        MemoryDatasource::new(1, items),
        BufferOptions::new(100).with_viewport_height(500),
    );
    print_rows(&a);

    for _ in 0..3 {
        a.on_scroll(u64::MAX);
    }
    print_rows(&a);

    // Remove the head while scrolled to the bottom: the visible rows stay where they are.
    a.datasource_mut().remove(1);
    let removed = a.apply_updates(1, None);
    println!("remove(1) -> {removed:?}");
    print_rows(&a);

    // Mark every rendered even row.
    let marked = a.apply_updates_with(|item| {
        let n: u32 = item.trim_start_matches("item").parse().ok()?;
        (n % 2 == 0).then(|| vec![format!("{item} (even)")])
    });
    println!("mark even rows -> {marked:?}");
    print_rows(&a);
}
