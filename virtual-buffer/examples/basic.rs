// Example: drive the fetch protocol against an in-memory list.
use virtual_buffer::{BufferOptions, ScrollBuffer};

fn fetch(data: &[String], from: i64, count: usize) -> Vec<String> {
    let lo = from.max(0) as usize;
    let hi = (from + count as i64).clamp(0, data.len() as i64) as usize;
    data.get(lo..hi).map(<[String]>::to_vec).unwrap_or_default()
}

fn pump(b: &mut ScrollBuffer<String>, data: &[String]) {
    while let Some(req) = b.next_fetch() {
        let items = fetch(data, req.from, req.count);
        let outcome = b.complete_fetch(req, items);
        println!("  {:?} {}..{} -> {outcome:?}", req.edge, req.from, req.end());
    }
}

fn main() {
    let data: Vec<String> = (0..10_000).map(|i| format!("row {i}")).collect();
    let mut b = ScrollBuffer::new(
        BufferOptions::new(20)
            .with_viewport_height(400)
            .with_start_index(0)
            .with_max_index(Some(data.len() as i64 - 1)),
    );

    println!("initial fill:");
    pump(&mut b, &data);
    println!("snapshot={:?}", b.snapshot());

    // A long jump evicts everything and repositions instead of streaming every page.
    b.on_scroll(100_000);
    println!("jump to 100000:");
    pump(&mut b, &data);
    println!(
        "first={:?} last={:?} padding={:?}",
        b.rows().front().map(|r| r.index),
        b.rows().back().map(|r| r.index),
        b.padding()
    );
}
