// Example: fetches resolved later (e.g. over the network) race with data updates.
use virtual_buffer::{BufferOptions, FetchOutcome, ScrollBuffer, Update};

fn page(from: i64, count: usize) -> Vec<String> {
    (from..from + count as i64)
        .filter(|i| (1..=200).contains(i))
        .map(|i| format!("message {i}"))
        .collect()
}

fn main() {
    let mut b = ScrollBuffer::new(BufferOptions::new(30).with_viewport_height(300));

    // Both edges may be in flight at once; each edge has at most one request outstanding.
    let mut in_flight = Vec::new();
    while let Some(req) = b.next_fetch() {
        in_flight.push(req);
    }
    println!("issued {in_flight:?}");

    // Resolve the first request, then let an update land before the second one returns.
    let first = in_flight.remove(0);
    println!("{:?}", b.complete_fetch(first, page(first.from, first.count)));

    let removed = b.apply_updates(Update::remove(3));
    println!("remove(3) -> {removed:?}");
    for req in in_flight {
        match b.complete_fetch(req, page(req.from, req.count)) {
            FetchOutcome::Discarded(reason) => println!("discarded {req:?}: {reason:?}"),
            applied => println!("{applied:?}"),
        }
    }

    // Re-plan against the new state.
    while let Some(req) = b.next_fetch() {
        b.complete_fetch(req, page(req.from, req.count));
    }
    println!("snapshot={:?}", b.snapshot());
}
