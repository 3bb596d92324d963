use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        start + self.gen_range_u64(0, start.abs_diff(end_exclusive)) as i64
    }
}

/// In-memory data keeping the same index bookkeeping as the engine: removing the head bumps
/// `min`, anything else shifts the tail down. `remove_towards_head` mirrors the engine removing
/// its own `min` while there is unseen data before it.
#[derive(Clone, Debug)]
struct Source {
    min: i64,
    items: Vec<String>,
}

impl Source {
    fn new(count: i64) -> Self {
        Self {
            min: 1,
            items: (1..=count).map(|i| format!("item{i}")).collect(),
        }
    }

    fn max(&self) -> i64 {
        self.min + self.items.len() as i64 - 1
    }

    fn get(&self, from: i64, count: usize) -> Vec<String> {
        let lo = from.max(self.min);
        let hi = from
            .saturating_add(count as i64)
            .min(self.max() + 1);
        (lo..hi)
            .map(|i| self.items[(i - self.min) as usize].clone())
            .collect()
    }

    fn remove(&mut self, index: i64) {
        if index < self.min || index > self.max() {
            return;
        }
        self.items.remove((index - self.min) as usize);
        if index == self.min {
            self.min += 1;
        }
    }

    fn remove_towards_head(&mut self, index: i64) {
        if index < self.min || index > self.max() {
            return;
        }
        self.items.remove((index - self.min) as usize);
        self.min += 1;
    }

    fn replace(&mut self, index: i64, items: Vec<String>) {
        if index < self.min || index > self.max() {
            return;
        }
        let pos = (index - self.min) as usize;
        self.items.splice(pos..=pos, items);
    }
}

fn options() -> BufferOptions {
    BufferOptions::new(100).with_viewport_height(500)
}

/// Runs fetches until the window controller is satisfied. Returns the number of fetches.
fn drive(b: &mut ScrollBuffer<String>, src: &Source) -> usize {
    for n in 0..1000 {
        let Some(req) = b.next_fetch() else {
            return n;
        };
        let items = src.get(req.from, req.count);
        b.complete_fetch(req, items);
    }
    panic!("window controller did not settle");
}

fn scroll(b: &mut ScrollBuffer<String>, src: &Source, offset: u64) {
    b.on_scroll(offset);
    drive(b, src);
}

fn items(b: &ScrollBuffer<String>) -> Vec<&str> {
    b.rows().iter().map(|r| r.item.as_str()).collect()
}

fn indexes(b: &ScrollBuffer<String>) -> Vec<i64> {
    b.rows().iter().map(|r| r.index).collect()
}

fn assert_consistent(b: &ScrollBuffer<String>) {
    assert!(b.check_invariants(), "invariants broken: {:?}", b.snapshot());
    assert_eq!(
        b.total_height(),
        b.range().len() * b.options().item_height as u64
    );
    let snap = b.snapshot();
    assert_eq!(snap.total_height(), b.total_height());
    assert_eq!(snap.last(), b.rows().last());
}

#[test]
fn initial_fill_covers_viewport_and_closes_top() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    let fetches = drive(&mut b, &src);

    // One forward page, one empty backward page.
    assert_eq!(fetches, 2);
    assert_eq!(indexes(&b), (1..=10).collect::<Vec<_>>());
    assert_eq!(b.padding(), Padding { top: 0, bottom: 0 });
    assert_eq!(b.min_index(), 1);
    assert_eq!(b.max_index(), 10);
    assert!(b.range().bof);
    assert!(!b.range().eof);
    assert_eq!(b.scroll_top(), 0);
    assert_consistent(&b);
}

#[test]
fn at_most_one_fetch_per_edge() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::<String>::new(options());

    let bottom = b.next_fetch().unwrap();
    assert_eq!(bottom.edge, Edge::Bottom);
    assert_eq!((bottom.from, bottom.count), (1, 10));

    let top = b.next_fetch().unwrap();
    assert_eq!(top.edge, Edge::Top);
    assert_eq!((top.from, top.count), (-9, 10));

    assert_eq!(b.next_fetch(), None);
    assert!(b.is_pending(Edge::Top));
    assert!(b.is_pending(Edge::Bottom));

    let out = b.complete_fetch(top, src.get(top.from, top.count));
    assert_eq!(
        out,
        FetchOutcome::Applied {
            rows: 0,
            closed_edge: true
        }
    );
    let out = b.complete_fetch(bottom, src.get(bottom.from, bottom.count));
    assert!(out.is_applied());
    assert_eq!(b.rows().len(), 10);

    // Completing twice is a no-op.
    assert_eq!(
        b.complete_fetch(bottom, Vec::new()),
        FetchOutcome::Discarded(DiscardReason::NotPending)
    );
    assert_consistent(&b);
}

#[test]
fn fetch_is_discarded_after_an_update() {
    let mut src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);

    b.on_scroll(500);
    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from), (Edge::Bottom, 11));

    src.remove(2);
    assert_eq!(b.apply_updates(Update::remove(2)), Ok(true));

    let out = b.complete_fetch(req, src.get(req.from, req.count));
    assert_eq!(out, FetchOutcome::Discarded(DiscardReason::StaleGeneration));
    assert!(!b.is_pending(Edge::Bottom));
    assert_eq!(b.rows().len(), 9);

    // The refill starts right after the shifted tail.
    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from), (Edge::Bottom, 10));
    b.complete_fetch(req, src.get(req.from, req.count));
    assert_eq!(b.row(10).map(|r| r.item.as_str()), Some("item11"));
    assert_consistent(&b);
}

#[test]
fn fetch_is_discarded_when_its_edge_was_evicted() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);
    scroll(&mut b, &src, 500);
    assert_eq!(indexes(&b), (1..=20).collect::<Vec<_>>());

    b.on_scroll(1500);
    assert_eq!(b.rows().first(), 11);
    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from), (Edge::Bottom, 21));

    // Scrolling back evicts rows 17..=20 before the page arrives.
    b.on_scroll(600);
    assert_eq!(b.rows().last(), 16);
    let before = b.snapshot();
    let out = b.complete_fetch(req, src.get(req.from, req.count));
    assert_eq!(out, FetchOutcome::Discarded(DiscardReason::EdgeMoved));
    assert_eq!(b.snapshot(), before);
    assert_consistent(&b);
}

#[test]
fn scrolling_to_the_end_discovers_eof() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);
    for _ in 0..5 {
        scroll(&mut b, &src, 99_999);
    }
    assert!(b.range().is_fully_known());
    assert_eq!(b.max_index(), 30);
    assert_eq!(b.scroll_top(), 2500);
    assert_eq!(b.rows().last(), 30);
    assert_eq!(b.bottom_padding(), 0);
    assert_consistent(&b);

    scroll(&mut b, &src, 0);
    assert_eq!(b.top_padding(), 0);
    assert_eq!(indexes(&b), (1..=10).collect::<Vec<_>>());
    assert_eq!(b.bottom_padding(), 2000);
    assert_consistent(&b);
}

#[test]
fn short_page_drops_rows_the_hint_promised() {
    let src = Source::new(10);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(12)));
    drive(&mut b, &src);
    assert_eq!(b.bottom_padding(), 200);

    scroll(&mut b, &src, 99_999);
    assert_eq!(b.max_index(), 10);
    assert_eq!(b.bottom_padding(), 0);
    assert_eq!(b.total_height(), 1000);
    assert_eq!(b.scroll_top(), 500);
    assert_consistent(&b);
}

#[test]
fn min_index_hint_keeps_rows_in_place() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_start_index(28));
    drive(&mut b, &src);
    assert_eq!(indexes(&b), (18..=30).collect::<Vec<_>>());
    assert_eq!(b.scroll_top(), 800);
    assert!(b.range().eof);
    assert!(!b.range().bof);

    b.set_min_index(1);
    assert!(b.range().bof);
    assert_eq!(b.top_padding(), 1700);
    assert_eq!(b.scroll_top(), 2500);
    assert_consistent(&b);
}

#[test]
fn remove_below_buffer_shrinks_bottom_padding() {
    let mut src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    assert_eq!(b.bottom_padding(), 2000);

    src.remove(25);
    assert_eq!(b.apply_updates(Update::remove(25)), Ok(true));
    assert_eq!(b.bottom_padding(), 1900);
    assert_eq!(b.max_index(), 29);
    assert_eq!(b.scroll_top(), 0);
    assert_eq!(indexes(&b), (1..=10).collect::<Vec<_>>());
    assert_consistent(&b);
}

#[test]
fn remove_above_buffer_shifts_rendered_rows() {
    let mut src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    scroll(&mut b, &src, 2500);
    assert_eq!(indexes(&b), (23..=30).collect::<Vec<_>>());
    assert_eq!(b.top_padding(), 2200);

    src.remove(5);
    assert_eq!(b.apply_updates(Update::remove(5)), Ok(true));
    assert_eq!(indexes(&b), (22..=29).collect::<Vec<_>>());
    assert_eq!(b.row(22).map(|r| r.item.as_str()), Some("item23"));
    assert_eq!(b.top_padding(), 2100);
    assert_eq!(b.scroll_top(), 2400);
    assert_consistent(&b);

    // Removing the head moves `min` instead of shifting.
    src.remove(1);
    assert_eq!(b.apply_updates(Update::remove(1)), Ok(true));
    assert_eq!(b.min_index(), 2);
    assert_eq!(indexes(&b), (22..=29).collect::<Vec<_>>());
    assert_eq!(b.top_padding(), 2000);
    assert_eq!(b.scroll_top(), 2300);
    assert_consistent(&b);
}

#[test]
fn remove_and_replace_inside_buffer() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);

    assert_eq!(b.apply_updates(Update::remove(3)), Ok(true));
    assert_eq!(b.max_index(), 9);
    assert_eq!(b.row(3).map(|r| r.item.as_str()), Some("item4"));

    let abc = vec![String::from("a"), String::from("b"), String::from("c")];
    assert_eq!(b.apply_updates(Update::replace(2, abc)), Ok(true));
    assert_eq!(
        items(&b),
        [
            "item1", "a", "b", "c", "item4", "item5", "item6", "item7", "item8", "item9",
            "item10"
        ]
    );
    assert_eq!(indexes(&b), (1..=11).collect::<Vec<_>>());
    assert_eq!(b.max_index(), 11);
    assert_eq!(b.scroll_top(), 0);
    assert_consistent(&b);
}

#[test]
fn predicate_only_sees_rendered_rows() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    let before = b.snapshot();

    let mut seen = 0usize;
    let hit = b
        .apply_updates(Update::predicate(|item: &String| {
            seen += 1;
            (item == "item20").then(Vec::new)
        }))
        .unwrap();
    assert!(!hit);
    assert_eq!(seen, 10);
    assert_eq!(b.snapshot(), before);

    let hit = b
        .apply_updates(Update::predicate(|item: &String| {
            (item == "item3" || item == "item20").then(Vec::new)
        }))
        .unwrap();
    assert!(hit);
    assert_eq!(b.max_index(), 29);
    assert_eq!(b.rows().len(), 9);
    assert_eq!(b.bottom_padding(), 2000);
    assert_consistent(&b);
}

#[test]
fn predicate_edits_see_shifted_indexes() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);

    let hit = b
        .apply_updates(Update::predicate(|item: &String| match item.as_str() {
            "item2" | "item4" => Some(Vec::new()),
            "item6" => Some(vec![String::from("x"), String::from("y")]),
            _ => None,
        }))
        .unwrap();
    assert!(hit);
    assert_eq!(
        items(&b),
        ["item1", "item3", "item5", "x", "y", "item7", "item8", "item9", "item10"]
    );
    assert_eq!(indexes(&b), (1..=9).collect::<Vec<_>>());
    assert_eq!(b.max_index(), 9);
    assert_consistent(&b);
}

#[test]
fn out_of_range_updates_change_nothing() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);
    let before = b.snapshot();
    let generation = b.generation();

    assert_eq!(b.apply_updates(Update::remove(99)), Ok(false));
    assert_eq!(
        b.apply_updates(Update::replace(0, vec![String::from("zero")])),
        Ok(false)
    );
    assert_eq!(b.snapshot(), before);
    assert_eq!(b.generation(), generation);
    assert_eq!(items(&b)[0], "item1");
}

#[test]
fn negative_index_is_rejected_before_mutation() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);
    let before = b.snapshot();

    let err = b.apply_updates(Update::remove(-1)).unwrap_err();
    assert_eq!(err, InvalidUpdateError::NegativeIndex(-1));
    assert_eq!(format!("{err}"), "applyUpdates: -1 is not a valid index");
    assert_eq!(b.snapshot(), before);
}

#[test]
fn anchor_follows_removals_above_it() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    scroll(&mut b, &src, 200);
    assert_eq!(b.capture_anchor().map(|a| a.index), Some(3));

    // Below the visible window: no movement.
    assert_eq!(b.apply_updates(Update::remove(9)), Ok(true));
    assert_eq!(b.scroll_top(), 200);

    // Above the anchor: one row height per removed row.
    assert_eq!(b.apply_updates(Update::remove(2)), Ok(true));
    assert_eq!(b.scroll_top(), 100);
    assert_consistent(&b);
}

#[test]
fn anchor_keeps_offset_within_row() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    scroll(&mut b, &src, 250);
    assert_eq!(
        b.capture_anchor(),
        Some(ScrollAnchor {
            index: 3,
            offset_in_row: 50
        })
    );

    assert_eq!(b.apply_updates(Update::remove(1)), Ok(true));
    assert_eq!(b.min_index(), 2);
    assert_eq!(b.scroll_top(), 150);
    assert_consistent(&b);
}

#[test]
fn deleted_anchor_falls_back_to_next_row() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    scroll(&mut b, &src, 200);

    assert_eq!(b.apply_updates(Update::remove(3)), Ok(true));
    assert_eq!(b.scroll_top(), 200);
    assert_eq!(b.row(3).map(|r| r.item.as_str()), Some("item4"));
}

#[test]
fn removing_min_with_an_open_top_edge_keeps_rows_in_sync() {
    let mut src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_start_index(11));
    drive(&mut b, &src);
    assert_eq!(indexes(&b), (1..=20).collect::<Vec<_>>());
    assert_eq!(b.scroll_top(), 1000);
    assert!(!b.range().bof);

    src.remove(1);
    assert_eq!(src.min, 2);
    assert_eq!(b.apply_updates(Update::remove(1)), Ok(true));
    assert_eq!(b.min_index(), 2);
    assert_eq!(b.max_index(), 20);
    assert_eq!(indexes(&b), (2..=20).collect::<Vec<_>>());
    assert_eq!(b.row(2).map(|r| r.item.as_str()), Some("item2"));
    assert_eq!(b.row(11).map(|r| r.item.as_str()), Some("item11"));
    // Row 11 stays at the top of the viewport.
    assert_eq!(b.scroll_top(), 900);
    assert_consistent(&b);

    scroll(&mut b, &src, 0);
    assert!(b.range().bof);
    assert_eq!(b.rows().front().map(|r| (r.index, r.item.as_str())), Some((2, "item2")));
    assert_eq!(b.top_padding(), 0);
    assert_consistent(&b);
}

#[test]
fn removing_min_above_the_source_head_shifts_unseen_rows() {
    let mut src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_start_index(21));
    drive(&mut b, &src);
    assert_eq!(b.min_index(), 11);

    src.remove_towards_head(11);
    assert_eq!(b.apply_updates(Update::remove(11)), Ok(true));
    assert_eq!(b.min_index(), 12);
    assert_eq!(b.row(12).map(|r| r.item.as_str()), Some("item12"));

    for _ in 0..3 {
        scroll(&mut b, &src, 0);
    }
    assert!(b.range().bof);
    assert_eq!(b.min_index(), 2);
    assert_eq!(b.row(2).map(|r| r.item.as_str()), Some("item1"));
    assert_eq!(b.row(11).map(|r| r.item.as_str()), Some("item10"));
    assert_consistent(&b);
}

#[test]
fn lowest_start_index_is_clamped() {
    let mut b = ScrollBuffer::<String>::new(options().with_start_index(i64::MIN));
    assert_eq!(b.options().start_index, i64::MIN + 1);
    assert!(b.range().is_empty());
    assert_eq!(b.rows().first(), i64::MIN + 1);
    assert_eq!(b.rows().last(), i64::MIN);
    assert_consistent(&b);

    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from, req.count), (Edge::Bottom, i64::MIN + 1, 10));
    // Nothing exists above the lowest index.
    assert_eq!(b.next_fetch(), None);

    let page = (0..10).map(|k| format!("row{k}")).collect();
    assert!(b.complete_fetch(req, page).is_applied());
    assert_eq!(b.min_index(), i64::MIN + 1);
    assert_consistent(&b);

    b.set_min_index(i64::MIN);
    assert_eq!(b.min_index(), i64::MIN + 1);
    assert_consistent(&b);
}

#[test]
fn highest_start_index_fetches_a_single_row() {
    let mut b = ScrollBuffer::<String>::new(options().with_start_index(i64::MAX));
    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from, req.count), (Edge::Bottom, i64::MAX, 1));
    assert!(b.complete_fetch(req, vec![String::from("last")]).is_applied());
    assert_eq!(b.max_index(), i64::MAX);

    let req = b.next_fetch().unwrap();
    assert_eq!((req.edge, req.from, req.count), (Edge::Top, i64::MAX - 10, 10));
    let page = (0..10).map(|k| format!("row{k}")).collect();
    assert!(b.complete_fetch(req, page).is_applied());
    assert_eq!(b.next_fetch(), None);
    assert_consistent(&b);

    assert_eq!(
        b.apply_updates(Update::replace(i64::MAX - 3, vec![String::new(); 2])),
        Err(InvalidUpdateError::IndexOverflow {
            index: i64::MAX - 3,
            len: 2
        })
    );
    assert_eq!(b.apply_updates(Update::remove(i64::MAX)), Ok(true));
    assert_eq!(b.max_index(), i64::MAX - 1);
    assert_consistent(&b);
}

#[test]
fn removing_the_only_row_collapses_the_range() {
    let src = Source::new(1);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);
    assert_eq!((b.min_index(), b.max_index()), (1, 1));

    assert_eq!(b.apply_updates(Update::remove(1)), Ok(true));
    assert!(b.range().is_empty());
    assert!(b.rows().is_empty());
    assert_eq!(b.padding(), Padding::default());
    assert_eq!(b.total_height(), 0);
    assert_eq!(b.apply_updates(Update::remove(1)), Ok(false));
    assert_eq!(b.next_fetch(), None);
    assert_consistent(&b);
}

#[test]
fn jump_repositions_instead_of_streaming() {
    let src = Source::new(1000);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(1000)));
    drive(&mut b, &src);

    b.on_scroll(50_000);
    assert!(b.rows().is_empty());
    assert_eq!(b.rows().first(), 498);
    let fetches = drive(&mut b, &src);
    assert_eq!(fetches, 2);
    assert_eq!(b.index_at(50_000), Some(501));
    assert_eq!(b.row(501).map(|r| r.item.as_str()), Some("item501"));
    assert_eq!(b.scroll_top(), 50_000);
    assert_consistent(&b);
}

#[test]
fn offsets_cover_paddings_and_rows() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options().with_max_index(Some(30)));
    drive(&mut b, &src);
    scroll(&mut b, &src, 2500);

    // Rows 23..=30 are rendered after 2200px of top padding.
    assert_eq!(b.offset_of(1), 0);
    assert_eq!(b.offset_of(23), 2200);
    assert_eq!(b.offset_of(25), 2400);
    assert_eq!(b.index_at(0), Some(1));
    assert_eq!(b.index_at(150), Some(2));
    assert_eq!(b.index_at(2250), Some(23));
    assert_eq!(b.index_at(99_999), Some(30));
}

#[test]
fn resize_refills_the_larger_viewport() {
    let src = Source::new(30);
    let mut b = ScrollBuffer::new(options());
    drive(&mut b, &src);

    b.on_resize(1200);
    drive(&mut b, &src);
    assert!(b.rows_bottom() >= 1200 + b.options().look_ahead());
    assert_consistent(&b);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "shrink below zero")]
fn padding_shrink_below_zero_is_a_bug() {
    let mut p = crate::padding::PaddingTracker::default();
    p.grow(Edge::Top, 50);
    p.shrink(Edge::Top, 100);
}

#[test]
fn random_scrolls_and_updates_keep_invariants() {
    for seed in 0..8u64 {
        let mut rng = Lcg::new(seed);
        let mut src = Source::new(120);
        let start = rng.gen_range_i64(1, 121);
        let mut b = ScrollBuffer::new(options().with_start_index(start));
        drive(&mut b, &src);
        assert_consistent(&b);

        for _ in 0..200 {
            match rng.gen_range_u64(0, 4) {
                0 => {
                    let max = b.max_scroll_top();
                    let offset = rng.gen_range_u64(0, max + 1);
                    scroll(&mut b, &src, offset);
                }
                1 if !b.range().is_empty() => {
                    let index = rng.gen_range_i64(b.min_index(), b.max_index() + 1);
                    if index == b.min_index() {
                        src.remove_towards_head(index);
                    } else {
                        src.remove(index);
                    }
                    assert_eq!(b.apply_updates(Update::remove(index)), Ok(true));
                    drive(&mut b, &src);
                }
                2 if !b.range().is_empty() => {
                    let index = rng.gen_range_i64(b.min_index(), b.max_index() + 1);
                    let n = rng.gen_range_u64(1, 4);
                    let fresh: Vec<String> = (0..n).map(|k| format!("new{index}.{k}")).collect();
                    src.replace(index, fresh.clone());
                    b.apply_updates(Update::replace(index, fresh)).unwrap();
                    drive(&mut b, &src);
                }
                _ => {
                    let before = b.scroll_top();
                    let out = b.apply_updates(Update::remove(b.max_index() + 5));
                    assert_eq!(out, Ok(false));
                    assert_eq!(b.scroll_top(), before);
                }
            }
            assert_consistent(&b);
            if b.range().is_fully_known() {
                assert_eq!(b.range().len(), src.items.len() as u64);
                assert_eq!((b.min_index(), b.max_index()), (src.min, src.max()));
            }
            for row in b.rows().iter() {
                assert_eq!(
                    Some(&row.item),
                    src.get(row.index, 1).first(),
                    "row {} out of sync (seed {seed})",
                    row.index
                );
            }
        }
    }
}
