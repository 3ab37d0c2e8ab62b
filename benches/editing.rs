//! Benchmarks for line store edits.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linewise::{LineStore, Position};

fn bench_typing(c: &mut Criterion) {
    c.bench_function("insert_char_typing", |b| {
        b.iter(|| {
            let mut store = LineStore::new();
            let mut cursor = Position::ORIGIN;
            for c in "the quick brown fox\njumps over the lazy dog\n".chars().cycle().take(2_000) {
                cursor = store.insert_char(cursor, black_box(c));
            }
            store
        })
    });
}

fn bench_delete_merge(c: &mut Criterion) {
    let text = (0..500).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    c.bench_function("delete_chars_merge", |b| {
        b.iter(|| {
            let mut store = LineStore::from_text(&text);
            store.delete_chars(Position::new(2, 10), black_box(1_000));
            store
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let text = (0..2_000).map(|i| format!("row {i} of the party")).collect::<Vec<_>>().join("\n");
    let store = LineStore::from_text(&text);
    c.bench_function("search_last_line", |b| {
        b.iter(|| store.search(Position::ORIGIN, black_box("row 1999")))
    });
}

criterion_group!(benches, bench_typing, bench_delete_merge, bench_search);
criterion_main!(benches);
