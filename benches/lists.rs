use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nextstep_rs::lists::{RECENT_CAP, RecentList, sanitize_entries};
use nextstep_rs::storage::MemoryStore;
use std::sync::Arc;

fn raw_list(len: usize) -> String {
    let items: Vec<String> = (0..len)
        .map(|idx| {
            // Every third entry is a duplicate and every fifth is junk, so
            // the sanitizer has real work to do.
            if idx % 5 == 0 {
                r#"{"label": "  ", "href": "/x"}"#.to_string()
            } else {
                format!(
                    r#"{{"label": "Item {}", "href": "/item/{}", "ts": {}}}"#,
                    idx % 3,
                    idx % 3,
                    1_700_000_000_000u64 + idx as u64
                )
            }
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn bench_sanitize(c: &mut Criterion) {
    for len in [8usize, 64, 256] {
        let raw = raw_list(len);
        c.bench_with_input(BenchmarkId::new("sanitize_entries", len), &raw, |b, raw| {
            b.iter(|| {
                let clean = sanitize_entries(raw, RECENT_CAP, 1_700_000_000_000);
                black_box(clean.len());
            });
        });
    }
}

fn bench_push(c: &mut Criterion) {
    c.bench_function("recent_push_cycle", |b| {
        let list = RecentList::new(Arc::new(MemoryStore::new()));
        let mut idx = 0u64;
        b.iter(|| {
            idx += 1;
            let state = list.push(&format!("Item {}", idx % 12), "/item");
            black_box(state.len());
        });
    });
}

criterion_group!(benches, bench_sanitize, bench_push);
criterion_main!(benches);
