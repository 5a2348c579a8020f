use criterion::{criterion_group, criterion_main, Criterion, black_box};
use minimax_chess::board::cozy::Position;
use minimax_chess::search::Searcher;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_startpos");
    group.sample_size(10);
    for depth in [2u32, 3, 4] {
        group.bench_function(format!("depth_{depth}"), |ben| {
            ben.iter(|| {
                let mut pos = Position::startpos();
                let mut s = Searcher::new();
                let r = s.search_depth(&mut pos, black_box(depth)).unwrap();
                black_box(r.stats.nodes)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
