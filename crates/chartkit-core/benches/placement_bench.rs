use chartkit_core::placement::{place_labels, Band, LabelCost, PlacementParams};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_anchors(n: usize, height: f32) -> Vec<f32> {
    // clustered anchors so the DP has real work to do
    (0..n).map(|i| (i as f32 * 7.3).sin().abs() * height * 0.6 + height * 0.2).collect()
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_labels");
    let bands = [Band::new(140.0, 170.0)];
    for &n in &[5usize, 20, 50] {
        for cost in [LabelCost::Linear, LabelCost::Squared] {
            let anchors = gen_anchors(n, 1200.0);
            let mut params = PlacementParams::new((0.0, 1200.0));
            params.cost = cost;
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{cost:?}")), &anchors, |b, a| {
                b.iter(|| black_box(place_labels(a, &bands, &params)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_place);
criterion_main!(benches);
