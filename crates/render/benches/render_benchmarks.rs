use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use hb_core::PriceCents;
use hb_pricing::{InstallmentCalculator, InstallmentCount};
use hb_render::{MemoryTree, PresentationTree, RenderPipeline};

fn bench_compute(c: &mut Criterion) {
    let calculator = InstallmentCalculator::default();
    let mut group = c.benchmark_group("compute");

    group.bench_function("all_twelve_quotes", |b| {
        b.iter(|| {
            calculator
                .quotes(black_box(PriceCents::new(25099)))
                .map(|q| q.per.get())
                .sum::<u64>()
        })
    });

    group.bench_function("single_quote_with_interest", |b| {
        let count = InstallmentCount::new(12).unwrap();
        b.iter(|| calculator.compute(black_box(PriceCents::new(25099)), count))
    });

    group.finish();
}

fn bench_render_table(c: &mut Criterion) {
    let pipeline = RenderPipeline::default();
    let mut group = c.benchmark_group("render_table");

    for rerenders in [1usize, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(rerenders),
            &rerenders,
            |b, &rerenders| {
                b.iter(|| {
                    let mut tree = MemoryTree::new();
                    let doc = tree.document_root();
                    let body = tree.append_element(doc, "tbody");
                    for i in 0..rerenders {
                        pipeline.render_table(&mut tree, body, PriceCents::new(10000 + i as u64));
                    }
                    black_box(tree)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_render_table);
criterion_main!(benches);
