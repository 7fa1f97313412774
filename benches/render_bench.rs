use chatmark::markdown::{RenderOptions, Renderer};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn chat_message(paragraphs: usize) -> String {
    let block = "## Summary\n\
                 Here is **what changed** and *why*, see [the docs](https://e.com/docs).\n\
                 - first point with `inline code`\n\
                 - second point\n\
                 1. step one\n\
                 2. step two\n\
                 > quoted line\n\n\
                 ```rust\nfn main() {\n    println!(\"<hi> & bye\");\n}\n```\n\n";
    block.repeat(paragraphs)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let renderer = Renderer::default();

    for size in [1usize, 10, 100] {
        let input = chat_message(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| black_box(renderer.render(black_box(input))));
        });
    }

    group.finish();
}

fn bench_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_adversarial");
    let renderer = Renderer::new(RenderOptions {
        ordered_list_container: true,
        merge_blockquotes: true,
    });

    let stars = "*".repeat(50_000) + "x";
    let fences = "```\n".repeat(10_001);
    let brackets = "[".repeat(20_000) + "](" + &")".repeat(20_000);

    for (name, input) in [("stars", stars), ("fences", fences), ("brackets", brackets)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| black_box(renderer.render(black_box(input))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_adversarial);
criterion_main!(benches);
