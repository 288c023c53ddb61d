use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markdown_highlight_engine::{
    Delimiter, HighlightPlugin, HtmlRenderer, Processor, highlight, parse_markdown, split,
};
mod common;

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let delimiter = Delimiter::default();

    for matches in [0, 1, 10, 100] {
        let line = common::generate_line(matches);
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::new("line", matches), &line, |b, line| {
            b.iter(|| split(std::hint::black_box(line), None, &delimiter));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.throughput(Throughput::Bytes(content.len() as u64));

    group.bench_function("parse_only", |b| {
        b.iter(|| parse_markdown(std::hint::black_box(&content)));
    });

    group.bench_function("highlight_pass", |b| {
        let tree = parse_markdown(&content);
        let plugin = highlight();
        b.iter(|| {
            let mut tree = tree.clone();
            plugin(&mut tree);
            std::hint::black_box(tree);
        });
    });

    let processor = Processor::new().use_stage(HighlightPlugin::NAME, highlight());
    let renderer = HtmlRenderer::with_highlight();
    group.bench_function("process_to_html", |b| {
        b.iter(|| processor.process(std::hint::black_box(&content), &renderer));
    });

    group.finish();
}

criterion_group!(benches, bench_split, bench_pipeline);
criterion_main!(benches);
