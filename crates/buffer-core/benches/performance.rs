use buffer_core::{Document, Position, Viewport, ViewportConfig};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06}\tthe quick brown fox jumps over the lazy dog {{ buffer-core }}\n"
        ));
    }
    out.pop();
    out
}

fn bench_document_load(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("document_load/50k_lines", |b| {
        b.iter(|| {
            let document = Document::from_text(black_box(&text));
            black_box(document.line_count());
        })
    });
}

fn bench_typing_then_undo(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("typing_middle/100_inserts_then_undo", |b| {
        b.iter_batched(
            || Document::from_text(&text),
            |mut document| {
                let mut pos = Position::new(10, 25_000);
                for _ in 0..100 {
                    pos = document.insert_text(pos, "x").unwrap();
                }
                document.undo(100).unwrap();
                black_box(document.revision());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_selection_boxes(c: &mut Criterion) {
    let text = large_text(50_000);
    let document = Document::from_text(&text);
    let mut view = Viewport::new(ViewportConfig::with_size(60, 120));
    view.set_cursor(&document, Position::new(5, 1_000));
    view.start_highlight();
    view.set_cursor(&document, Position::new(20, 30_000));
    view.extend_highlight();

    c.bench_function("viewport/selection_boxes_long_selection", |b| {
        b.iter(|| black_box(view.compute_highlight_boxes(&document).len()))
    });
}

criterion_group!(
    benches,
    bench_document_load,
    bench_typing_then_undo,
    bench_selection_boxes
);
criterion_main!(benches);
