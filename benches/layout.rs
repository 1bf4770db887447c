use std::num::NonZeroUsize;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stack_tables::{
    ColorMode, ExpressionParser, RendererSettings, Section, StackLayout, TableRenderer, layout,
    parse_labels, parse_sizes,
};

const PAYLOAD: &str = "[0x90*64, 0x41*512, 'B'*8, 0xde, 0xad, 0xbe, 0xef, 0x12, 0x34, 0x56, 0x78]";
const LABELS: &str = r#"["nop sled", "buffer", "saved rbp", "canary", "ret addr"]"#;
const SIZES: &str = "[64, 512, 8, 4, 4]";

fn parse_payload(c: &mut Criterion) {
    let parser = ExpressionParser::default();
    c.bench_function("parse_payload", |b| {
        b.iter(|| parser.parse(black_box(PAYLOAD)).expect("payload"));
    });
}

fn layout_payload(c: &mut Criterion) {
    let bytes = ExpressionParser::default().parse(PAYLOAD).expect("payload");
    let labels = parse_labels(LABELS).expect("labels");
    let sizes = parse_sizes(SIZES).expect("sizes");
    let sections = stack_tables::sections_from_lists(&labels, &sizes);
    let width = NonZeroUsize::new(8).expect("width");

    c.bench_function("layout_payload", |b| {
        b.iter(|| layout(black_box(&bytes), black_box(&sections), width));
    });
}

fn render_payload(c: &mut Criterion) {
    let bytes = ExpressionParser::default().parse(PAYLOAD).expect("payload");
    let sections: Vec<Section> = (0..32).map(|i| Section::new(format!("slot {i}"), 20)).collect();
    let stack = StackLayout::build(&bytes, &sections, NonZeroUsize::new(8).expect("width"));

    for (name, color) in [("render_plain", ColorMode::Never), ("render_styled", ColorMode::Always)] {
        let renderer = TableRenderer::new(RendererSettings::default().with_color(color));
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut sink = Vec::with_capacity(16 * 1024);
                renderer
                    .render(&mut sink, black_box(&stack.rows))
                    .expect("render");
                sink
            });
        });
    }
}

criterion_group!(benches, parse_payload, layout_payload, render_payload);
criterion_main!(benches);
