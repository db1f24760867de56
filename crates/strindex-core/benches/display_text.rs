//! Benchmarks for the status text computation
//!
//! The text is recomputed on every caret move, so both parsing a document
//! and answering a query on an already parsed tree are measured.

use criterion::{Criterion, criterion_group, criterion_main};
use rowan::TextSize;
use std::hint::black_box;
use strindex_core::{EditorContext, JavaSourceTree, compute_display_text};

const SOURCE: &str = r#"
class Messages {
    static final String PREFIX = "[app] ";
    static final String SEPARATOR = ":\n";

    String greeting(String user) {
        String header = PREFIX + "greeting" + SEPARATOR;
        String body = header.concat("Hello, ") + String.valueOf(42) + " times\t";
        return body + "dear " + user + " and wel|come";
    }

    String banner() {
        return """
            +----------+
            |  banner  |
            +----------+
            """;
    }
}
"#;

fn caret_at(marker: &str) -> TextSize {
    let offset = SOURCE.find(marker).unwrap_or_default();
    TextSize::from(offset as u32)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_document", |b| {
        b.iter(|| JavaSourceTree::parse(black_box(SOURCE)));
    });
}

fn bench_concatenation_query(c: &mut Criterion) {
    let tree = JavaSourceTree::parse(SOURCE);
    let context = EditorContext::new(&tree);
    let caret = caret_at("|come");

    c.bench_function("display_text_concatenation", |b| {
        b.iter(|| compute_display_text(black_box(caret), black_box(&context)));
    });
}

fn bench_text_block_query(c: &mut Criterion) {
    let tree = JavaSourceTree::parse(SOURCE);
    let context = EditorContext::new(&tree);
    let caret = caret_at("banner  |");

    c.bench_function("display_text_text_block", |b| {
        b.iter(|| compute_display_text(black_box(caret), black_box(&context)));
    });
}

fn bench_miss(c: &mut Criterion) {
    let tree = JavaSourceTree::parse(SOURCE);
    let context = EditorContext::new(&tree);
    let caret = caret_at("greeting(");

    c.bench_function("display_text_outside_literal", |b| {
        b.iter(|| compute_display_text(black_box(caret), black_box(&context)));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_concatenation_query,
    bench_text_block_query,
    bench_miss
);
criterion_main!(benches);
