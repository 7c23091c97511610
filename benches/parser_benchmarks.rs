#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic_in_result_fn)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zxml::test_utils::*;

const INPUTS: [(&str, &str); 3] = [
    ("small", include_str!("../tests/input/simple.xml")),
    ("medium", include_str!("../tests/input/file.xml")),
    ("large", include_str!("../tests/input/large.xml")),
];

// Benchmark tokenization alone
fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("XML Lexer");

    for (size, input) in &INPUTS {
        group.bench_with_input(BenchmarkId::new("tokenize", size), input, |b, input| {
            b.iter(|| tokenize(black_box(input)).unwrap());
        });
    }

    group.finish();
}

// Benchmark matching on pre-tokenized input, with and without the rule cache
fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("XML Parser");

    for (size, input) in &INPUTS {
        let tokens = tokenize(input).unwrap();
        group.bench_with_input(BenchmarkId::new("parse", size), &tokens, |b, tokens| {
            b.iter(|| parse(black_box(tokens)).unwrap());
        });
        group.bench_with_input(
            BenchmarkId::new("parse_uncached", size),
            &tokens,
            |b, tokens| {
                let config = ParserConfig::default().with_memoize(false);
                b.iter(|| parse_with_config(black_box(tokens), config.clone()).unwrap());
            },
        );
    }

    group.finish();
}

// Benchmark formatting of parsed documents
fn bench_formatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("XML Formatter");

    for (size, input) in &INPUTS {
        let document = parse_xml(input).unwrap();
        group.bench_with_input(BenchmarkId::new("format", size), &document, |b, document| {
            b.iter(|| format_xml(black_box(document)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_parser, bench_formatter);
criterion_main!(benches);
