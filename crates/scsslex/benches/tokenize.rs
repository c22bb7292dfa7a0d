//! Benchmark: block location and tokenization of a synthetic stylesheet
#![allow(missing_docs)]

use std::{fmt::Write, sync::Arc};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scsslex::{BlockLocator, PatternRegistry, Scanner};

const PATTERNS: &[(&str, &str)] = &[
    (":", ":"),
    (",", ","),
    ("WS", r"[ \r\t\n]+"),
    ("LPAR", r"\(|\["),
    ("RPAR", r"\)|\]"),
    ("MUL", "[*]"),
    ("ADD", "[+]"),
    ("STR", "'[^']*'"),
    ("UNITS", r"(?<!\s)(?:[a-zA-Z]+|%)(?![-\w])"),
    ("NUM", r"(?:\d+(?:\.\d*)?|\.\d+)"),
    ("COLOR", "#(?:[a-fA-F0-9]{6}|[a-fA-F0-9]{3})"),
    ("VAR", r"\$[-a-zA-Z0-9_]+"),
    ("KWID", r"[-a-zA-Z_][-a-zA-Z0-9_]*(?=\s*:)"),
    ("ID", "[-a-zA-Z_][-a-zA-Z0-9_]*"),
];

/// Produce a *deterministic* stylesheet of `rules` rules, each with a nested
/// rule and a handful of declarations, preceded by line-number hints.
fn make_stylesheet(rules: usize) -> String {
    let mut s = String::new();
    for i in 0..rules {
        writeln!(s, "\u{0}{} $w{i}: {i}px * 2;", i * 6 + 1).unwrap();
        writeln!(s, ".r{i}, .r{i}:hover {{").unwrap();
        writeln!(s, "  margin: $w{i} + 1px ({i} * 3);").unwrap();
        writeln!(s, "  font: 'Open Sans', sans-serif;").unwrap();
        writeln!(s, "  a {{ color: #a0b{}; }}", i % 10).unwrap();
        writeln!(s, "}}").unwrap();
    }
    s
}

/// Locate every block, recursing into bodies. Returns the number of blocks
/// so that Criterion can black-box the result.
fn locate_all(source: &str) -> usize {
    let mut count = 0;
    for block in BlockLocator::new(source).blocks() {
        count += 1;
        if let Some(body) = block.body {
            count += locate_all(body);
        }
    }
    count
}

/// Collect every declaration, recursing into bodies.
fn declarations(source: &str, out: &mut Vec<String>) {
    for block in BlockLocator::new(source).blocks() {
        match block.body {
            Some(body) => declarations(body, out),
            None => out.push(block.selector.into_owned()),
        }
    }
}

/// Tokenize every declaration until the first error. Returns the number of
/// tokens produced.
fn tokenize_all(registry: &Arc<PatternRegistry>, decls: &[String]) -> usize {
    let mut count = 0;
    for decl in decls {
        let mut scanner = Scanner::new(Arc::clone(registry), ["WS"], decl.as_str());
        let mut index = 0;
        while scanner.tokenize(index, None).is_ok() {
            index += 1;
        }
        count += index;
    }
    count
}

fn bench_locator(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_locator");
    for &rules in &[10usize, 100, 1_000] {
        let source = make_stylesheet(rules);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rules), &source, |b, source| {
            b.iter(|| black_box(locate_all(black_box(source))));
        });
    }
    group.finish();
}

fn bench_scanner(c: &mut Criterion) {
    let registry: Arc<PatternRegistry> = Arc::new(PATTERNS.iter().copied().collect());
    registry.compile_all().unwrap();

    let mut group = c.benchmark_group("pattern_scanner");
    for &rules in &[10usize, 100, 1_000] {
        let mut decls = Vec::new();
        declarations(&make_stylesheet(rules), &mut decls);
        group.throughput(Throughput::Elements(decls.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rules), &decls, |b, decls| {
            b.iter(|| black_box(tokenize_all(&registry, black_box(decls))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_locator, bench_scanner);
criterion_main!(benches);
