//! Benchmarks for full-buffer tokenization.
//!
//! Run with: cargo bench -p sigma-lex

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sigma_lex::{Language, LexerConfig};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

const CONFIG: &str = r#"{
    "cpp": { "primary": ["int", "return", "for", "if", "struct"], "secondary": ["size_t"] },
    "javascript": { "primary": ["var", "function", "return"] },
    "css": { "primary": ["color", "margin"], "secondary": ["red", "auto"] },
    "html": { "primary": ["html", "body", "div", "script", "style"], "secondary": ["class"] }
}"#;

const CPP_SAMPLE: &str = r#"#include <stdio.h>
/** Sum the first n values. */
int sum(const int *v, size_t n) {
    int total = 0; // running
    for (size_t i = 0; i < n; i++) {
        total += v[i];
    }
    return total;
}
"#;

const HTML_SAMPLE: &str = r#"<html><body class="main">
<!-- header -->
<div>Hello &amp; welcome</div>
<style>div { color: red; margin: 0 auto }</style>
<script>function f(a) { return a * 2; }</script>
</body></html>
"#;

fn repeat(sample: &str, bytes: usize) -> String {
    sample.repeat(bytes / sample.len() + 1)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let config = LexerConfig::from_json(CONFIG).expect("bench config is valid");
    let mut group = c.benchmark_group("tokenize");

    for (language, sample) in [(Language::Cpp, CPP_SAMPLE), (Language::Html, HTML_SAMPLE)] {
        for size in [1_000, 10_000, 100_000] {
            let text = repeat(sample, size);
            let mut lexer = language.lexer(&config);
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(language.name(), size),
                &text,
                |b, text| {
                    b.iter(|| {
                        lexer.tokenize(0, black_box(text), Some("total")).unwrap();
                        black_box(lexer.tokens().len())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let config = LexerConfig::from_json(CONFIG).expect("bench config is valid");
    let text = repeat(CPP_SAMPLE, 100_000);
    let mut lexer = Language::Cpp.lexer(&config);
    lexer.tokenize(0, &text, None).unwrap();
    let open = text.find('{').unwrap_or(0);

    c.bench_function("queries/matching_bracket", |b| {
        b.iter(|| black_box(lexer.matching_bracket(&text, black_box(open))))
    });
    c.bench_function("queries/in_literal_or_comment", |b| {
        b.iter(|| black_box(lexer.in_literal_or_comment(black_box(text.len() / 2))))
    });
}

criterion_group!(benches, bench_tokenize, bench_queries);
criterion_main!(benches);
