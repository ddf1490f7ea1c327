//! Performance benchmarks for pattern compilation and extraction.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench extraction
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kinterm::{Extractor, KinshipPattern, TermTable};

const SHORT_TEXT: &str = "are you close with your mom and dad?";

const COMMENT_TEXT: &str = "I never really got along well with my siblings growing up, \
but my brother and I are close now. His wife gets along with my s/o, and their kids \
adore my parents. A mom at school once asked if we were twins, which made my sister \
laugh for a week. Most wives I know would have laughed too.";

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_builtin", |b| {
        b.iter(|| KinshipPattern::compile(black_box(TermTable::builtin())))
    });
}

fn bench_extract_short(c: &mut Criterion) {
    let extractor = Extractor::new().unwrap();
    c.bench_function("extract_short", |b| {
        b.iter(|| extractor.extract(black_box(SHORT_TEXT)))
    });
}

fn bench_extract_comment(c: &mut Criterion) {
    let extractor = Extractor::new().unwrap();
    c.bench_function("extract_comment", |b| {
        b.iter(|| extractor.extract(black_box(COMMENT_TEXT)))
    });
}

fn bench_extract_no_hits(c: &mut Criterion) {
    let extractor = Extractor::new().unwrap();
    let text = "the volcano was gonna explode but everyone stayed remarkably calm about it";
    c.bench_function("extract_no_hits", |b| {
        b.iter(|| extractor.extract(black_box(text)))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_extract_short,
    bench_extract_comment,
    bench_extract_no_hits
);
criterion_main!(benches);
