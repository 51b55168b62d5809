//! Benchmarks for the normalization pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use voicenorm::pipeline::PipelineOptions;
use voicenorm::text::{normalize_numbers, Tokenizer, TokenizerConfig, VoiceTokenizer};
use voicenorm::{LexiconStore, TextFrontend};

const SAMPLES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "NASA paid $5.50 for 12,000 GIFs on the 21st of May 2005.",
    "Visit https://example.com/docs?page=2 for the FAQ :)",
    "Dr. Smith's CY23 report: 3.5 km at 10:30, up 12% vs. last year.",
];

fn frontend() -> TextFrontend {
    let lexicon = Arc::new(LexiconStore::bundled().unwrap());
    TextFrontend::with_lexicon(lexicon, PipelineOptions::rule_only())
}

fn bench_numbers(c: &mut Criterion) {
    c.bench_function("numeric_cascade", |b| {
        b.iter(|| normalize_numbers(black_box(SAMPLES[1])))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let frontend = frontend();

    c.bench_function("normalize_sentence", |b| {
        b.iter(|| frontend.normalize(black_box(SAMPLES[3])))
    });

    c.bench_function("normalize_batch", |b| {
        b.iter(|| frontend.normalize_batch(black_box(SAMPLES)))
    });
}

fn bench_tokenization(c: &mut Criterion) {
    let frontend = frontend();
    let tokenizer = VoiceTokenizer::new(TokenizerConfig::default()).unwrap();
    let normalized = frontend.normalize(SAMPLES[1]);

    c.bench_function("encode", |b| {
        b.iter(|| tokenizer.encode(black_box(&normalized)).unwrap())
    });
}

fn bench_lexicon(c: &mut Criterion) {
    c.bench_function("load_bundled_lexicon", |b| {
        b.iter(|| LexiconStore::bundled().unwrap())
    });
}

criterion_group!(
    benches,
    bench_numbers,
    bench_normalize,
    bench_tokenization,
    bench_lexicon
);
criterion_main!(benches);
