//! Benchmarks for chord symbol and scale name resolution.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tetrachord::chord::{decode_chord_symbol, encode_chord_symbol, ChordStyle};
use tetrachord::chordify::chordify_heptatonic_tertial;
use tetrachord::interval::parse_interval_names;
use tetrachord::resolve::{resolve_generic_scale_request, resolve_scale_pattern};
use tetrachord::scale::Scale;

const SYMBOLS: [&str; 5] = ["C", "Ebm7b5", "F#mmaj9(#11)/C#", "Bb13sus4", "bVIImaj7"];

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chord_symbol");

    for symbol in SYMBOLS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(symbol), symbol, |b, symbol| {
            b.iter(|| decode_chord_symbol(black_box(symbol)))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let style = ChordStyle::default();
    let names = parse_interval_names("1 3 5 b7 9 #11 13").unwrap();

    c.bench_function("encode_chord_symbol", |b| {
        b.iter(|| encode_chord_symbol(black_box(&names), &style))
    });

    c.bench_function("chordify_all_heptatonic", |b| {
        let keynote = "C".parse().unwrap();
        b.iter(|| {
            for scale in Scale::HEPTATONIC.iter() {
                black_box(chordify_heptatonic_tertial(keynote, scale.base(), 7, &style).unwrap());
            }
        })
    });
}

/// Each request falls through to a later stage of the lookup.
fn bench_scale_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_generic_scale_request");

    for text in ["hungarian phrygian", "Eb melodic minor", "Dorian b2", "G mixo_#4 add b6"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(text), text, |b, text| {
            b.iter(|| resolve_generic_scale_request(black_box(text)))
        });
    }
    group.finish();

    c.bench_function("resolve_scale_pattern", |b| {
        b.iter(|| resolve_scale_pattern(black_box(0b1011_0101_1011u16)))
    });
}

criterion_group!(benches, bench_decode, bench_encode, bench_scale_requests);
criterion_main!(benches);
