//! Benchmark – `jsoninterp::Lexer::scan_line` over whole documents
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsoninterp::{FirstBrace, LexState, Lexer, LexerOptions, TokenizedDocument};

/// Produce a deterministic, pretty-printed document of `records` objects. Every
/// record carries plain values, an interpolated string and an interpolation
/// region spanning three lines, so all scanner contexts are exercised.
fn make_document(records: usize) -> String {
    let mut s = String::from("[\n");
    for i in 0..records {
        if i > 0 {
            s.push_str(",\n");
        }
        write!(
            s,
            concat!(
                "  {{\n",
                "    // record {i}\n",
                "    \"id\": {i},\n",
                "    \"name\": \"user-${{prefix}}-{i}\\u0021\",\n",
                "    \"score\": -{i}.25e2,\n",
                "    \"flags\": [true, false, null],\n",
                "    \"query\": ${{ select({{\n",
                "      from: 'users', where: {{ id: {i} }}\n",
                "    }}) }}\n",
                "  }}",
            ),
            i = i
        )
        .unwrap();
    }
    s.push_str("\n]\n");
    s
}

fn scan_all<E: jsoninterp::EmbeddedGrammar>(lexer: &Lexer<E>, text: &str) -> usize {
    let mut state = LexState::new();
    let mut tokens = 0;
    for line in text.lines() {
        let out = lexer.scan_line(&state, line);
        tokens += out.tokens.len();
        state = out.state;
    }
    tokens
}

fn bench_scan_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_lines");

    for &records in &[10usize, 1_000] {
        let text = make_document(records);
        group.throughput(Throughput::Bytes(text.len() as u64));

        let lexer = Lexer::new(LexerOptions::default());
        group.bench_with_input(
            BenchmarkId::new("brace_balanced", records),
            &text,
            |b, text| b.iter(|| black_box(scan_all(&lexer, black_box(text)))),
        );

        let lexer = Lexer::with_embedded(LexerOptions::default(), FirstBrace);
        group.bench_with_input(BenchmarkId::new("first_brace", records), &text, |b, text| {
            b.iter(|| black_box(scan_all(&lexer, black_box(text))));
        });
    }
    group.finish();
}

fn bench_document_edit(c: &mut Criterion) {
    let text = make_document(1_000);
    let mut doc = TokenizedDocument::new(Lexer::new(LexerOptions::default()), &text);
    let mut group = c.benchmark_group("document_edit");

    // Toggling a value leaves every state intact: one line is re-scanned.
    group.bench_function("local", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let line = if flip { "    \"id\": 1," } else { "    \"id\": 2," };
            black_box(doc.replace_line(black_box(3), line))
        });
    });

    // Opening and closing a block comment re-scans the rest of the document.
    group.bench_function("cascade", |b| {
        let mut open = false;
        b.iter(|| {
            open = !open;
            let line = if open { "    /* record 0" } else { "    // record 0" };
            black_box(doc.replace_line(black_box(2), line))
        });
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_scan_lines, bench_document_edit }
criterion_main!(benches);
