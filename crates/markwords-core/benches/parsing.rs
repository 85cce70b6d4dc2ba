use criterion::{black_box, criterion_group, criterion_main, Criterion};

use markwords_core::tokenizer::tokenize;
use markwords_core::word::Word;

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let sentence = "This is a *nice*, *flexible* content type.";

    let markup = r#"<p>The <strong>*quick*</strong> brown fox,</p>
<p>jumps over the <em>*lazy*</em> dog.<br>“*Really*?” she asked.</p>"#;

    let large = {
        let mut s = String::new();
        for i in 0..200 {
            s.push_str(&format!("<p>Sentence {i} has a *marked* word and (plain) words.</p>"));
        }
        s
    };

    group.bench_function("sentence", |b| b.iter(|| tokenize(black_box(sentence))));

    group.bench_function("markup", |b| b.iter(|| tokenize(black_box(markup))));

    group.bench_function("large", |b| b.iter(|| tokenize(black_box(&large))));

    group.finish();
}

fn bench_word_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_parse");

    group.bench_function("answer", |b| b.iter(|| Word::parse(black_box("*nice*,"))));

    group.bench_function("escaped", |b| b.iter(|| Word::parse(black_box("a**b**c"))));

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_word_parse);
criterion_main!(benches);
