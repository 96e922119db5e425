use std::{hint::black_box, io::Write};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use word_count_usecase::{Dictionary, DictionaryOptions};

fn fixture(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(contents).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn benchmark_load_count_print(c: &mut Criterion) {
    let words: Vec<String> = (0..20_000).map(|i| format!("w{i:x}")).collect();
    let dict = fixture(words.join("\n").as_bytes());
    let text: String = words
        .iter()
        .cycle()
        .step_by(7)
        .take(200_000)
        .map(|w| format!("{w} filler "))
        .collect();
    let text = fixture(text.as_bytes());

    let mut group = c.benchmark_group("load_count_print");
    for (name, mapped) in [("buffered", false), ("mapped", true)] {
        let options = DictionaryOptions {
            mapped_dict: mapped,
            mapped_text: mapped,
            ..DictionaryOptions::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(name), &options, |b, options| {
            b.iter(|| {
                let mut dictionary = Dictionary::new(*options).unwrap();
                dictionary.load(dict.path()).unwrap();
                dictionary.count(Some(text.path())).unwrap();
                let mut out = Vec::new();
                dictionary.print(&mut out).unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_load_count_print);
criterion_main!(benches);
