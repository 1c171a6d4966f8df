//! Criterion microbenches for the dataset parsers.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure in-memory parsing of:
//! - UA-SQuAD JSON, nested and flat (from_squad_json_str)
//! - news CSV (from_news_csv_str)
//! - CoNLL-U POS files (from_conllu_str)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use ua_datasets::formats::io_conllu::from_conllu_str;
use ua_datasets::formats::io_news_csv::from_news_csv_str;
use ua_datasets::formats::io_squad_json::{from_squad_json_str, SquadParseOptions};

const NESTED_SQUAD_FIXTURE: &str = r#"{"data": [{"title": "Київ", "paragraphs": [
  {"context": "Київ є столицею України. Місто стоїть на Дніпрі.", "qas": [
    {"id": "1", "question": "Що є столицею України?", "answers": [{"text": "Київ", "answer_start": 0}]},
    {"id": "2", "question": "На якій річці стоїть місто?", "answers": [{"text": "Дніпрі", "answer_start": 0}]},
    {"id": "3", "question": "Скільки мешканців?", "answers": [], "is_impossible": true}
  ]},
  {"context": "Львів розташований на заході країни.", "qas": [
    {"id": "4", "question": "Де розташований Львів?", "answers": [{"text": "на заході", "answer_start": 19}]}
  ]}
]}]}"#;

const NEWS_FIXTURE: &str = "title,text,tags,target
Перемога,Збірна виграла матч,футбол|збірна,спорт
Бюджет,\"Уряд ухвалив бюджет, нарешті\",,політика
Курс,Гривня зміцнилась,фінанси,економіка
Турнір,Фінал турніру,теніс,спорт
";

const POS_FIXTURE: &str = "# sent_id = 1
1\tЯ\tя\tPRON\t_\t_
2\tлюблю\tлюбити\tVERB\t_\t_
3\tКиїв\tКиїв\tPROPN\t_\t_
4\t.\t.\tPUNCT\t_\t_

# sent_id = 2
1-2\tДоньці\t_\t_\t_\t_
1\tДонь\tдонька\tNOUN\t_\t_
2\tці\tце\tPRON\t_\t_
";

/// Generate a flat QA document with `n` examples.
fn flat_squad_fixture(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"question": "Питання {i}?", "context": "Контекст номер {i} з відповіддю всередині.", "answer": "відповіддю"}}"#
            )
        })
        .collect();
    format!(r#"{{"data": [{}]}}"#, rows.join(","))
}

fn bench_squad_parse(c: &mut Criterion) {
    let opts = SquadParseOptions {
        split: Some("train".to_string()),
        ..SquadParseOptions::default()
    };
    let flat = flat_squad_fixture(200);

    let mut group = c.benchmark_group("squad_parse");

    group.throughput(Throughput::Bytes(NESTED_SQUAD_FIXTURE.len() as u64));
    group.bench_function("nested", |b| {
        b.iter(|| {
            let examples = from_squad_json_str(black_box(NESTED_SQUAD_FIXTURE), &opts).unwrap();
            black_box(examples)
        })
    });

    group.throughput(Throughput::Bytes(flat.len() as u64));
    group.bench_function("flat_200", |b| {
        b.iter(|| {
            let examples = from_squad_json_str(black_box(&flat), &opts).unwrap();
            black_box(examples)
        })
    });

    group.finish();
}

fn bench_news_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("news_csv_parse");
    group.throughput(Throughput::Bytes(NEWS_FIXTURE.len() as u64));

    group.bench_function("from_news_csv_str", |b| {
        b.iter(|| {
            let table = from_news_csv_str(black_box(NEWS_FIXTURE)).unwrap();
            black_box(table)
        })
    });

    group.finish();
}

fn bench_conllu_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("conllu_parse");
    group.throughput(Throughput::Bytes(POS_FIXTURE.len() as u64));

    group.bench_function("from_conllu_str", |b| {
        b.iter(|| black_box(from_conllu_str(black_box(POS_FIXTURE))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_squad_parse,
    bench_news_parse,
    bench_conllu_parse,
);
criterion_main!(benches);
