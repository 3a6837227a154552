/// Benchmark module for testing performance of log parsing and the
/// classification and cleaning stages.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use goldmine::analysis::{clean_log, parse_git_log_str, CleanRules, Classifier, ParseOptions};
use goldmine::utils::{lines_added_per_quarter, most_changed_files, GroupBy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PATHS: [&str; 8] = [
    "app/models/user.rb",
    "app/controllers/api/v1/statuses_controller.rb",
    "app/views/layouts/application.html.haml",
    "app/javascript/mastodon/features/compose/index.jsx",
    "app/javascript/styles/mastodon/components.scss",
    "app/serializers/rest/account_serializer.rb",
    "config/locales/en.yml",
    "spec/models/user_spec.rb",
];

const AUTHORS: [&str; 4] = ["Jane Doe", "John Smith", "dependabot[bot]", "Ann Lee"];

/// Build a synthetic export with `commits` commit blocks
///
/// # Returns
/// * `String` - Log text in the `BEGIN_COMMIT` export format
fn synthetic_log(commits: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut log = String::new();

    for i in 0..commits {
        let day = rng.gen_range(1..=28);
        let month = rng.gen_range(1..=12);
        let year = rng.gen_range(2017..=2023);
        log.push_str(&format!(
            "BEGIN_COMMIT\nHash|{i:040x}\nAuthor|{}\nDate|{day:02}-{month:02}-{year} 12:00:00\nMessage|Change {i}\n",
            AUTHORS[rng.gen_range(0..AUTHORS.len())],
        ));
        for _ in 0..rng.gen_range(1..6) {
            log.push_str(&format!(
                "{}\t{}\t{}\n",
                rng.gen_range(0..200),
                rng.gen_range(0..50),
                PATHS[rng.gen_range(0..PATHS.len())],
            ));
        }
    }

    log
}

/// Benchmark each pipeline stage on a 10k commit export
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let log = synthetic_log(10_000);
    let options = ParseOptions::default();
    let classifier = Classifier::default();
    let rules = CleanRules::default();

    group.bench_function("parse", |b| {
        b.iter(|| parse_git_log_str(black_box(&log), &options).unwrap())
    });

    let parsed = parse_git_log_str(&log, &options).unwrap();
    group.bench_function("classify", |b| {
        b.iter(|| classifier.classify(black_box(parsed.clone())))
    });

    let classified = classifier.classify(parsed);
    group.bench_function("clean", |b| {
        b.iter(|| clean_log(black_box(classified.clone()), &rules))
    });

    group.finish();
}

/// Benchmark the reductions feeding the charts
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let rows = clean_log(
        Classifier::default().classify(parse_git_log_str(&synthetic_log(10_000), &ParseOptions::default()).unwrap()),
        &CleanRules::default(),
    );

    group.bench_function("lines_added_per_quarter", |b| {
        b.iter(|| lines_added_per_quarter(black_box(&rows), GroupBy::Component))
    });
    group.bench_function("most_changed_files", |b| {
        b.iter(|| most_changed_files(black_box(&rows), 50))
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_pipeline, bench_aggregation
);
criterion_main!(benches);
