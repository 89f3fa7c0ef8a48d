use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::{fs::File, io::Write, num::NonZeroUsize};
use tempfile::tempdir;
use textscout::search::count_occurrences;
use textscout::{search, SearchConfig};

fn create_test_files(
    dir: &tempfile::TempDir,
    file_count: usize,
    lines_per_file: usize,
) -> std::io::Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(
                file,
                "Line {} Hello there, file {} says hello to line {} and HELLO again",
                j, i, j
            )?;
        }
    }
    Ok(())
}

fn bench_counter(c: &mut Criterion) {
    let content = "Hello there, hello again, HeLLo once more. ".repeat(10_000);

    let mut group = c.benchmark_group("Occurrence Counter");
    for needle in ["hello", "once more", "absent text"] {
        group.bench_function(needle, |b| {
            b.iter(|| black_box(count_occurrences(black_box(&content), needle)));
        });
    }
    group.finish();
}

fn bench_file_scaling(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let config = SearchConfig::new(dir.path(), "hello", ["txt"]);

    let mut group = c.benchmark_group("File Scaling");
    for count in [1, 10, 100, 1000] {
        create_test_files(&dir, count, 10).unwrap();

        group.bench_function(format!("files_{}", count), |b| {
            b.iter(|| black_box(search(&config).unwrap()));
        });
    }
    group.finish();
}

fn bench_thread_count(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_test_files(&dir, 200, 50).unwrap();

    let mut group = c.benchmark_group("Thread Count");
    for threads in [1, 2, 4, 8] {
        let config = SearchConfig::new(dir.path(), "hello", ["txt"])
            .with_thread_count(NonZeroUsize::new(threads).unwrap());

        group.bench_function(format!("threads_{}", threads), |b| {
            b.iter(|| black_box(search(&config).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_counter, bench_file_scaling, bench_thread_count);
criterion_main!(benches);
