#![allow(missing_docs)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wolf_tracker_core::{LogRef, Project, Task};

fn build_project(category_count: usize, tasks_per_category: u32) -> Project {
    let mut project = Project::new("bench").unwrap_or_else(|err| panic!("{err}"));
    for category in 0..category_count {
        project
            .add_category(&format!("category-{category:04}"))
            .unwrap_or_else(|err| panic!("{err}"));
        for minutes in 1..=tasks_per_category {
            let task = Task::new(format!("task-{minutes}"), minutes, "bench details")
                .unwrap_or_else(|err| panic!("{err}"));
            project.add_task(task).unwrap_or_else(|err| panic!("{err}"));
        }
    }
    project
}

fn add_category_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_category_insert");
    for &count in &[8usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(build_project(count, 0)));
        });
    }
    group.finish();
}

fn remove_category_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_category_cascade");
    for &tasks in &[4u32, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &tasks, |b, &tasks| {
            b.iter_batched(
                || {
                    let project = build_project(16, tasks);
                    let target = project.resolve_log("category-0008");
                    (project, target)
                },
                |(mut project, target)| {
                    black_box(project.remove_category(target).unwrap_or_default());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn stats_benchmark(c: &mut Criterion) {
    let project = build_project(32, 64);
    c.bench_function("stats_table", |b| {
        b.iter(|| black_box(project.stats_table()));
    });
    c.bench_function("aggregate_rows", |b| {
        b.iter(|| black_box(project.tasks_as_rows(LogRef::AllTasks).map(|rows| rows.len())));
    });
}

criterion_group!(
    benches,
    add_category_benchmark,
    remove_category_benchmark,
    stats_benchmark
);
criterion_main!(benches);
