//! Benchmarks for parsing parameter-named result trees.
//!
//! These benchmarks measure full-tree collection and early-terminating
//! walks over generated directory hierarchies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use experiment_manager::compiler::patterns::{BOOL_PATTERN, FLOAT_PATTERN, INT_PATTERN};
use experiment_manager::{default_path, LevelSpec, LevelValues, ResultManager, WalkConfig};
use std::fs;
use tempfile::TempDir;

/// Create `seeds x 4 x 2` leaf directories under a fresh temporary root.
fn create_tree(seeds: usize) -> anyhow::Result<TempDir> {
    let tmp = TempDir::new()?;
    for seed in 0..seeds {
        for lr in [0.1, 0.01, 0.001, 0.0001] {
            for adam in [true, false] {
                let path = default_path(
                    tmp.path(),
                    &[
                        LevelValues::params().with("seed", seed).with("lr", lr),
                        LevelValues::literal("results"),
                        LevelValues::params().with("adam", adam),
                    ],
                    true,
                );
                fs::create_dir_all(path)?;
            }
        }
    }
    Ok(tmp)
}

fn create_manager(tmp: &TempDir) -> anyhow::Result<ResultManager> {
    let manager = ResultManager::from_arguments(
        tmp.path(),
        &[
            LevelSpec::params([("seed", INT_PATTERN), ("lr", FLOAT_PATTERN)]),
            LevelSpec::literal("results"),
            LevelSpec::params([("adam", BOOL_PATTERN)]),
        ],
        true,
    )?;
    Ok(manager.with_walk_config(WalkConfig::deterministic()))
}

/// Benchmark collecting every leaf into a table.
fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");

    for seeds in [8, 32, 128] {
        let tmp = create_tree(seeds).expect("failed to create tree");
        let manager = create_manager(&tmp).expect("failed to create manager");

        group.bench_with_input(BenchmarkId::from_parameter(seeds), &manager, |b, manager| {
            b.iter(|| {
                let table = manager.collect().expect("collect failed");
                black_box(table.len())
            })
        });
    }

    group.finish();
}

/// Benchmark taking only the first match, which should not list the whole tree.
fn bench_first_match(c: &mut Criterion) {
    let tmp = create_tree(128).expect("failed to create tree");
    let manager = create_manager(&tmp).expect("failed to create manager");

    c.bench_function("first_match", |b| {
        b.iter(|| black_box(manager.walk().next()))
    });
}

criterion_group!(benches, bench_collect, bench_first_match);
criterion_main!(benches);
