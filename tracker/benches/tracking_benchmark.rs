//! Benchmarks for the greedy tracker update loop

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use greedytrack::{Bbox, Detection, GreedyTracker, TrackerConfig};
use std::hint::black_box;

fn create_test_detections(n_detections: usize, n_frames: usize) -> Vec<Vec<Detection>> {
    (0..n_frames)
        .map(|frame| {
            (0..n_detections)
                .map(|i| {
                    let x = (frame * 10 + i * 80) as f32;
                    let y = (frame * 5 + i * 40) as f32;
                    Detection::new(Bbox::new(x, y, 50.0, 100.0), 0.8)
                })
                .collect()
        })
        .collect()
}

fn bench_greedy_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_update");

    for n_detections in [5usize, 20, 50] {
        let frames = create_test_detections(n_detections, 10);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_detections),
            &frames,
            |b, frames| {
                b.iter_batched(
                    || GreedyTracker::new(TrackerConfig::default()),
                    |mut tracker| {
                        for detections in frames {
                            let _tracks = tracker.update(black_box(detections)).unwrap();
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_occlusion_heavy(c: &mut Criterion) {
    // Alternate detection frames with empty frames so the coasting and
    // eviction paths are exercised, not just matching.
    let frames = create_test_detections(20, 10);

    c.bench_function("greedy_update_with_gaps", |b| {
        b.iter_batched(
            || GreedyTracker::new(TrackerConfig::default()),
            |mut tracker| {
                for detections in &frames {
                    let _ = tracker.update(black_box(detections)).unwrap();
                    let _ = tracker.update(black_box(&[])).unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_greedy_update, bench_occlusion_heavy);
criterion_main!(benches);
