//! Vertex stage benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec3};
use shade_core::color::linearize;
use shade_render_2d::{run_vertex_stage, vertex_stage, TransformState, Vertex};

fn grid(n: usize) -> Vec<Vertex> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            Vertex::new([i as f32 % 640.0, (i / 640) as f32, 0.0], [t, 1.0 - t, 0.5, 1.0])
        })
        .collect()
}

fn state() -> TransformState {
    TransformState::screen(640.0, 480.0).with_model(Mat4::from_translation(Vec3::new(8.0, 8.0, 0.0)))
}

fn linearize_rgb(c: &mut Criterion) {
    c.bench_function("linearize_rgb", |b| {
        b.iter(|| linearize(black_box(Vec3::new(0.02, 0.5, 0.9))))
    });
}

fn single_vertex(c: &mut Criterion) {
    let vertex = Vertex::new([320.0, 240.0, 0.0], [0.5, 0.5, 0.5, 1.0]);
    let state = state();
    c.bench_function("vertex_stage", |b| {
        b.iter(|| vertex_stage(black_box(&vertex), black_box(&state)))
    });
}

fn batch(c: &mut Criterion) {
    let vertices = grid(100_000);
    let state = state();
    c.bench_function("run_vertex_stage_100k", |b| {
        b.iter(|| run_vertex_stage(black_box(&vertices), black_box(&state)))
    });
}

criterion_group!(benches, linearize_rgb, single_vertex, batch);
criterion_main!(benches);
