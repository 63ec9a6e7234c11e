/*
 * Rolling Spheres Benchmark
 *
 * Measures the per-frame cost of the simulation step on its own and of a
 * complete headless frame (step, draw list, reschedule).
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use rolling_spheres::config::BodyConfig;
use rolling_spheres::host::HeadlessHost;
use rolling_spheres::physics::step_bodies;
use rolling_spheres::{BodyRegistry, ResourceTracker, SceneConfig, SpheresController, ViewportBounds};

// A scene with n bodies, velocities varied so they hit the edges at different times
fn scene_with(n: usize) -> SceneConfig {
    let mut scene = SceneConfig::default();
    scene.bodies = (0..n)
        .map(|i| BodyConfig {
            texture: PathBuf::from(format!("body-{}.png", i)),
            velocity: [0.02 + (i % 7) as f32 * 0.01, -0.03 + (i % 5) as f32 * 0.015],
            fallback_color: [200, 200, 200],
        })
        .collect();
    scene
}

// Benchmark the stepper alone
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_bodies");

    for num_bodies in [3, 30, 300].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_bodies), num_bodies, |b, &n| {
            let scene = scene_with(n);
            let mut host = HeadlessHost::new(800.0, 600.0);
            let mut resources = ResourceTracker::new();
            let mut registry = BodyRegistry::new(&scene, &mut host, &mut resources);
            let bounds = ViewportBounds::new(8.28, 6.21);
            let spin = registry.spin();

            b.iter(|| {
                black_box(step_bodies(registry.bodies_mut(), &bounds, spin));
            });
        });
    }

    group.finish();
}

// Benchmark a full frame through the controller
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("headless_frame");

    for num_bodies in [3, 300].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_bodies), num_bodies, |b, &n| {
            let scene = scene_with(n);
            let mut host = HeadlessHost::new(800.0, 600.0);
            let mut controller = match SpheresController::mount(&scene, &mut host) {
                Some(controller) => controller,
                None => return,
            };

            b.iter(|| {
                if let Some(handle) = host.take_due_frame() {
                    black_box(controller.on_frame(&mut host, handle));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_frame);
criterion_main!(benches);
