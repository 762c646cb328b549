//! Tick throughput benchmarks.
//!
//! One tick is a handful of floating-point operations plus a buffer push,
//! so these mostly measure the per-tick bookkeeping around the integrator.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mechlab::engine::{EnergySample, RollingBuffer};
use mechlab::prelude::*;

fn bench_scenario_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.sample_size(100);
    group.confidence_level(0.95);

    group.bench_function("pendulum", |b| {
        let mut sim = PendulumSim::new(PendulumParams::default());
        sim.start();
        b.iter(|| black_box(sim.tick().sample));
    });

    group.bench_function("incline", |b| {
        // Flat slope never reaches the ground, so the run never halts.
        let mut sim = InclineSim::new(InclineParams {
            slope_angle: 0.0,
            ..Default::default()
        });
        sim.start();
        b.iter(|| black_box(sim.tick().sample));
    });

    group.bench_function("bounce", |b| {
        let mut sim = BounceSim::new(BounceParams {
            restitution: 1.0,
            ..Default::default()
        });
        sim.start();
        b.iter(|| black_box(sim.tick().sample));
    });

    group.finish();
}

fn bench_lab_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("lab_frame");

    for policy in [SchedulingPolicy::ActiveOnly, SchedulingPolicy::AllRunning] {
        group.bench_with_input(
            BenchmarkId::new("policy", format!("{policy:?}")),
            &policy,
            |b, &policy| {
                let config = LabConfig::builder()
                    .pendulum(PendulumParams::default())
                    .bounce(BounceParams {
                        restitution: 1.0,
                        ..Default::default()
                    })
                    .scheduling(policy)
                    .build();
                let mut lab = Lab::from_config(&config);
                lab.scenario_mut(ScenarioKind::Pendulum).start();
                lab.scenario_mut(ScenarioKind::Bounce).start();
                b.iter(|| black_box(lab.frame()));
            },
        );
    }

    group.finish();
}

fn bench_rolling_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_buffer");

    for capacity in [100_usize, 150, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("push_full", capacity),
            &capacity,
            |b, &capacity| {
                let mut buffer = RollingBuffer::new(capacity);
                for i in 0..capacity {
                    buffer.push(EnergySample::new(i as f64, 1.0, 1.0));
                }
                b.iter(|| black_box(buffer.push(EnergySample::new(0.0, 1.0, 1.0))));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scenario_tick,
    bench_lab_frame,
    bench_rolling_buffer
);
criterion_main!(benches);
