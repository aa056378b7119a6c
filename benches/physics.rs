//! Benchmarks for grapnel rope and hook simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use grapnel::*;
use grapnel::segment::chain_segments;

fn bench_rope_relax(c: &mut Criterion) {
    c.bench_function("rope_50_points_60_relax_steps", |b| {
        b.iter(|| {
            let mut points: std::vec::Vec<_> = (0..50)
                .map(|i| ConstraintPoint::new(Vec2::new(i as f32 * 0.2, 10.0)))
                .collect();
            points[0].locked = true;
            let segments = chain_segments(&points);
            let solver = RopeSolver::new(9.81f32, 10);
            for _ in 0..60 {
                solver.relax(&mut points, &segments, 1.0 / 60.0, &mut NoOpStepObserver);
            }
            points
        });
    });
}

fn bench_swinging_line(c: &mut Criterion) {
    c.bench_function("hooked_line_swing_120_ticks", |b| {
        b.iter(|| {
            let hook = Vec2::new(5.0f32, 0.0);
            let mut line = LineSimulation::new(LineConfig::new(), hook, Vec2::right()).unwrap();
            line.start_extending(Vec2::new(0.0, 0.0), 0.0).unwrap();
            line.mark_contact();
            let mut anchor = Vec2::new(0.0, 0.0);
            for _ in 0..120 {
                anchor = line.advance(1.0 / 60.0, Anchor::free(anchor), &EmptyWorld, |_| None).frame.anchor;
            }
            anchor
        });
    });
}

fn bench_shot_cycle(c: &mut Criterion) {
    c.bench_function("unhooked_shot_fire_to_ready", |b| {
        b.iter(|| {
            let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
            hook.fire(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.5)).unwrap();
            let mut ticks = 0;
            while hook.state() != HookState::ReadyToFire {
                hook.tick(1.0 / 60.0, Anchor::locked(Vec2::new(0.0, 0.0)), &EmptyWorld);
                ticks += 1;
            }
            ticks
        });
    });
}

criterion_group!(benches, bench_rope_relax, bench_swinging_line, bench_shot_cycle);
criterion_main!(benches);
