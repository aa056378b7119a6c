use grapnel::{Anchor, EmptyWorld, GrappleHook, HookConfig, HookState, Vec2};

#[test]
fn shot_cycle_deterministic() {
    let results: Vec<_> = (0..5).map(|_| {
        let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
        hook.fire(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0)).unwrap();
        let mut hooks = Vec::new();
        let mut polylines = Vec::new();
        while hook.state() != HookState::ReadyToFire {
            let frame = hook.tick(1.0 / 60.0, Anchor::locked(Vec2::new(0.0, 0.0)), &EmptyWorld).unwrap();
            hooks.push(frame.hook);
            if let Some(machine) = hook.line() {
                polylines.push(machine.line().polyline());
            }
        }
        (hooks, polylines)
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0].0.len(), r.0.len());
        for (a, b) in results[0].0.iter().zip(r.0.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
        assert_eq!(results[0].1, r.1);
    }
}
