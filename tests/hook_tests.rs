use grapnel::{
    Anchor, ContactProbe, EmptyWorld, GrappleError, GrappleHook, HookConfig, HookState, LineConfig, LineFeedback,
    LineId, LineState, Vec2,
};

const DT: f32 = 1.0 / 60.0;

struct Wall {
    x: f32,
}

impl ContactProbe<f32> for Wall {
    fn cast(&self, origin: Vec2<f32>, direction: Vec2<f32>, max_distance: f32, _layer_mask: u32) -> Option<f32> {
        (origin.x + direction.x * max_distance >= self.x).then_some(0.0)
    }
}

#[derive(Default)]
struct Effects {
    impacts: usize,
    hidden: usize,
}

impl LineFeedback<f32> for Effects {
    fn play_impact(&mut self, _at: Vec2<f32>) {
        self.impacts += 1;
    }
    fn hide_break_effect(&mut self) {
        self.hidden += 1;
    }
}

fn origin() -> Vec2<f32> {
    Vec2::new(0.0, 0.0)
}

fn anchor() -> Anchor<f32> {
    Anchor::locked(origin())
}

fn hooked(hook: &mut GrappleHook<f32, impl LineFeedback<f32>>, wall: &Wall) {
    hook.fire(origin(), Vec2::new(1.0, 0.0)).unwrap().unwrap();
    for _ in 0..100 {
        hook.tick(DT, anchor(), wall);
        if hook.state() != HookState::Firing {
            break;
        }
    }
    assert_eq!(hook.state(), HookState::ShotComplete);
}

#[test]
fn invalid_configuration_fails_fast() {
    let few_points = HookConfig::<f32>::new().with_line(LineConfig::new().with_number_of_points(1));
    assert_eq!(
        GrappleHook::new(few_points).err(),
        Some(GrappleError::InsufficientPoints { count: 1 })
    );

    let instant = HookConfig::<f32>::new().with_time_to_full_length(0.0);
    assert_eq!(GrappleHook::new(instant).err(), Some(GrappleError::InvalidTimeToFullLength));

    let backwards = HookConfig::<f32>::new().with_line(LineConfig::new().with_retracting_speed(-1.0));
    assert!(matches!(
        GrappleHook::new(backwards).err(),
        Some(GrappleError::NegativeSpeed { field: "retracting_speed" })
    ));
}

#[test]
fn extend_speed_covers_line_length_in_time() {
    let config = HookConfig::<f32>::new().with_line_length(6.0).with_time_to_full_length(0.5);
    assert!((config.extend_speed() - 12.0).abs() < 1e-6);
}

#[test]
fn fire_only_when_ready() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    assert_eq!(hook.state(), HookState::ReadyToFire);
    assert!(hook.tick(DT, anchor(), &EmptyWorld).is_none());

    let first = hook.fire(origin(), Vec2::new(3.0, 4.0)).unwrap();
    assert_eq!(first, Some(LineId(0)));
    assert_eq!(hook.state(), HookState::Firing);
    let facing = hook.line().unwrap().line().facing();
    assert!((facing.x - 0.6).abs() < 1e-6 && (facing.y - 0.8).abs() < 1e-6);

    assert_eq!(hook.fire(origin(), Vec2::new(1.0, 0.0)).unwrap(), None);
    assert_eq!(hook.state(), HookState::Firing);
    assert_eq!(hook.line_id(), Some(LineId(0)));
}

#[test]
fn bad_aim_is_an_error_and_changes_nothing() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    assert_eq!(hook.fire(origin(), origin()), Err(GrappleError::DegenerateAim));
    assert_eq!(
        hook.fire(Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 0.0)),
        Err(GrappleError::NonFiniteAnchor)
    );
    assert_eq!(hook.state(), HookState::ReadyToFire);
    assert!(hook.line().is_none());
}

#[test]
fn unhooked_shot_returns_to_ready() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    hook.fire(origin(), Vec2::new(1.0, 0.0)).unwrap();

    let mut states = vec![hook.state()];
    let mut ticks = 0;
    while hook.state() != HookState::ReadyToFire {
        hook.tick(DT, anchor(), &EmptyWorld);
        if states.last() != Some(&hook.state()) {
            states.push(hook.state());
        }
        ticks += 1;
        assert!(ticks < 1000, "an unhooked line must finish retracting");
    }

    assert_eq!(
        states,
        vec![HookState::Firing, HookState::GettingReadyToFire, HookState::ReadyToFire]
    );
    assert!(hook.line().is_none());
    assert!(ticks >= 30, "the shot should extend for the full duration first, took {}", ticks);
    assert_eq!(hook.fire(origin(), Vec2::new(1.0, 0.0)).unwrap(), Some(LineId(1)));
}

#[test]
fn reel_only_after_hooking() {
    let mut hook = GrappleHook::with_feedback(HookConfig::<f32>::new(), Effects::default()).unwrap();
    assert_eq!(hook.reel(), None);

    hook.fire(origin(), Vec2::new(1.0, 0.0)).unwrap();
    assert_eq!(hook.reel(), None);

    let wall = Wall { x: 2.0 };
    for _ in 0..100 {
        hook.tick(DT, anchor(), &wall);
        if hook.state() == HookState::ShotComplete {
            break;
        }
    }
    assert_eq!(hook.state(), HookState::ShotComplete);
    assert_eq!(hook.feedback().impacts, 1);

    assert_eq!(hook.reel(), Some(LineId(0)));
    let frame = hook.tick(DT, anchor(), &wall).unwrap();
    assert!(frame.anchor.x > 0.1, "reeling should pull the anchor toward the hook, got {}", frame.anchor.x);
}

#[test]
fn hooked_line_outlives_the_extend_timer() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    let wall = Wall { x: 2.0 };
    hooked(&mut hook, &wall);

    for _ in 0..120 {
        hook.tick(DT, anchor(), &wall);
    }
    assert_eq!(hook.state(), HookState::ShotComplete);
    assert_eq!(hook.line().unwrap().state(), LineState::Hooked);
}

#[test]
fn position_correction_clamps_climbing() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    hook.set_position_correction(|proposed: Vec2<f32>| Some(Vec2::new(proposed.x.min(0.1), proposed.y)));
    let wall = Wall { x: 2.0 };
    hooked(&mut hook, &wall);

    hook.reel();
    let frame = hook.tick(DT, anchor(), &wall).unwrap();
    assert!((frame.anchor.x - 0.1).abs() < 1e-6, "climb should be clamped, got {}", frame.anchor.x);

    hook.clear_position_correction();
    hook.reel();
    let frame = hook.tick(DT, anchor(), &wall).unwrap();
    assert!(frame.anchor.x > 0.1);
}

#[test]
fn retract_wins_over_reel_in_the_same_tick() {
    let mut hook = GrappleHook::with_feedback(HookConfig::<f32>::new(), Effects::default()).unwrap();
    let wall = Wall { x: 2.0 };
    hooked(&mut hook, &wall);

    assert_eq!(hook.reel(), Some(LineId(0)));
    assert_eq!(hook.retract_or_cancel(), Some(LineId(0)));

    assert_eq!(hook.state(), HookState::GettingReadyToFire);
    let machine = hook.line().unwrap();
    assert_eq!(machine.state(), LineState::Retracting);
    assert!(!machine.line().is_climb_pending());
    assert_eq!(hook.feedback().hidden, 1);
    assert_eq!(hook.reel(), None);
    assert_eq!(hook.retract_or_cancel(), None);
}

#[test]
fn cancelling_a_shot_in_flight() {
    let mut hook = GrappleHook::new(HookConfig::<f32>::new()).unwrap();
    assert_eq!(hook.retract_or_cancel(), None);

    hook.fire(origin(), Vec2::new(1.0, 1.0)).unwrap();
    for _ in 0..5 {
        hook.tick(DT, anchor(), &EmptyWorld);
    }
    assert_eq!(hook.retract_or_cancel(), Some(LineId(0)));
    assert_eq!(hook.state(), HookState::GettingReadyToFire);

    let mut ticks = 0;
    while hook.state() != HookState::ReadyToFire {
        hook.tick(DT, anchor(), &EmptyWorld);
        ticks += 1;
        assert!(ticks < 1000);
    }
    assert!(hook.line().is_none());
}
