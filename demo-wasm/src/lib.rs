use grapnel::{
    Anchor, ContactProbe, GrappleHook, HookConfig, HookState, LineConfig, LineFeedback, LineState, Vec2,
};
use wasm_bindgen::prelude::*;

// ---- World ----

/// Axis-aligned box the hook can bite into.
#[derive(Clone, Copy)]
struct Block {
    min: Vec2<f32>,
    max: Vec2<f32>,
}

struct Level {
    blocks: Vec<Block>,
}

impl ContactProbe<f32> for Level {
    fn cast(&self, origin: Vec2<f32>, direction: Vec2<f32>, max_distance: f32, _layer_mask: u32) -> Option<f32> {
        self.blocks
            .iter()
            .filter_map(|b| slab_cast(b, origin, direction, max_distance))
            .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |d| d.min(t))))
    }
}

/// Ray vs box slab test; distance to entry, or 0 when starting inside.
fn slab_cast(block: &Block, origin: Vec2<f32>, direction: Vec2<f32>, max_distance: f32) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = max_distance;
    for (o, d, lo, hi) in [
        (origin.x, direction.x, block.min.x, block.max.x),
        (origin.y, direction.y, block.min.y, block.max.y),
    ] {
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (a, b) = ((lo - o) / d, (hi - o) / d);
        t_min = t_min.max(a.min(b));
        t_max = t_max.min(a.max(b));
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Collects what the page needs to draw each frame.
#[derive(Default)]
struct Canvas {
    rope: Vec<f32>,
    impacts: u32,
    break_effect: Option<(f32, f32)>,
}

impl LineFeedback<f32> for Canvas {
    fn draw_polyline(&mut self, points: &[Vec2<f32>]) {
        self.rope.clear();
        for p in points {
            self.rope.push(p.x);
            self.rope.push(p.y);
        }
    }

    fn play_impact(&mut self, _at: Vec2<f32>) {
        self.impacts += 1;
    }

    fn show_break_effect(&mut self, at: Vec2<f32>) {
        self.break_effect = Some((at.x, at.y));
    }

    fn hide_break_effect(&mut self) {
        self.break_effect = None;
    }
}

// ---- Grapple Demo ----

#[wasm_bindgen]
pub struct GrappleDemo {
    hook: GrappleHook<f32, Canvas>,
    level: Level,
    player: Vec2<f32>,
    walk: f32,
    walk_speed: f32,
    floor: f32,
}

#[wasm_bindgen]
impl GrappleDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(points: usize) -> Result<GrappleDemo, JsError> {
        let config = HookConfig::new()
            .with_line_length(6.0)
            .with_time_to_full_length(0.4)
            .with_line(LineConfig::new().with_number_of_points(points).with_max_line_length(10.0));
        let floor = 0.0;
        let mut hook = GrappleHook::with_feedback(config, Canvas::default())?;
        // Climbing may not drag the player through the floor.
        hook.set_position_correction(move |proposed: Vec2<f32>| Some(Vec2::new(proposed.x, proposed.y.max(floor))));

        let level = Level {
            blocks: vec![
                Block { min: Vec2::new(-2.0, 5.0), max: Vec2::new(3.0, 6.0) },
                Block { min: Vec2::new(6.0, 7.0), max: Vec2::new(9.0, 8.0) },
                Block { min: Vec2::new(12.0, 0.0), max: Vec2::new(13.0, 9.0) },
            ],
        };

        Ok(GrappleDemo {
            hook,
            level,
            player: Vec2::new(0.0, floor),
            walk: 0.0,
            walk_speed: 4.0,
            floor,
        })
    }

    /// Horizontal input in [-1, 1].
    pub fn set_walk(&mut self, axis: f32) {
        self.walk = axis.clamp(-1.0, 1.0);
    }

    /// Returns true if a new line left the player.
    pub fn fire(&mut self, x: f32, y: f32) -> bool {
        matches!(self.hook.fire(self.player, Vec2::new(x, y)), Ok(Some(_)))
    }

    pub fn reel(&mut self) -> bool {
        self.hook.reel().is_some()
    }

    pub fn retract(&mut self) -> bool {
        self.hook.retract_or_cancel().is_some()
    }

    pub fn update(&mut self, dt: f32) {
        let grounded = self.player.y <= self.floor;
        if grounded || self.hook.state() != HookState::ShotComplete {
            self.player.x += self.walk * self.walk_speed * dt;
        }

        let anchor = if grounded { Anchor::locked(self.player) } else { Anchor::free(self.player) };
        match self.hook.tick(dt, anchor, &self.level) {
            Some(frame) => self.player = frame.anchor,
            None => self.hook.feedback_mut().rope.clear(),
        }

        // Off the rope the player simply drops back to the floor.
        let swinging = self.hook.line().map_or(false, |l| l.state() == LineState::Hooked);
        if !swinging {
            self.player.y = (self.player.y - 9.0 * dt).max(self.floor);
        }
        self.player.y = self.player.y.max(self.floor);
    }

    pub fn player(&self) -> Vec<f32> {
        vec![self.player.x, self.player.y]
    }

    /// Returns flat [x0, y0, x1, y1, ...] rope positions, anchor first.
    pub fn rope(&self) -> Vec<f32> {
        self.hook.feedback().rope.clone()
    }

    /// Returns [x, y] of the break effect, or an empty array when hidden.
    pub fn break_effect(&self) -> Vec<f32> {
        self.hook.feedback().break_effect.map_or_else(Vec::new, |(x, y)| vec![x, y])
    }

    pub fn impacts(&self) -> u32 {
        self.hook.feedback().impacts
    }

    /// Flat [min_x, min_y, max_x, max_y, ...] for every block.
    pub fn blocks(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.level.blocks.len() * 4);
        for b in &self.level.blocks {
            out.extend_from_slice(&[b.min.x, b.min.y, b.max.x, b.max.y]);
        }
        out
    }

    /// 0 ready, 1 firing, 2 hooked, 3 retracting.
    pub fn state(&self) -> u8 {
        match self.hook.state() {
            HookState::ReadyToFire => 0,
            HookState::Firing => 1,
            HookState::ShotComplete => 2,
            HookState::GettingReadyToFire => 3,
        }
    }
}
