//! The grapple cable: a point arena driven kinematically while extending,
//! climbing and retracting, and by the rope solver while swinging.

use crate::config::{LineConfig, COLLISION_DISTANCE, MERGE_DISTANCE, SKIN_WIDTH};
use crate::error::GrappleError;
use crate::float::Float;
use crate::observer::NoOpStepObserver;
use crate::point::ConstraintPoint;
use crate::segment::{chain_segments, ConstraintSegment};
use crate::solver::RopeSolver;
use crate::vec::{Vec, Vec2};
use crate::world::{Anchor, ContactProbe};
use alloc::vec::Vec as AllocVec;
use tracing::trace;

/// What the cable is currently doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineMode {
    Idle,
    Extending,
    Hooked,
    Retracting,
    /// Collapsed onto the anchor; nothing left to simulate.
    Retracted,
}

/// Something the state machine has to react to, raised by [`LineSimulation::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineSignal {
    /// The hook's contact cast hit the world this tick.
    Contact,
    /// The hook flew past `max_line_length` without hitting anything.
    Overextended,
    /// Only one point is left; retraction is complete.
    Retracted,
}

/// Both ends of the line after a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineFrame<F: Float> {
    pub hook: Vec2<F>,
    /// Authoritative anchor position; differs from the caller's anchor after a
    /// climb or a free swing.
    pub anchor: Vec2<F>,
}

/// Result of one [`LineSimulation::advance`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Advance<F: Float> {
    pub frame: LineFrame<F>,
    pub signal: Option<LineSignal>,
}

/// A fired line: anchor at point 0, hook at the last point.
pub struct LineSimulation<F: Float> {
    config: LineConfig<F>,
    solver: RopeSolver<F>,
    points: AllocVec<ConstraintPoint<F>>,
    segments: AllocVec<ConstraintSegment<F>>,
    hook: Vec2<F>,
    facing: Vec2<F>,
    anchor: Vec2<F>,
    mode: LineMode,
    speed: F,
    gravity_speed: F,
    line_gravity_speed: F,
    climb_pending: bool,
}

impl<F: Float> LineSimulation<F> {
    /// A line whose hook sits at `hook` pointing along `facing`.
    ///
    /// All `number_of_points` points start on the hook until
    /// [`start_extending`](Self::start_extending) supplies the anchor.
    pub fn new(config: LineConfig<F>, hook: Vec2<F>, facing: Vec2<F>) -> Result<Self, GrappleError> {
        config.validate()?;
        if !hook.is_finite() || !facing.is_finite() {
            return Err(GrappleError::NonFiniteAnchor);
        }
        let solver = RopeSolver::new(config.gravity, config.number_of_iterations);
        let mut line = LineSimulation {
            config,
            solver,
            points: AllocVec::new(),
            segments: AllocVec::new(),
            hook,
            facing: facing.normalize(),
            anchor: hook,
            mode: LineMode::Idle,
            speed: F::zero(),
            gravity_speed: F::zero(),
            line_gravity_speed: F::zero(),
            climb_pending: false,
        };
        line.rebuild_straight();
        Ok(line)
    }

    /// Begin flying away from `anchor` at `speed`. Resets both gravity accumulators.
    pub fn start_extending(&mut self, anchor: Vec2<F>, speed: F) -> Result<(), GrappleError> {
        if !anchor.is_finite() {
            return Err(GrappleError::NonFiniteAnchor);
        }
        self.anchor = anchor;
        self.speed = speed;
        self.gravity_speed = F::zero();
        self.line_gravity_speed = F::zero();
        self.climb_pending = false;
        self.rebuild_straight();
        self.mode = LineMode::Extending;
        Ok(())
    }

    /// Fix the hook where it is.
    pub fn mark_contact(&mut self) {
        self.speed = F::zero();
        self.mode = LineMode::Hooked;
    }

    /// Queue one climb step for the next hooked tick.
    pub fn start_climbing(&mut self) {
        if self.mode == LineMode::Hooked {
            self.climb_pending = true;
        }
    }

    /// Pull every point back toward the anchor from now on.
    pub fn start_retracting(&mut self) {
        if self.mode == LineMode::Retracted {
            return;
        }
        self.speed = F::zero();
        self.climb_pending = false;
        self.mode = LineMode::Retracting;
    }

    /// Whether the contact cast from the hook's leading edge hits anything.
    pub fn has_made_contact<P: ContactProbe<F>>(&self, probe: &P) -> bool {
        let inset = self.config.hook_width - F::from_f32(SKIN_WIDTH);
        let origin = self.hook + self.facing.scale(inset);
        probe
            .cast(origin, self.facing, F::from_f32(COLLISION_DISTANCE), self.config.layer_mask)
            .is_some()
    }

    /// Run one tick of the current mode.
    ///
    /// `on_climb` receives the anchor position a pending climb step proposes and
    /// may replace it; it is only called while hooked with a climb queued.
    pub fn advance<P, C>(&mut self, dt: F, anchor: Anchor<F>, probe: &P, on_climb: C) -> Advance<F>
    where
        P: ContactProbe<F>,
        C: FnOnce(Vec2<F>) -> Option<Vec2<F>>,
    {
        let signal = match self.mode {
            LineMode::Extending => self.extend(dt, anchor.position, probe),
            LineMode::Hooked => {
                if self.climb_pending {
                    self.climb(dt, on_climb);
                } else {
                    self.swing(dt, anchor);
                }
                None
            }
            LineMode::Retracting => self.retract(dt, anchor.position),
            LineMode::Idle | LineMode::Retracted => None,
        };
        Advance { frame: self.frame(), signal }
    }

    fn extend<P: ContactProbe<F>>(&mut self, dt: F, anchor: Vec2<F>, probe: &P) -> Option<LineSignal> {
        self.anchor = anchor;
        if self.has_made_contact(probe) {
            self.rebuild_straight();
            return Some(LineSignal::Contact);
        }

        self.accumulate_gravity(dt);
        let step = self.facing.scale(self.speed * dt) - Vec2::up().scale(self.gravity_speed * dt);
        self.hook = self.hook + step;
        self.facing = self.facing.rotate_towards(step, (self.speed * dt).to_radians());
        self.rebuild_straight();

        if self.anchor.distance(self.hook) > self.config.max_line_length {
            Some(LineSignal::Overextended)
        } else {
            None
        }
    }

    /// Rope-solver step with the anchor reassigned from the host and the hook fixed.
    fn swing(&mut self, dt: F, anchor: Anchor<F>) {
        let first = &mut self.points[0];
        // Re-supplying last tick's result keeps the swing's momentum.
        if first.position != anchor.position {
            first.move_to(anchor.position);
        }
        first.locked = anchor.locked;
        if let Some(last) = self.points.last_mut() {
            last.locked = true;
        }

        self.solver.relax(&mut self.points, &self.segments, dt, &mut NoOpStepObserver);
        self.anchor = self.points[0].position;
    }

    /// Move every point but the hook toward its successor, then commit the
    /// (possibly corrected) anchor.
    fn climb<C: FnOnce(Vec2<F>) -> Option<Vec2<F>>>(&mut self, dt: F, on_climb: C) {
        self.climb_pending = false;
        let step = self.config.retracting_speed * dt;
        let drop = Vec2::up().scale(self.line_gravity_speed * dt);
        let original: AllocVec<Vec2<F>> = self.points.iter().map(|p| p.position).collect();
        let last = original.len() - 1;

        let mut moved = original.clone();
        for i in 0..last {
            moved[i] = original[i].move_towards(original[i + 1], step) - drop;
        }
        if let Some(corrected) = on_climb(moved[0]) {
            moved[0] = corrected;
        }

        let mut kept = AllocVec::with_capacity(moved.len());
        kept.push(moved[0]);
        for (i, &position) in moved.iter().enumerate().skip(1) {
            let merged = i < last && position.distance(moved[i - 1]) < F::from_f32(MERGE_DISTANCE);
            if merged {
                trace!(index = i, "climb merged point");
            } else {
                kept.push(position);
            }
        }

        self.commit(&kept);
        self.anchor = kept[0];
    }

    /// Pull every point but the anchor toward its predecessor, merging points
    /// that end up next to their moved predecessor. Point 0 follows the host's anchor.
    fn retract(&mut self, dt: F, anchor: Vec2<F>) -> Option<LineSignal> {
        self.accumulate_line_gravity(dt);
        self.accumulate_gravity(dt);
        self.anchor = anchor;

        let step = self.config.retracting_speed * dt;
        let drop = Vec2::up().scale(self.line_gravity_speed * dt);
        let mut original: AllocVec<Vec2<F>> = self.points.iter().map(|p| p.position).collect();
        original[0] = anchor;

        // Approach targets are last tick's positions; merging compares against
        // where the predecessor is after this tick. The drop is shared by every
        // point but the anchor, so it is left out of the comparison.
        let mut moved = original.clone();
        for i in 1..original.len() {
            moved[i] = original[i].move_towards(original[i - 1], step);
        }

        let mut kept = AllocVec::with_capacity(moved.len());
        kept.push(anchor);
        for i in 1..moved.len() {
            if moved[i].distance(moved[i - 1]) < F::from_f32(MERGE_DISTANCE) {
                trace!(index = i, "retract merged point");
                continue;
            }
            kept.push(moved[i] - drop);
        }

        if kept.len() == 1 {
            self.commit(&kept);
            self.hook = anchor;
            self.mode = LineMode::Retracted;
            return Some(LineSignal::Retracted);
        }

        let last = kept.len() - 1;
        kept[last] = kept[last] - Vec2::up().scale(self.gravity_speed * dt);
        self.hook = kept[last];
        self.commit(&kept);
        None
    }

    fn accumulate_gravity(&mut self, dt: F) {
        self.gravity_speed = (self.gravity_speed + self.config.gravity * dt).min(self.config.max_gravity_speed);
    }

    fn accumulate_line_gravity(&mut self, dt: F) {
        self.line_gravity_speed =
            (self.line_gravity_speed + self.config.line_gravity * dt).min(self.config.max_line_gravity_speed);
    }

    /// Straight line of `number_of_points` from anchor to hook, both ends locked.
    fn rebuild_straight(&mut self) {
        let n = self.config.number_of_points;
        let last = F::from_usize(n - 1);
        self.points.clear();
        for i in 0..n {
            let position = self.anchor.lerp(self.hook, F::from_usize(i) / last);
            if i == 0 || i == n - 1 {
                self.points.push(ConstraintPoint::locked(position));
            } else {
                self.points.push(ConstraintPoint::new(position));
            }
        }
        self.segments = chain_segments(&self.points);
    }

    /// Replace the arena with `positions`, carrying each point's previous
    /// position over by index, and relink the segments.
    fn commit(&mut self, positions: &[Vec2<F>]) {
        let last = positions.len() - 1;
        let points = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let prev = self.points.get(i).map_or(position, |p| p.position);
                ConstraintPoint {
                    position,
                    prev_position: prev,
                    locked: i == 0 || i == last,
                }
            })
            .collect();
        self.points = points;
        self.segments = chain_segments(&self.points);
    }

    fn frame(&self) -> LineFrame<F> {
        LineFrame { hook: self.hook, anchor: self.anchor }
    }

    /// Current rope shape, anchor first, for the renderer.
    pub fn polyline(&self) -> AllocVec<Vec2<F>> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn points(&self) -> &[ConstraintPoint<F>] {
        &self.points
    }

    pub fn segments(&self) -> &[ConstraintSegment<F>] {
        &self.segments
    }

    pub fn mode(&self) -> LineMode {
        self.mode
    }

    pub fn hook_position(&self) -> Vec2<F> {
        self.hook
    }

    pub fn anchor_position(&self) -> Vec2<F> {
        self.anchor
    }

    /// Unit direction the hook is flying in.
    pub fn facing(&self) -> Vec2<F> {
        self.facing
    }

    pub fn speed(&self) -> F {
        self.speed
    }

    pub fn gravity_speed(&self) -> F {
        self.gravity_speed
    }

    pub fn line_gravity_speed(&self) -> F {
        self.line_gravity_speed
    }

    pub fn is_climb_pending(&self) -> bool {
        self.climb_pending
    }

    /// Sum of the segments' rest lengths.
    pub fn rest_length(&self) -> F {
        self.segments.iter().fold(F::zero(), |acc, s| acc + s.length())
    }

    pub fn config(&self) -> &LineConfig<F> {
        &self.config
    }
}
