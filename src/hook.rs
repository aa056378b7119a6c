//! Player-facing grapple hook: fires lines, reels them in, and cancels them.

use crate::config::HookConfig;
use crate::error::GrappleError;
use crate::float::Float;
use crate::line::{LineFrame, LineSimulation};
use crate::observer::LineObserver;
use crate::state::{LineEvent, LineStateMachine};
use crate::vec::{Vec, Vec2};
use crate::world::{Anchor, ContactProbe, LineFeedback, NoFeedback};
use alloc::boxed::Box;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controller states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HookState {
    ReadyToFire,
    /// A line is extending.
    Firing,
    /// The line is hooked; reeling is allowed.
    ShotComplete,
    /// The line is retracting; firing resumes once it finishes.
    GettingReadyToFire,
}

/// Identifies one fired line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

/// Climb-position correction supplied by the player side.
pub type PositionCorrection<F> = Box<dyn FnMut(Vec2<F>) -> Option<Vec2<F>>>;

/// Counts down the time a shot may extend before it gives up.
#[derive(Clone, Debug, Default)]
struct ExtendTimer<F: Float> {
    elapsed: F,
    armed: bool,
}

impl<F: Float> ExtendTimer<F> {
    fn start(&mut self) {
        self.elapsed = F::zero();
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    /// Advance by `dt`; true once `limit` has elapsed while armed.
    fn advance(&mut self, dt: F, limit: F) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed = self.elapsed + dt;
        self.elapsed >= limit
    }
}

/// Receives line events on behalf of the controller. Borrows only the
/// controller fields the events touch, so the line can be ticked alongside.
struct Relay<'a, F: Float> {
    state: &'a mut HookState,
    timer: &'a mut ExtendTimer<F>,
    correction: &'a mut Option<PositionCorrection<F>>,
    finished: bool,
}

impl<F: Float> LineObserver<F> for Relay<'_, F> {
    fn on_event(&mut self, event: &LineEvent<F>) {
        match event {
            LineEvent::StartExtending { .. } => {
                *self.state = HookState::Firing;
                self.timer.start();
            }
            LineEvent::StopExtending => self.timer.cancel(),
            LineEvent::GettingHooked { .. } => *self.state = HookState::ShotComplete,
            LineEvent::ReleasingHooked | LineEvent::GettingUnhooked | LineEvent::StartRetracting => {
                *self.state = HookState::GettingReadyToFire;
            }
            LineEvent::FinishRetracting => {
                *self.state = HookState::ReadyToFire;
                self.finished = true;
            }
        }
        debug!(?event, state = ?*self.state, "hook received line event");
    }

    fn on_climbing(&mut self, proposed: Vec2<F>) -> Option<Vec2<F>> {
        self.correction.as_mut().and_then(|correct| correct(proposed))
    }
}

/// Owns at most one fired line and translates player commands into its
/// lifecycle transitions.
pub struct GrappleHook<F: Float, X: LineFeedback<F> = NoFeedback> {
    config: HookConfig<F>,
    state: HookState,
    line: Option<(LineId, LineStateMachine<F>)>,
    next_id: u32,
    timer: ExtendTimer<F>,
    correction: Option<PositionCorrection<F>>,
    feedback: X,
}

impl<F: Float> GrappleHook<F, NoFeedback> {
    pub fn new(config: HookConfig<F>) -> Result<Self, GrappleError> {
        Self::with_feedback(config, NoFeedback)
    }
}

impl<F: Float, X: LineFeedback<F>> GrappleHook<F, X> {
    /// A hook that reports rope shape, impacts and effects to `feedback`.
    pub fn with_feedback(config: HookConfig<F>, feedback: X) -> Result<Self, GrappleError> {
        config.validate()?;
        Ok(GrappleHook {
            config,
            state: HookState::ReadyToFire,
            line: None,
            next_id: 0,
            timer: ExtendTimer::default(),
            correction: None,
            feedback,
        })
    }

    /// Install the callback that may clamp positions proposed by climbing.
    pub fn set_position_correction<C>(&mut self, correct: C)
    where
        C: FnMut(Vec2<F>) -> Option<Vec2<F>> + 'static,
    {
        self.correction = Some(Box::new(correct));
    }

    pub fn clear_position_correction(&mut self) {
        self.correction = None;
    }

    /// Fire a line from `from` toward `to`.
    ///
    /// Returns `Ok(None)` without touching anything unless the hook is ready.
    pub fn fire(&mut self, from: Vec2<F>, to: Vec2<F>) -> Result<Option<LineId>, GrappleError> {
        if self.state != HookState::ReadyToFire {
            return Ok(None);
        }
        if !from.is_finite() || !to.is_finite() {
            return Err(GrappleError::NonFiniteAnchor);
        }
        let facing = (to - from).normalize();
        if facing == Vec2::zero() {
            return Err(GrappleError::DegenerateAim);
        }

        let simulation = LineSimulation::new(self.config.line.clone(), from, facing)?;
        let mut machine = LineStateMachine::new(simulation);
        let mut relay = Relay {
            state: &mut self.state,
            timer: &mut self.timer,
            correction: &mut self.correction,
            finished: false,
        };
        machine.start_extending(from, self.config.extend_speed(), &mut relay)?;

        let id = LineId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        debug!(line = id.0, "fired line");
        self.line = Some((id, machine));
        Ok(Some(id))
    }

    /// Climb the hooked line one step on the next tick.
    pub fn reel(&mut self) -> Option<LineId> {
        if self.state != HookState::ShotComplete {
            return None;
        }
        let (id, machine) = self.line.as_mut()?;
        machine.climb().then_some(*id)
    }

    /// Send an extending or hooked line back. Retracting wins over a climb
    /// queued in the same tick.
    pub fn retract_or_cancel(&mut self) -> Option<LineId> {
        if !matches!(self.state, HookState::Firing | HookState::ShotComplete) {
            return None;
        }
        let (id, machine) = self.line.as_mut()?;
        let mut relay = Relay {
            state: &mut self.state,
            timer: &mut self.timer,
            correction: &mut self.correction,
            finished: false,
        };
        machine.retract(&mut relay, &mut self.feedback).then_some(*id)
    }

    /// Advance the fired line, then the extend timer.
    ///
    /// Returns the line's ends after the tick, or `None` when nothing is fired.
    /// A line that finishes retracting is dropped here and the hook is ready again.
    pub fn tick<P: ContactProbe<F>>(&mut self, dt: F, anchor: Anchor<F>, probe: &P) -> Option<LineFrame<F>> {
        let (_, machine) = self.line.as_mut()?;
        let mut relay = Relay {
            state: &mut self.state,
            timer: &mut self.timer,
            correction: &mut self.correction,
            finished: false,
        };

        let frame = machine.tick(dt, anchor, probe, &mut relay, &mut self.feedback);
        if relay.timer.advance(dt, self.config.line_time_to_full_length) {
            machine.unhook(&mut relay, &mut self.feedback);
        }

        if relay.finished {
            debug!("line finished retracting");
            self.line = None;
        }
        Some(frame)
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    pub fn line_id(&self) -> Option<LineId> {
        self.line.as_ref().map(|(id, _)| *id)
    }

    pub fn line(&self) -> Option<&LineStateMachine<F>> {
        self.line.as_ref().map(|(_, machine)| machine)
    }

    pub fn config(&self) -> &HookConfig<F> {
        &self.config
    }

    pub fn feedback(&self) -> &X {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut X {
        &mut self.feedback
    }
}
