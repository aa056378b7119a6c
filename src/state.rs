//! Lifecycle of a single fired line.

use crate::error::GrappleError;
use crate::float::Float;
use crate::line::{LineFrame, LineMode, LineSignal, LineSimulation};
use crate::observer::LineObserver;
use crate::vec::Vec2;
use crate::world::{Anchor, ContactProbe, LineFeedback};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// States of a fired line.
///
/// ```text
/// Idle -> Extending -> Hooked -> Retracting -> Finished
///              \-> Unhooked -/
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineState {
    Idle,
    Extending,
    Hooked,
    /// Transient: extension ran out without contact. Retraction follows immediately.
    Unhooked,
    Retracting,
    /// Fully retracted; the line should be discarded.
    Finished,
}

/// Transition notifications raised to the [`LineObserver`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LineEvent<F: Float> {
    StartExtending { anchor: Vec2<F>, speed: F },
    StopExtending,
    GettingHooked { hook: Vec2<F> },
    ReleasingHooked,
    GettingUnhooked,
    StartRetracting,
    FinishRetracting,
}

/// Drives one [`LineSimulation`] through its lifecycle and reports every
/// transition to an observer.
pub struct LineStateMachine<F: Float> {
    state: LineState,
    line: LineSimulation<F>,
}

impl<F: Float> LineStateMachine<F> {
    pub fn new(line: LineSimulation<F>) -> Self {
        LineStateMachine { state: LineState::Idle, line }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn line(&self) -> &LineSimulation<F> {
        &self.line
    }

    pub fn is_finished(&self) -> bool {
        self.state == LineState::Finished
    }

    /// Idle -> Extending. Returns `Ok(false)` from any other state.
    pub fn start_extending<O: LineObserver<F>>(
        &mut self,
        anchor: Vec2<F>,
        speed: F,
        observer: &mut O,
    ) -> Result<bool, GrappleError> {
        if self.state != LineState::Idle {
            return Ok(false);
        }
        self.line.start_extending(anchor, speed)?;
        observer.on_event(&LineEvent::StartExtending { anchor, speed });
        self.transition(LineState::Extending);
        Ok(true)
    }

    /// Queue a climb step. Only meaningful while hooked.
    pub fn climb(&mut self) -> bool {
        if self.state != LineState::Hooked {
            return false;
        }
        self.line.start_climbing();
        true
    }

    /// Extending -> Unhooked -> Retracting, as when the extend timer runs out.
    pub fn unhook<O, X>(&mut self, observer: &mut O, feedback: &mut X) -> bool
    where
        O: LineObserver<F>,
        X: LineFeedback<F>,
    {
        if self.state != LineState::Extending {
            return false;
        }
        observer.on_event(&LineEvent::StopExtending);
        observer.on_event(&LineEvent::GettingUnhooked);
        self.transition(LineState::Unhooked);
        self.start_retracting(observer, feedback);
        true
    }

    /// Extending or Hooked -> Retracting. Clears any pending climb.
    pub fn retract<O, X>(&mut self, observer: &mut O, feedback: &mut X) -> bool
    where
        O: LineObserver<F>,
        X: LineFeedback<F>,
    {
        match self.state {
            LineState::Extending | LineState::Hooked => {
                self.start_retracting(observer, feedback);
                true
            }
            _ => false,
        }
    }

    /// Advance the line one tick and apply whatever transition it signals.
    pub fn tick<P, O, X>(
        &mut self,
        dt: F,
        anchor: Anchor<F>,
        probe: &P,
        observer: &mut O,
        feedback: &mut X,
    ) -> LineFrame<F>
    where
        P: ContactProbe<F>,
        O: LineObserver<F>,
        X: LineFeedback<F>,
    {
        if self.state == LineState::Finished {
            return LineFrame { hook: self.line.hook_position(), anchor: self.line.anchor_position() };
        }

        let advance = self.line.advance(dt, anchor, probe, |proposed| observer.on_climbing(proposed));
        match advance.signal {
            Some(LineSignal::Contact) => self.get_hooked(observer, feedback),
            Some(LineSignal::Overextended) => {
                self.unhook(observer, feedback);
            }
            Some(LineSignal::Retracted) => self.finish_retracting(observer),
            None => {}
        }

        if self.state != LineState::Finished {
            feedback.draw_polyline(&self.line.polyline());
        }
        advance.frame
    }

    fn get_hooked<O, X>(&mut self, observer: &mut O, feedback: &mut X)
    where
        O: LineObserver<F>,
        X: LineFeedback<F>,
    {
        let hook = self.line.hook_position();
        observer.on_event(&LineEvent::StopExtending);
        observer.on_event(&LineEvent::GettingHooked { hook });
        self.line.mark_contact();
        feedback.play_impact(hook);
        feedback.show_break_effect(hook);
        self.transition(LineState::Hooked);
    }

    fn start_retracting<O, X>(&mut self, observer: &mut O, feedback: &mut X)
    where
        O: LineObserver<F>,
        X: LineFeedback<F>,
    {
        match self.state {
            LineState::Hooked => observer.on_event(&LineEvent::ReleasingHooked),
            LineState::Extending => observer.on_event(&LineEvent::StopExtending),
            _ => {}
        }
        observer.on_event(&LineEvent::StartRetracting);
        self.line.start_retracting();
        feedback.hide_break_effect();
        self.transition(LineState::Retracting);
    }

    fn finish_retracting<O: LineObserver<F>>(&mut self, observer: &mut O) {
        debug_assert_eq!(self.line.mode(), LineMode::Retracted);
        observer.on_event(&LineEvent::FinishRetracting);
        self.transition(LineState::Finished);
    }

    fn transition(&mut self, next: LineState) {
        debug!(from = ?self.state, to = ?next, "line state change");
        self.state = next;
    }
}
