//! Observer traits for the rope solver and the line state machine.

use crate::float::Float;
use crate::state::LineEvent;
use crate::vec::Vec2;

/// Trait for observing rope solver passes.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all unlocked points have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over the segments.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when a solver step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Receives the lifecycle events of a fired line.
///
/// `on_climbing` is called synchronously with the anchor position a climb step
/// proposes. Returning `Some` replaces that position before it is committed,
/// which is how the player side clamps climbing against world collision.
pub trait LineObserver<F: Float> {
    fn on_event(&mut self, _event: &LineEvent<F>) {}

    fn on_climbing(&mut self, _proposed: Vec2<F>) -> Option<Vec2<F>> {
        None
    }
}

/// Ignores every event and accepts every climb position.
pub struct NoOpLineObserver;

impl<F: Float> LineObserver<F> for NoOpLineObserver {}
