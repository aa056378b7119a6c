//! Mass points of the rope, advanced by position Verlet.

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// A rope point with implicit velocity (`position - prev_position`).
///
/// Locked points are never moved by integration or relaxation; only
/// [`ConstraintPoint::move_to`] or direct assignment relocates them.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintPoint<F: Float> {
    pub position: Vec2<F>,
    pub prev_position: Vec2<F>,
    pub locked: bool,
}

impl<F: Float> ConstraintPoint<F> {
    pub fn new(position: Vec2<F>) -> Self {
        ConstraintPoint {
            position,
            prev_position: position,
            locked: false,
        }
    }

    pub fn locked(position: Vec2<F>) -> Self {
        ConstraintPoint {
            position,
            prev_position: position,
            locked: true,
        }
    }

    /// One Verlet step with a constant downward acceleration of `gravity`.
    pub fn integrate(&mut self, gravity: F, dt: F) {
        if self.locked {
            return;
        }
        let velocity = self.position - self.prev_position;
        let drop = Vec2::up().scale(gravity * dt * dt);
        let new_position = self.position + velocity - drop;
        self.prev_position = self.position;
        self.position = new_position;
    }

    /// Teleport the point, keeping the previous position as the step's origin.
    pub fn move_to(&mut self, position: Vec2<F>) {
        self.prev_position = self.position;
        self.position = position;
    }
}
