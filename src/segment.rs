//! Rigid-distance links between consecutive rope points.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::point::ConstraintPoint;

/// A fixed-length link between two points of a point arena, referenced by index.
///
/// `length` is measured once at creation and never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSegment<F: Float> {
    pub a: usize,
    pub b: usize,
    length: F,
}

impl<F: Float> ConstraintSegment<F> {
    pub fn new(a: usize, b: usize, length: F) -> Self {
        ConstraintSegment { a, b, length }
    }

    /// Link `a` and `b` at their current distance.
    pub fn from_points(a: usize, b: usize, points: &[ConstraintPoint<F>]) -> Self {
        let length = points[a].position.distance(points[b].position);
        ConstraintSegment { a, b, length }
    }

    /// Rest length.
    pub fn length(&self) -> F {
        self.length
    }

    pub fn center(&self, points: &[ConstraintPoint<F>]) -> Vec2<F> {
        (points[self.a].position + points[self.b].position).scale(F::half())
    }

    /// Unit vector from `b` toward `a`; zero if the endpoints coincide.
    pub fn direction(&self, points: &[ConstraintPoint<F>]) -> Vec2<F> {
        (points[self.a].position - points[self.b].position).normalize()
    }

    /// Place both unlocked endpoints `length / 2` either side of the segment centre.
    ///
    /// Callers must keep the endpoints apart: coincident endpoints have no direction
    /// and both collapse onto the centre.
    pub fn solve(&self, points: &mut [ConstraintPoint<F>]) {
        let center = self.center(points);
        let half = self.direction(points).scale(self.length * F::half());

        if !points[self.a].locked {
            points[self.a].position = center + half;
        }
        if !points[self.b].locked {
            points[self.b].position = center - half;
        }
    }
}

/// Chain every consecutive pair of `points` at its current distance.
pub fn chain_segments<F: Float>(points: &[ConstraintPoint<F>]) -> alloc::vec::Vec<ConstraintSegment<F>> {
    (1..points.len())
        .map(|i| ConstraintSegment::from_points(i - 1, i, points))
        .collect()
}
