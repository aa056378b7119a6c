//! Iterative constraint solver for the rope.

use crate::float::Float;
use crate::point::ConstraintPoint;
use crate::segment::ConstraintSegment;
use crate::observer::StepObserver;
use tracing::trace;

/// Position-Verlet integrator with distance-constraint relaxation.
///
/// Holds no points of its own: it works on whichever arena and segment list
/// it is handed, so the line can rebuild those freely between steps.
#[derive(Clone, Debug, PartialEq)]
pub struct RopeSolver<F: Float> {
    /// Downward acceleration applied to every unlocked point.
    pub gravity: F,
    /// Relaxation passes per step.
    pub iterations: usize,
}

impl<F: Float> RopeSolver<F> {
    pub fn new(gravity: F, iterations: usize) -> Self {
        RopeSolver { gravity, iterations }
    }

    /// Integrate all unlocked points, then relax every segment `iterations` times.
    ///
    /// Locked points are never displaced. Segment endpoint distances approach
    /// their rest lengths as the number of iterations grows.
    pub fn relax<O: StepObserver>(
        &self,
        points: &mut [ConstraintPoint<F>],
        segments: &[ConstraintSegment<F>],
        dt: F,
        observer: &mut O,
    ) {
        for p in points.iter_mut() {
            p.integrate(self.gravity, dt);
        }
        observer.on_integrate();

        for i in 0..self.iterations {
            for segment in segments {
                segment.solve(points);
            }
            observer.on_constraint_iteration(i);
        }

        trace!(points = points.len(), segments = segments.len(), iterations = self.iterations, "rope relaxed");
        observer.on_step_complete();
    }
}

impl<F: Float> Default for RopeSolver<F> {
    fn default() -> Self {
        RopeSolver::new(F::from_f32(5.0), 10)
    }
}
