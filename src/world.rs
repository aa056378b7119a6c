//! Seams to the hosting game: collision casts, presentation, and the player anchor.

use crate::float::Float;
use crate::vec::Vec2;

/// Casts a short ray against the world's collidable layers.
pub trait ContactProbe<F: Float> {
    /// Distance to the first hit along `direction` within `max_distance`,
    /// considering only layers in `layer_mask`.
    fn cast(&self, origin: Vec2<F>, direction: Vec2<F>, max_distance: F, layer_mask: u32) -> Option<F>;
}

impl<F: Float, T: Fn(Vec2<F>, Vec2<F>, F, u32) -> Option<F>> ContactProbe<F> for T {
    fn cast(&self, origin: Vec2<F>, direction: Vec2<F>, max_distance: F, layer_mask: u32) -> Option<F> {
        self(origin, direction, max_distance, layer_mask)
    }
}

/// A world with nothing to hit.
pub struct EmptyWorld;

impl<F: Float> ContactProbe<F> for EmptyWorld {
    fn cast(&self, _origin: Vec2<F>, _direction: Vec2<F>, _max_distance: F, _layer_mask: u32) -> Option<F> {
        None
    }
}

/// Fire-and-forget rendering, audio and effect triggers.
///
/// No line state depends on these completing.
pub trait LineFeedback<F: Float> {
    /// Current rope shape, anchor first.
    fn draw_polyline(&mut self, _points: &[Vec2<F>]) {}

    fn play_impact(&mut self, _at: Vec2<F>) {}

    fn show_break_effect(&mut self, _at: Vec2<F>) {}

    fn hide_break_effect(&mut self) {}
}

pub struct NoFeedback;

impl<F: Float> LineFeedback<F> for NoFeedback {}

/// The player end of the line as the host sees it this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor<F: Float> {
    pub position: Vec2<F>,
    /// A locked anchor is held in place while swinging (e.g. grounded).
    pub locked: bool,
}

impl<F: Float> Anchor<F> {
    pub fn locked(position: Vec2<F>) -> Self {
        Anchor { position, locked: true }
    }

    pub fn free(position: Vec2<F>) -> Self {
        Anchor { position, locked: false }
    }
}
