//! Configuration for fired lines and the hook that fires them.

use crate::error::GrappleError;
use crate::float::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Adjacent retracting or climbing points closer than this are merged.
pub const MERGE_DISTANCE: f32 = 0.1;
/// Inset of the contact cast origin from the hook's leading edge.
pub const SKIN_WIDTH: f32 = 0.01;
/// Length of the contact cast in front of the hook.
pub const COLLISION_DISTANCE: f32 = 0.02;

/// Tuning for a single fired line.
///
/// # Builder Pattern
/// ```
/// use grapnel::config::LineConfig;
///
/// let config: LineConfig<f32> = LineConfig::new()
///     .with_number_of_points(12)
///     .with_retracting_speed(20.0)
///     .with_iterations(8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineConfig<F: Float> {
    /// Speed of each point toward its neighbour while retracting or climbing. Default: 15.
    pub retracting_speed: F,
    /// Extension ends unhooked once the hook is this far from the anchor. Default: 8.
    pub max_line_length: F,
    /// Points in the line, anchor and hook included. At least 2. Default: 10.
    pub number_of_points: usize,
    /// Hook fall acceleration, also the rope solver's gravity. Default: 5.
    pub gravity: F,
    /// Cap on the hook's accumulated fall speed. Default: 8.
    pub max_gravity_speed: F,
    /// Fall acceleration of interior points while retracting. Default: 2.
    pub line_gravity: F,
    /// Cap on the interior points' accumulated fall speed. Default: 6.
    pub max_line_gravity_speed: F,
    /// Rope solver relaxation passes per tick. Default: 10.
    pub number_of_iterations: usize,
    /// Width of the hook sprite along its facing. Default: 0.25.
    pub hook_width: F,
    /// Layers the contact cast tests against. Default: all.
    pub layer_mask: u32,
}

impl<F: Float> LineConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        LineConfig {
            retracting_speed: F::from_f32(15.0),
            max_line_length: F::from_f32(8.0),
            number_of_points: 10,
            gravity: F::from_f32(5.0),
            max_gravity_speed: F::from_f32(8.0),
            line_gravity: F::from_f32(2.0),
            max_line_gravity_speed: F::from_f32(6.0),
            number_of_iterations: 10,
            hook_width: F::from_f32(0.25),
            layer_mask: u32::MAX,
        }
    }

    pub fn with_retracting_speed(mut self, speed: F) -> Self {
        self.retracting_speed = speed;
        self
    }

    pub fn with_max_line_length(mut self, length: F) -> Self {
        self.max_line_length = length;
        self
    }

    pub fn with_number_of_points(mut self, count: usize) -> Self {
        self.number_of_points = count;
        self
    }

    /// Set hook gravity and its speed cap.
    pub fn with_gravity(mut self, gravity: F, max_speed: F) -> Self {
        self.gravity = gravity;
        self.max_gravity_speed = max_speed;
        self
    }

    /// Set line gravity and its speed cap.
    pub fn with_line_gravity(mut self, gravity: F, max_speed: F) -> Self {
        self.line_gravity = gravity;
        self.max_line_gravity_speed = max_speed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.number_of_iterations = iterations;
        self
    }

    pub fn with_hook_width(mut self, width: F) -> Self {
        self.hook_width = width;
        self
    }

    pub fn with_layer_mask(mut self, mask: u32) -> Self {
        self.layer_mask = mask;
        self
    }

    /// Reject configurations a line cannot be built from.
    pub fn validate(&self) -> Result<(), GrappleError> {
        if self.number_of_points < 2 {
            return Err(GrappleError::InsufficientPoints { count: self.number_of_points });
        }
        let scalars = [
            ("retracting_speed", self.retracting_speed),
            ("max_line_length", self.max_line_length),
            ("gravity", self.gravity),
            ("max_gravity_speed", self.max_gravity_speed),
            ("line_gravity", self.line_gravity),
            ("max_line_gravity_speed", self.max_line_gravity_speed),
            ("hook_width", self.hook_width),
        ];
        for (field, value) in scalars {
            if !value.is_finite() || value < F::zero() {
                return Err(GrappleError::NegativeSpeed { field });
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for LineConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tuning for the grapple hook controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HookConfig<F: Float> {
    /// Distance the line covers in `line_time_to_full_length`. Default: 5.
    pub line_length: F,
    /// Seconds a shot may extend before it gives up unhooked. Default: 0.5.
    pub line_time_to_full_length: F,
    pub line: LineConfig<F>,
}

impl<F: Float> HookConfig<F> {
    pub fn new() -> Self {
        HookConfig {
            line_length: F::from_f32(5.0),
            line_time_to_full_length: F::from_f32(0.5),
            line: LineConfig::new(),
        }
    }

    pub fn with_line_length(mut self, length: F) -> Self {
        self.line_length = length;
        self
    }

    pub fn with_time_to_full_length(mut self, seconds: F) -> Self {
        self.line_time_to_full_length = seconds;
        self
    }

    pub fn with_line(mut self, line: LineConfig<F>) -> Self {
        self.line = line;
        self
    }

    /// Constant extension speed of a fired hook.
    pub fn extend_speed(&self) -> F {
        self.line_length / self.line_time_to_full_length
    }

    pub fn validate(&self) -> Result<(), GrappleError> {
        if !self.line_time_to_full_length.is_finite() || self.line_time_to_full_length <= F::zero() {
            return Err(GrappleError::InvalidTimeToFullLength);
        }
        if !self.line_length.is_finite() || self.line_length < F::zero() {
            return Err(GrappleError::NegativeSpeed { field: "line_length" });
        }
        self.line.validate()
    }
}

impl<F: Float> Default for HookConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
