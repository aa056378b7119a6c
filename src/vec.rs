//! The planar vector type every position in the crate is expressed in.

use crate::float::Float;
use core::ops::{Add, Sub, Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vector operations used by the rope solver and the line simulation.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    /// The scalar (float) type for this vector.
    type Scalar: Float;

    /// Zero vector.
    fn zero() -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// Squared length (avoids sqrt).
    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    /// Length (magnitude).
    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(Self::Scalar::one() / len)
        }
    }

    /// Scale all components by a scalar.
    fn scale(self, s: Self::Scalar) -> Self;

    /// Distance between two points.
    fn distance(self, other: Self) -> Self::Scalar {
        (self - other).length()
    }

    /// Linear interpolation between self and other.
    fn lerp(self, other: Self, t: Self::Scalar) -> Self {
        self + (other - self).scale(t)
    }
}

/// 2D position or direction. +y is up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Unit vector along +y.
    pub fn up() -> Self { Vec2 { x: F::zero(), y: F::one() } }

    /// Unit vector along +x.
    pub fn right() -> Self { Vec2 { x: F::one(), y: F::zero() } }

    /// Unit vector at `angle` radians counter-clockwise from +x.
    pub fn from_angle(angle: F) -> Self {
        Vec2 { x: angle.cos(), y: angle.sin() }
    }

    /// Angle in radians counter-clockwise from +x.
    pub fn angle(self) -> F {
        F::atan2(self.y, self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Move toward `target` by at most `max_step`, landing on it when closer than that.
    pub fn move_towards(self, target: Self, max_step: F) -> Self {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step || dist.is_near_zero(F::from_f32(1e-10)) {
            target
        } else {
            self + delta.scale(max_step / dist)
        }
    }

    /// Rotate this direction toward `target` by at most `max_radians`.
    ///
    /// Both vectors are treated as directions; the result has unit length.
    /// A zero `target` leaves the direction unchanged.
    pub fn rotate_towards(self, target: Self, max_radians: F) -> Self {
        if target.length_sq().is_near_zero(F::from_f32(1e-20)) {
            return self;
        }
        let current = self.angle();
        let mut delta = target.angle() - current;
        let pi = F::pi();
        let two_pi = F::two() * pi;
        if delta > pi {
            delta = delta - two_pi;
        } else if delta < -pi {
            delta = delta + two_pi;
        }
        Vec2::from_angle(current + delta.clamp(-max_radians, max_radians))
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;
    fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
    fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }
    fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}
