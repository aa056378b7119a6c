//! Floating-point abstraction so the rope and hook code runs on `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Scalar operations needed by the rope solver, the line simulation and the hook.
///
/// Implemented for `f32` and `f64`; transcendental functions go through `libm`
/// so the crate stays `no_std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Segment centres and half-vectors.
    fn half() -> Self;
    fn two() -> Self;
    /// Used for degree conversion and wrapping hook rotation.
    fn pi() -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn abs(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// Lift tuning constants such as the merge distance.
    fn from_f32(v: f32) -> Self;
    /// Heading of a direction vector, `atan2(y, x)`.
    fn atan2(y: Self, x: Self) -> Self;
    /// False for NaN or infinite positions handed in by the host.
    fn is_finite(self) -> bool;

    /// Point index or count as a lerp parameter.
    fn from_usize(v: usize) -> Self {
        Self::from_f32(v as f32)
    }

    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Hook turn rates are configured in degrees per tick.
    fn to_radians(self) -> Self {
        self * Self::pi() / Self::from_f32(180.0)
    }

    /// Magnitudes below `epsilon` are treated as a degenerate direction.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f32::consts::PI }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v }
    fn atan2(y: Self, x: Self) -> Self { libm::atan2f(y, x) }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f64::consts::PI }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn atan2(y: Self, x: Self) -> Self { libm::atan2(y, x) }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}
