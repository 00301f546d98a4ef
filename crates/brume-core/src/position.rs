//! The [`Real3`] vector type used for positions and displacements.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

/// A 3-D vector of `f64` components.
///
/// Used for particle positions, displacements, and box edge lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Real3(pub [f64; 3]);

impl Real3 {
    /// The zero vector.
    pub const ZERO: Real3 = Real3([0.0; 3]);

    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// A vector with all three components equal to `v`.
    pub const fn splat(v: f64) -> Self {
        Self([v, v, v])
    }

    /// First component.
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// Second component.
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Third component.
    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Dot product.
    pub fn dot(&self, other: &Real3) -> f64 {
        self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
    }

    /// Squared Euclidean length.
    pub fn length_sq(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Apply `f` to each component.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self([f(self.0[0]), f(self.0[1]), f(self.0[2])])
    }

    /// Combine two vectors component-wise with `f`.
    pub fn zip_with(self, other: Real3, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self([
            f(self.0[0], other.0[0]),
            f(self.0[1], other.0[1]),
            f(self.0[2], other.0[2]),
        ])
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl fmt::Display for Real3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

impl From<[f64; 3]> for Real3 {
    fn from(v: [f64; 3]) -> Self {
        Self(v)
    }
}

impl Index<usize> for Real3 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl Add for Real3 {
    type Output = Real3;

    fn add(self, rhs: Real3) -> Real3 {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl AddAssign for Real3 {
    fn add_assign(&mut self, rhs: Real3) {
        *self = *self + rhs;
    }
}

impl Sub for Real3 {
    type Output = Real3;

    fn sub(self, rhs: Real3) -> Real3 {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl SubAssign for Real3 {
    fn sub_assign(&mut self, rhs: Real3) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Real3 {
    type Output = Real3;

    fn mul(self, rhs: f64) -> Real3 {
        self.map(|a| a * rhs)
    }
}

impl Div<f64> for Real3 {
    type Output = Real3;

    fn div(self, rhs: f64) -> Real3 {
        self.map(|a| a / rhs)
    }
}

impl Neg for Real3 {
    type Output = Real3;

    fn neg(self) -> Real3 {
        self.map(|a| -a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Real3::new(1.0, 2.0, 3.0);
        let b = Real3::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Real3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Real3::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Real3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Real3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Real3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn length_of_pythagorean_triple() {
        let v = Real3::new(3.0, 4.0, 12.0);
        assert_eq!(v.length_sq(), 169.0);
        assert_eq!(v.length(), 13.0);
    }

    #[test]
    fn non_finite_detected() {
        assert!(Real3::splat(1.0).is_finite());
        assert!(!Real3::new(0.0, f64::NAN, 0.0).is_finite());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn real3() -> impl Strategy<Value = Real3> {
            (-1e3f64..1e3, -1e3f64..1e3, -1e3f64..1e3).prop_map(|(x, y, z)| Real3::new(x, y, z))
        }

        proptest! {
            #[test]
            fn add_then_sub_round_trips(a in real3(), b in real3()) {
                let back = (a + b) - b;
                prop_assert!((back - a).length() < 1e-9);
            }

            #[test]
            fn triangle_inequality(a in real3(), b in real3()) {
                prop_assert!((a + b).length() <= a.length() + b.length() + 1e-9);
            }

            #[test]
            fn scaling_scales_length(a in real3(), k in -10.0f64..10.0) {
                prop_assert!(((a * k).length() - k.abs() * a.length()).abs() < 1e-9 * (1.0 + a.length()));
            }
        }
    }
}
