//! # Cartesian Coordinate Module
//!
//! This module provides the 3D Cartesian representation that serves as the
//! fundamental value type for every geometric computation in this crate.
//!
//! ## Coordinate System Convention
//!
//! Coordinates live in the right-handed body-fixed frame of a reference
//! ellipsoid:
//! - **X-axis**: Through the intersection of the prime meridian and equator
//! - **Y-axis**: Through 90° east longitude on the equator
//! - **Z-axis**: Through the north pole
//!
//! ## Internal Storage
//!
//! Coordinates are stored as three `f64` values maintaining full IEEE 754
//! double precision. Operations return fresh values; callers on hot paths
//! can reuse results freely since the type is `Copy`.
//!
//! ## Examples
//!
//! ```rust
//! use ellipsoidal::coordinates::Cartesian3;
//!
//! let x_axis = Cartesian3::UNIT_X;
//! let y_axis = Cartesian3::UNIT_Y;
//! assert_eq!(x_axis.dot(&y_axis), 0.0); // Perpendicular vectors
//! assert_eq!(x_axis.cross(&y_axis), Cartesian3::UNIT_Z);
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::math::equals_epsilon;

/// Three-dimensional Cartesian coordinate representation
///
/// Represents a point or direction in the right-handed body-fixed frame of
/// a reference ellipsoid. This struct is the building block for geodetic
/// conversion, intersection testing and local-frame construction.
///
/// # Unit Vectors vs Position Vectors
///
/// The type can represent both direction vectors (magnitude 1.0) and
/// position vectors carrying distance information; the interpretation
/// depends on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component
    pub x: f64,
    /// Y-component
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Cartesian3 {
    /// The zero vector (0, 0, 0)
    pub const ZERO: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit x axis (1, 0, 0)
    pub const UNIT_X: Cartesian3 = Cartesian3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit y axis (0, 1, 0)
    pub const UNIT_Y: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The unit z axis (0, 0, 1)
    pub const UNIT_Z: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new Cartesian coordinate
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Calculates the squared magnitude of the vector
    ///
    /// Cheaper than [`Cartesian3::magnitude`] when only comparisons are
    /// needed.
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Calculates the magnitude (length) of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::Cartesian3;
    ///
    /// let coord = Cartesian3::new(3.0, 4.0, 0.0);
    /// assert_eq!(coord.magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction
    ///
    /// The zero vector has no direction; normalizing it yields NaN
    /// components by design rather than an error. Callers that can receive
    /// the zero vector check for it explicitly first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::Cartesian3;
    ///
    /// let unit = Cartesian3::new(3.0, 4.0, 0.0).normalize();
    /// assert!((unit.magnitude() - 1.0).abs() < 1e-15);
    /// assert!(Cartesian3::ZERO.normalize().x.is_nan());
    /// ```
    pub fn normalize(&self) -> Cartesian3 {
        let mag = self.magnitude();
        Cartesian3 {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Calculates the dot product with another vector
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculates the cross product with another vector
    ///
    /// The result is perpendicular to both inputs following the right-hand
    /// rule.
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Multiplies componentwise with another vector
    ///
    /// Used heavily for scaling positions by per-axis ellipsoid radii.
    pub fn multiply_components(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Returns the componentwise absolute value
    pub fn abs(&self) -> Cartesian3 {
        Cartesian3 {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// Compares componentwise with a combined relative and absolute tolerance
    ///
    /// See [`crate::math::equals_epsilon`] for the comparison rule applied
    /// per component.
    pub fn equals_epsilon(
        &self,
        other: &Cartesian3,
        relative_epsilon: f64,
        absolute_epsilon: f64,
    ) -> bool {
        equals_epsilon(self.x, other.x, relative_epsilon, absolute_epsilon)
            && equals_epsilon(self.y, other.y, relative_epsilon, absolute_epsilon)
            && equals_epsilon(self.z, other.z, relative_epsilon, absolute_epsilon)
    }

    /// Returns the cardinal axis least aligned with this vector
    ///
    /// Used to seed construction of an orthonormal basis: crossing the
    /// returned axis with the input is guaranteed to be well conditioned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::Cartesian3;
    ///
    /// let v = Cartesian3::new(10.0, 0.1, 0.2);
    /// assert_eq!(v.most_orthogonal_axis(), Cartesian3::UNIT_Y);
    /// ```
    pub fn most_orthogonal_axis(&self) -> Cartesian3 {
        let f = self.abs().normalize();
        if f.x <= f.y {
            if f.x <= f.z {
                Cartesian3::UNIT_X
            } else {
                Cartesian3::UNIT_Z
            }
        } else if f.y <= f.z {
            Cartesian3::UNIT_Y
        } else {
            Cartesian3::UNIT_Z
        }
    }

    /// Projects this vector onto another
    ///
    /// Returns the component of `self` parallel to `other`.
    pub fn projection(&self, other: &Cartesian3) -> Cartesian3 {
        let scale = self.dot(other) / other.dot(other);
        *other * scale
    }

    /// Calculates angular distance to another vector in radians
    ///
    /// Both inputs are treated as directions from the origin. Returns a
    /// value in `[0, π]`, or 0 when either input is the zero vector.
    pub fn angular_distance(&self, other: &Cartesian3) -> f64 {
        let mag_product = self.magnitude() * other.magnitude();
        if mag_product == 0.0 {
            return 0.0;
        }
        let cos_angle = self.dot(other) / mag_product;
        // Handle numerical precision issues
        if cos_angle >= 1.0 {
            0.0
        } else if cos_angle <= -1.0 {
            std::f64::consts::PI
        } else {
            cos_angle.acos()
        }
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_creation_and_constants() {
        let coord = Cartesian3::new(1.0, 2.0, 3.0);
        assert_eq!(coord.x, 1.0);
        assert_eq!(coord.y, 2.0);
        assert_eq!(coord.z, 3.0);
        assert_eq!(Cartesian3::ZERO.magnitude(), 0.0);
        assert_eq!(Cartesian3::UNIT_X.magnitude(), 1.0);
    }

    #[test]
    fn test_magnitude() {
        let coord = Cartesian3::new(3.0, 4.0, 0.0);
        assert_eq!(coord.magnitude_squared(), 25.0);
        assert_eq!(coord.magnitude(), 5.0);
    }

    #[test]
    fn test_normalize() {
        let normalized = Cartesian3::new(3.0, 4.0, 0.0).normalize();
        assert_relative_eq!(normalized.magnitude(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(normalized.x, 0.6, epsilon = 1e-15);
        assert_relative_eq!(normalized.y, 0.8, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let normalized = Cartesian3::ZERO.normalize();
        assert!(normalized.x.is_nan());
        assert!(normalized.y.is_nan());
        assert!(normalized.z.is_nan());
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(Cartesian3::UNIT_X.dot(&Cartesian3::UNIT_Y), 0.0);
        let same_direction = Cartesian3::new(2.0, 0.0, 0.0);
        assert_eq!(Cartesian3::UNIT_X.dot(&same_direction), 2.0);
    }

    #[test]
    fn test_cross_product_right_handed() {
        assert_eq!(
            Cartesian3::UNIT_X.cross(&Cartesian3::UNIT_Y),
            Cartesian3::UNIT_Z
        );
        assert_eq!(
            Cartesian3::UNIT_Y.cross(&Cartesian3::UNIT_Z),
            Cartesian3::UNIT_X
        );
        assert_eq!(
            Cartesian3::UNIT_Z.cross(&Cartesian3::UNIT_X),
            Cartesian3::UNIT_Y
        );
    }

    #[test]
    fn test_multiply_components() {
        let a = Cartesian3::new(1.0, 2.0, 3.0);
        let b = Cartesian3::new(4.0, 5.0, 6.0);
        assert_eq!(a.multiply_components(&b), Cartesian3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_abs_and_negate() {
        let a = Cartesian3::new(-1.0, 2.0, -3.0);
        assert_eq!(a.abs(), Cartesian3::new(1.0, 2.0, 3.0));
        assert_eq!(-a, Cartesian3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_equals_epsilon() {
        let a = Cartesian3::new(1.0, 1.0, 1.0);
        let b = Cartesian3::new(1.0 + 1e-15, 1.0, 1.0 - 1e-15);
        assert!(a.equals_epsilon(&b, 1e-12, 1e-12));
        assert!(!a.equals_epsilon(&Cartesian3::new(1.1, 1.0, 1.0), 1e-12, 1e-12));
    }

    #[test]
    fn test_most_orthogonal_axis() {
        assert_eq!(
            Cartesian3::new(10.0, 1.0, 2.0).most_orthogonal_axis(),
            Cartesian3::UNIT_Y
        );
        assert_eq!(
            Cartesian3::new(1.0, 10.0, 2.0).most_orthogonal_axis(),
            Cartesian3::UNIT_X
        );
        assert_eq!(
            Cartesian3::new(1.0, 2.0, 10.0).most_orthogonal_axis(),
            Cartesian3::UNIT_X
        );
    }

    #[test]
    fn test_projection() {
        let a = Cartesian3::new(3.0, 4.0, 0.0);
        let onto_x = a.projection(&Cartesian3::new(2.0, 0.0, 0.0));
        assert_eq!(onto_x, Cartesian3::new(3.0, 0.0, 0.0));
        // Projection onto itself is identity
        let onto_self = a.projection(&a);
        assert!(onto_self.equals_epsilon(&a, 1e-14, 1e-14));
    }

    #[test]
    fn test_arithmetic_operations() {
        let a = Cartesian3::new(1.0, 2.0, 3.0);
        let b = Cartesian3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Cartesian3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Cartesian3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Cartesian3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Cartesian3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_vector3_round_trip() {
        let coord = Cartesian3::new(1.0, 2.0, 3.0);
        let vec = coord.to_vector3();
        assert_eq!(Cartesian3::from_vector3(vec), coord);
    }

    #[test]
    fn test_cross_matches_nalgebra() {
        let a = Cartesian3::new(1.5, -2.25, 0.75);
        let b = Cartesian3::new(-0.5, 4.0, 2.0);
        let ours = a.cross(&b);
        let theirs = Cartesian3::from_vector3(a.to_vector3().cross(&b.to_vector3()));
        assert!(ours.equals_epsilon(&theirs, 1e-15, 1e-15));
    }

    #[test]
    fn test_angular_distance() {
        use std::f64::consts::PI;
        assert_relative_eq!(
            Cartesian3::UNIT_X.angular_distance(&Cartesian3::UNIT_Y),
            PI / 2.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            Cartesian3::UNIT_X.angular_distance(&-Cartesian3::UNIT_X),
            PI,
            epsilon = 1e-15
        );
    }
}
