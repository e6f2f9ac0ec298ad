//! Geodetic coordinate representation
//!
//! A [`Cartographic`] is a longitude/latitude/height triple relative to the
//! surface of a reference ellipsoid. Angles are stored in radians; height
//! is meters above (positive) or below (negative) the surface along the
//! geodetic normal.

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::math::equals_epsilon;

/// Geodetic longitude, latitude and height relative to an ellipsoid
///
/// Longitude is measured in radians from the prime meridian, positive east,
/// and stays in `(-π, π]` when produced by conversions in this crate.
/// Latitude is measured in radians from the equator, positive north, in
/// `[-π/2, π/2]`. Height is in meters along the geodetic surface normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartographic {
    /// Longitude in radians, positive east
    pub longitude: f64,
    /// Latitude in radians, positive north
    pub latitude: f64,
    /// Height in meters above the ellipsoid surface
    pub height: f64,
}

impl Cartographic {
    /// The degenerate position (0, 0, 0)
    pub const ZERO: Cartographic = Cartographic {
        longitude: 0.0,
        latitude: 0.0,
        height: 0.0,
    };

    /// Creates a position from radians
    pub const fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude,
            latitude,
            height,
        }
    }

    /// Creates a position from longitude and latitude in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::Cartographic;
    /// use std::f64::consts::PI;
    ///
    /// let position = Cartographic::from_degrees(90.0, 45.0, 100.0);
    /// assert!((position.longitude - PI / 2.0).abs() < 1e-15);
    /// assert!((position.latitude - PI / 4.0).abs() < 1e-15);
    /// ```
    pub fn from_degrees(longitude_degrees: f64, latitude_degrees: f64, height: f64) -> Self {
        Cartographic {
            longitude: longitude_degrees * DEG2RAD,
            latitude: latitude_degrees * DEG2RAD,
            height,
        }
    }

    /// Longitude in degrees
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude * RAD2DEG
    }

    /// Latitude in degrees
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude * RAD2DEG
    }

    /// Compares componentwise with a combined relative and absolute tolerance
    pub fn equals_epsilon(
        &self,
        other: &Cartographic,
        relative_epsilon: f64,
        absolute_epsilon: f64,
    ) -> bool {
        equals_epsilon(
            self.longitude,
            other.longitude,
            relative_epsilon,
            absolute_epsilon,
        ) && equals_epsilon(
            self.latitude,
            other.latitude,
            relative_epsilon,
            absolute_epsilon,
        ) && equals_epsilon(self.height, other.height, relative_epsilon, absolute_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_from_degrees() {
        let position = Cartographic::from_degrees(-180.0, -90.0, 0.0);
        assert_relative_eq!(position.longitude, -PI, epsilon = 1e-15);
        assert_relative_eq!(position.latitude, -PI / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_degree_accessors_round_trip() {
        let position = Cartographic::from_degrees(123.456, -54.321, 1000.0);
        assert_relative_eq!(position.longitude_degrees(), 123.456, epsilon = 1e-12);
        assert_relative_eq!(position.latitude_degrees(), -54.321, epsilon = 1e-12);
        assert_eq!(position.height, 1000.0);
    }

    #[test]
    fn test_equals_epsilon() {
        let a = Cartographic::new(1.0, 0.5, 100.0);
        let b = Cartographic::new(1.0 + 1e-15, 0.5, 100.0);
        assert!(a.equals_epsilon(&b, 1e-12, 1e-12));
        assert!(!a.equals_epsilon(&Cartographic::ZERO, 1e-12, 1e-12));
    }
}
