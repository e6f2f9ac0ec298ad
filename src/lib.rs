//! # ellipsoidal
//!
//! Computational geodesy on ellipsoidal reference bodies.
//!
//! This crate provides the numeric core for working with positions on and
//! around an ellipsoid such as WGS84:
//!
//! - [`coordinates`]: Cartesian and geodetic position types
//! - [`algebra`]: small fixed-size matrices, quaternions, and
//!   heading-pitch-roll angles
//! - [`polynomial`]: numerically careful real-root solvers for quadratic,
//!   cubic, and quartic polynomials
//! - [`ellipsoid`]: the reference-body model and geodetic conversion
//! - [`intersections`]: ray, plane, and ellipsoid intersection queries
//! - [`geodesic`]: shortest surface paths via Vincenty's formulas
//! - [`frames`]: local east-north-up style frames anchored to the surface
//!
//! ## Example
//!
//! ```rust
//! use ellipsoidal::coordinates::Cartographic;
//! use ellipsoidal::ellipsoid::WGS84;
//!
//! let everest = Cartographic::from_degrees(86.925, 27.988, 8_848.0);
//! let cartesian = WGS84.cartographic_to_cartesian(&everest);
//! let back = WGS84.cartesian_to_cartographic(&cartesian);
//! assert!((back.height - 8_848.0).abs() < 1e-6);
//! ```
//!
//! ## Error handling
//!
//! Invalid arguments (negative radii, non-finite coordinates, a non-unit
//! plane normal, a degenerate axis pair) are reported through
//! [`GeodesyError`]. Degenerate geometry that a caller can reasonably
//! probe for, such as a ray that misses an ellipsoid, comes back as
//! `Option::None` or a documented sentinel value instead.

use thiserror::Error;

pub mod algebra;
pub mod constants;
pub mod coordinates;
pub mod ellipsoid;
pub mod frames;
pub mod geodesic;
pub mod intersections;
pub mod math;
pub mod polynomial;

pub use coordinates::{Cartesian3, Cartographic};
pub use ellipsoid::Ellipsoid;
pub use geodesic::EllipsoidGeodesic;

/// Errors arising from invalid arguments to geodesy operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeodesyError {
    /// Ellipsoid radii must be non-negative and finite
    #[error("invalid ellipsoid radii ({x}, {y}, {z}); radii must be non-negative and finite")]
    InvalidRadii { x: f64, y: f64, z: f64 },

    /// A plane normal must have unit magnitude
    #[error("plane normal has magnitude {magnitude}; expected a unit vector")]
    NonUnitNormal { magnitude: f64 },

    /// An input coordinate was NaN or infinite
    #[error("non-finite input to {operation}")]
    NonFiniteInput { operation: &'static str },

    /// Geodesics require an ellipsoid of revolution about the z axis
    #[error(
        "ellipsoid x radius {x_radius} differs from y radius {y_radius}; \
         geodesics require an ellipsoid of revolution"
    )]
    AsymmetricEllipsoid { x_radius: f64, y_radius: f64 },

    /// Local frame axes must be distinct and non-opposite
    #[error("axes {first:?} and {second:?} do not determine a frame")]
    InvalidAxisPair {
        first: frames::Axis,
        second: frames::Axis,
    },
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeodesyError>;
