//! Constants module for ellipsoidal geometry and geodesy calculations

use std::f64::consts::PI;

// Tolerances
//
// The epsilon ladder mirrors the magnitudes the numerical routines in this
// crate branch on. Each constant is 10^-n for the n in its name.
/// 1e-1, used as the squared center tolerance of an ellipsoid
pub const EPSILON1: f64 = 1.0e-1;
/// 1e-9, round-trip tolerance for geodetic conversion
pub const EPSILON9: f64 = 1.0e-9;
/// 1e-12, residual tolerance for Newton and Vincenty iterations
pub const EPSILON12: f64 = 1.0e-12;
/// 1e-14, cancellation tolerance for polynomial root finding
pub const EPSILON14: f64 = 1.0e-14;
/// 1e-15, near-parallel and vanishing-coefficient tolerance
pub const EPSILON15: f64 = 1.0e-15;

// Angles
/// Tau (2*PI) for full circle
pub const TWO_PI: f64 = 2.0 * PI;
/// Half pi
pub const PI_OVER_TWO: f64 = PI / 2.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Reference body radii
/// WGS84 semi-major axis (equatorial radius) in meters
pub const WGS84_RADII_X: f64 = 6_378_137.0;
/// WGS84 equatorial radius along the y axis in meters
pub const WGS84_RADII_Y: f64 = 6_378_137.0;
/// WGS84 semi-minor axis (polar radius) in meters
pub const WGS84_RADII_Z: f64 = 6_356_752.314_245_179_3;
/// Mean lunar radius in meters
pub const LUNAR_RADIUS: f64 = 1_737_400.0;
