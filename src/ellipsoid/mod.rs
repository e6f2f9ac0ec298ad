//! Ellipsoidal reference-body model and geodetic conversion
//!
//! An [`Ellipsoid`] is the quadric surface `(x/a)^2 + (y/b)^2 + (z/c)^2 = 1`
//! modeling the shape of a planetary body. Alongside the three radii it
//! caches every derived quantity the conversion and intersection routines
//! need, so those stay multiplication-only on their hot paths.
//!
//! The named reference bodies ([`WGS84`], [`UNIT_SPHERE`], [`MOON`]) are
//! shared read-only singletons; construct an owned [`Ellipsoid`] when a
//! call site needs the in-place [`Ellipsoid::reinitialize`] path.

use once_cell::sync::Lazy;

use crate::constants::{
    EPSILON1, EPSILON12, EPSILON14, LUNAR_RADIUS, WGS84_RADII_X, WGS84_RADII_Y, WGS84_RADII_Z,
};
use crate::coordinates::{Cartesian3, Cartographic};
use crate::math::sign;
use crate::{GeodesyError, Result};

/// Iteration cap for the surface-projection Newton loop. The loop
/// converges in a handful of steps for any well-conditioned ellipsoid;
/// hitting the cap indicates a defect and is logged.
const SURFACE_PROJECTION_MAX_ITERATIONS: usize = 32;

/// The WGS84 reference ellipsoid
pub static WGS84: Lazy<Ellipsoid> = Lazy::new(|| {
    Ellipsoid::new(WGS84_RADII_X, WGS84_RADII_Y, WGS84_RADII_Z)
        .expect("WGS84 radii are valid")
});

/// A sphere with radius 1
pub static UNIT_SPHERE: Lazy<Ellipsoid> =
    Lazy::new(|| Ellipsoid::new(1.0, 1.0, 1.0).expect("unit radii are valid"));

/// A sphere with the mean lunar radius
pub static MOON: Lazy<Ellipsoid> = Lazy::new(|| {
    Ellipsoid::new(LUNAR_RADIUS, LUNAR_RADIUS, LUNAR_RADIUS).expect("lunar radii are valid")
});

/// A quadric reference-body surface with cached derived fields
///
/// All derived fields are recomputed together whenever the radii change,
/// either at construction or through [`Ellipsoid::reinitialize`]; they are
/// never updated piecemeal, so they are always consistent with the current
/// radii. Fields are private to protect that invariant.
///
/// Radii must be non-negative and finite; a zero radius is a permitted
/// degenerate axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: Cartesian3,
    radii_squared: Cartesian3,
    radii_to_the_fourth: Cartesian3,
    one_over_radii: Cartesian3,
    one_over_radii_squared: Cartesian3,
    minimum_radius: f64,
    maximum_radius: f64,
    center_tolerance_squared: f64,
    squared_x_over_squared_z: f64,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its three radii in meters
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::InvalidRadii`] when any radius is negative
    /// or non-finite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) || x < 0.0 || y < 0.0 || z < 0.0 {
            return Err(GeodesyError::InvalidRadii { x, y, z });
        }

        let radii = Cartesian3::new(x, y, z);
        let radii_squared = Cartesian3::new(x * x, y * y, z * z);
        let radii_to_the_fourth = radii_squared.multiply_components(&radii_squared);
        let reciprocal = |radius: f64| if radius == 0.0 { 0.0 } else { 1.0 / radius };
        let one_over_radii = Cartesian3::new(reciprocal(x), reciprocal(y), reciprocal(z));
        let one_over_radii_squared = Cartesian3::new(
            reciprocal(x * x),
            reciprocal(y * y),
            reciprocal(z * z),
        );

        Ok(Ellipsoid {
            radii,
            radii_squared,
            radii_to_the_fourth,
            one_over_radii,
            one_over_radii_squared,
            minimum_radius: x.min(y).min(z),
            maximum_radius: x.max(y).max(z),
            center_tolerance_squared: EPSILON1,
            squared_x_over_squared_z: radii_squared.x / radii_squared.z,
        })
    }

    /// Creates an ellipsoid from radii packed in a vector
    pub fn from_radii(radii: &Cartesian3) -> Result<Self> {
        Ellipsoid::new(radii.x, radii.y, radii.z)
    }

    /// Replaces the radii in place, recomputing every derived field
    ///
    /// The whole derived state is rebuilt atomically: on error the
    /// ellipsoid is left unchanged. Never call this on a shared instance
    /// without external synchronization; the named singletons cannot reach
    /// this path at all since they are never handed out mutably.
    pub fn reinitialize(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        *self = Ellipsoid::new(x, y, z)?;
        Ok(())
    }

    /// The radii in meters
    pub fn radii(&self) -> Cartesian3 {
        self.radii
    }

    /// The squared radii
    pub fn radii_squared(&self) -> Cartesian3 {
        self.radii_squared
    }

    /// The radii raised to the fourth power
    pub fn radii_to_the_fourth(&self) -> Cartesian3 {
        self.radii_to_the_fourth
    }

    /// The reciprocal radii (zero for a degenerate axis)
    pub fn one_over_radii(&self) -> Cartesian3 {
        self.one_over_radii
    }

    /// The reciprocal squared radii (zero for a degenerate axis)
    pub fn one_over_radii_squared(&self) -> Cartesian3 {
        self.one_over_radii_squared
    }

    /// The smallest radius
    pub fn minimum_radius(&self) -> f64 {
        self.minimum_radius
    }

    /// The largest radius
    pub fn maximum_radius(&self) -> f64 {
        self.maximum_radius
    }

    /// Squared distance below which a position counts as the center
    pub fn center_tolerance_squared(&self) -> f64 {
        self.center_tolerance_squared
    }

    /// The ratio of the squared x radius to the squared z radius
    pub fn squared_x_over_squared_z(&self) -> f64 {
        self.squared_x_over_squared_z
    }

    /// Scales a position into the space where the ellipsoid is a unit sphere
    pub fn transform_position_to_scaled_space(&self, position: &Cartesian3) -> Cartesian3 {
        position.multiply_components(&self.one_over_radii)
    }

    /// Scales a position back from unit-sphere space
    pub fn transform_position_from_scaled_space(&self, position: &Cartesian3) -> Cartesian3 {
        position.multiply_components(&self.radii)
    }

    /// Outward geodetic surface normal at a Cartesian position
    ///
    /// The normal direction is the gradient of the implicit surface
    /// equation. Positions within epsilon of the center have no meaningful
    /// normal; the zero vector is returned for them (documented, not an
    /// error).
    pub fn geodetic_surface_normal(&self, position: &Cartesian3) -> Cartesian3 {
        if position.equals_epsilon(&Cartesian3::ZERO, 0.0, EPSILON14) {
            return Cartesian3::ZERO;
        }
        position
            .multiply_components(&self.one_over_radii_squared)
            .normalize()
    }

    /// Outward geodetic surface normal at a geodetic position
    pub fn geodetic_surface_normal_cartographic(&self, position: &Cartographic) -> Cartesian3 {
        let cos_latitude = position.latitude.cos();
        Cartesian3::new(
            cos_latitude * position.longitude.cos(),
            cos_latitude * position.longitude.sin(),
            position.latitude.sin(),
        )
        .normalize()
    }

    /// Projects a position onto the surface along the geocentric radial
    ///
    /// Simple radial scaling; compare [`Ellipsoid::scale_to_geodetic_surface`].
    pub fn scale_to_geocentric_surface(&self, position: &Cartesian3) -> Cartesian3 {
        let beta = 1.0
            / (position.x * position.x * self.one_over_radii_squared.x
                + position.y * position.y * self.one_over_radii_squared.y
                + position.z * position.z * self.one_over_radii_squared.z)
                .sqrt();
        *position * beta
    }

    /// Projects a position onto the surface along the ellipsoid's
    /// radial-scaling direction
    ///
    /// This is the projection geodetic conversion is built on, not the
    /// Euclidean-nearest surface point (which has no closed form). The
    /// initial guess scales the position onto the surface radially; unless
    /// the position is within the center tolerance, Newton-Raphson then
    /// iterates a per-axis correction factor lambda until the implicit
    /// surface-equation residual is below 1e-12.
    ///
    /// Returns `None` when the position is so close to the center that the
    /// scaling ratio is non-finite (e.g. the exact origin).
    pub fn scale_to_geodetic_surface(&self, position: &Cartesian3) -> Option<Cartesian3> {
        let x2 = position.x * position.x * self.one_over_radii.x * self.one_over_radii.x;
        let y2 = position.y * position.y * self.one_over_radii.y * self.one_over_radii.y;
        let z2 = position.z * position.z * self.one_over_radii.z * self.one_over_radii.z;

        // Compute the squared ellipsoid norm.
        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();

        // When very close to the center the iteration is not well behaved;
        // the radial guess is the documented answer there.
        let intersection = *position * ratio;
        if squared_norm < self.center_tolerance_squared {
            return if ratio.is_finite() {
                Some(intersection)
            } else {
                None
            };
        }

        let one_over_radii_squared_x = self.one_over_radii_squared.x;
        let one_over_radii_squared_y = self.one_over_radii_squared.y;
        let one_over_radii_squared_z = self.one_over_radii_squared.z;

        // The gradient at the intersection point, scaled by an overall
        // factor of 2 that cancels in the lambda seed below.
        let gradient = Cartesian3::new(
            intersection.x * one_over_radii_squared_x * 2.0,
            intersection.y * one_over_radii_squared_y * 2.0,
            intersection.z * one_over_radii_squared_z * 2.0,
        );

        // Seed lambda with the distance to the radial intersection scaled
        // by the gradient magnitude.
        let mut lambda = (1.0 - ratio) * position.magnitude() / (0.5 * gradient.magnitude());
        let mut correction = 0.0;

        let mut x_multiplier;
        let mut y_multiplier;
        let mut z_multiplier;
        let mut residual;

        let mut iterations = 0;
        loop {
            lambda -= correction;

            x_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared_x);
            y_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared_y);
            z_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared_z);

            let x_multiplier2 = x_multiplier * x_multiplier;
            let y_multiplier2 = y_multiplier * y_multiplier;
            let z_multiplier2 = z_multiplier * z_multiplier;

            let x_multiplier3 = x_multiplier2 * x_multiplier;
            let y_multiplier3 = y_multiplier2 * y_multiplier;
            let z_multiplier3 = z_multiplier2 * z_multiplier;

            residual = x2 * x_multiplier2 + y2 * y_multiplier2 + z2 * z_multiplier2 - 1.0;

            // The derivative of the residual with respect to lambda.
            let denominator = x2 * x_multiplier3 * one_over_radii_squared_x
                + y2 * y_multiplier3 * one_over_radii_squared_y
                + z2 * z_multiplier3 * one_over_radii_squared_z;
            let derivative = -2.0 * denominator;

            correction = residual / derivative;

            iterations += 1;
            if residual.abs() <= EPSILON12 {
                break;
            }
            if iterations >= SURFACE_PROJECTION_MAX_ITERATIONS {
                log::warn!(
                    "scale_to_geodetic_surface hit the iteration cap with residual {residual:e}; \
                     returning the last iterate"
                );
                break;
            }
        }

        Some(Cartesian3::new(
            position.x * x_multiplier,
            position.y * y_multiplier,
            position.z * z_multiplier,
        ))
    }

    /// Converts a geodetic position to body-fixed Cartesian coordinates
    ///
    /// The surface point is the unit geodetic normal scaled componentwise
    /// by the squared radii and renormalized by `sqrt(n . (radii^2 * n))`,
    /// which lands exactly on the surface; the height then extrudes along
    /// the normal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::{Cartesian3, Cartographic};
    /// use ellipsoidal::ellipsoid::Ellipsoid;
    ///
    /// let ellipsoid = Ellipsoid::new(2.0, 2.0, 1.0).unwrap();
    /// let position = ellipsoid.cartographic_to_cartesian(&Cartographic::ZERO);
    /// assert!(position.equals_epsilon(&Cartesian3::new(2.0, 0.0, 0.0), 1e-14, 1e-14));
    /// ```
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> Cartesian3 {
        let n = self.geodetic_surface_normal_cartographic(cartographic);
        let k = self.radii_squared.multiply_components(&n);
        let gamma = n.dot(&k).sqrt();
        let surface_point = k / gamma;
        surface_point + n * cartographic.height
    }

    /// Converts a body-fixed Cartesian position to geodetic coordinates
    ///
    /// Longitude lands in `(-π, π]`, latitude in `[-π/2, π/2]`, and height
    /// is signed along the surface normal. When the surface projection
    /// fails (position at the ellipsoid center), the degenerate
    /// `Cartographic::ZERO` is returned.
    pub fn cartesian_to_cartographic(&self, cartesian: &Cartesian3) -> Cartographic {
        let surface_point = match self.scale_to_geodetic_surface(cartesian) {
            Some(point) => point,
            None => return Cartographic::ZERO,
        };
        let normal = self.geodetic_surface_normal(&surface_point);
        let height_vector = *cartesian - surface_point;

        Cartographic {
            longitude: normal.y.atan2(normal.x),
            latitude: normal.z.asin(),
            height: sign(height_vector.dot(cartesian)) * height_vector.magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EPSILON9;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn test_new_rejects_invalid_radii() {
        assert!(Ellipsoid::new(-1.0, 1.0, 1.0).is_err());
        assert!(Ellipsoid::new(1.0, f64::NAN, 1.0).is_err());
        assert!(Ellipsoid::new(1.0, 1.0, f64::INFINITY).is_err());
        // Zero is a permitted degenerate axis.
        assert!(Ellipsoid::new(1.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_derived_fields() {
        let ellipsoid = Ellipsoid::new(2.0, 3.0, 4.0).unwrap();
        assert_eq!(ellipsoid.radii_squared(), Cartesian3::new(4.0, 9.0, 16.0));
        assert_eq!(
            ellipsoid.radii_to_the_fourth(),
            Cartesian3::new(16.0, 81.0, 256.0)
        );
        assert_eq!(
            ellipsoid.one_over_radii(),
            Cartesian3::new(0.5, 1.0 / 3.0, 0.25)
        );
        assert_eq!(ellipsoid.minimum_radius(), 2.0);
        assert_eq!(ellipsoid.maximum_radius(), 4.0);
        assert_relative_eq!(
            ellipsoid.squared_x_over_squared_z(),
            4.0 / 16.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_reinitialize_recomputes_all_derived_fields() {
        let mut ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0).unwrap();
        ellipsoid.reinitialize(2.0, 2.0, 2.0).unwrap();
        assert_eq!(ellipsoid, Ellipsoid::new(2.0, 2.0, 2.0).unwrap());

        // A failed reinitialize leaves the value untouched.
        assert!(ellipsoid.reinitialize(-1.0, 2.0, 2.0).is_err());
        assert_eq!(ellipsoid, Ellipsoid::new(2.0, 2.0, 2.0).unwrap());
    }

    #[test]
    fn test_named_singletons() {
        assert_eq!(WGS84.maximum_radius(), 6_378_137.0);
        assert_relative_eq!(WGS84.minimum_radius(), 6_356_752.314_245_179_3);
        assert_eq!(UNIT_SPHERE.radii(), Cartesian3::new(1.0, 1.0, 1.0));
        assert_eq!(MOON.radii().x, MOON.radii().z);
    }

    #[test]
    fn test_geodetic_surface_normal_sphere() {
        let normal = UNIT_SPHERE.geodetic_surface_normal(&Cartesian3::new(0.0, 0.0, 2.0));
        assert!(normal.equals_epsilon(&Cartesian3::UNIT_Z, 1e-14, 1e-14));
    }

    #[test]
    fn test_geodetic_surface_normal_at_center_is_zero() {
        let normal = WGS84.geodetic_surface_normal(&Cartesian3::ZERO);
        assert_eq!(normal, Cartesian3::ZERO);
    }

    #[test]
    fn test_scaled_space_round_trip() {
        let ellipsoid = Ellipsoid::new(2.0, 3.0, 4.0).unwrap();
        let position = Cartesian3::new(5.0, -6.0, 7.0);
        let scaled = ellipsoid.transform_position_to_scaled_space(&position);
        let back = ellipsoid.transform_position_from_scaled_space(&scaled);
        assert!(back.equals_epsilon(&position, 1e-14, 1e-14));
    }

    #[rstest]
    #[case(Cartesian3::new(9.0, 0.0, 0.0))]
    #[case(Cartesian3::new(0.5, 0.5, 0.5))]
    #[case(Cartesian3::new(-4.0, 2.0, 7.0))]
    fn test_scale_to_geodetic_surface_lands_on_surface(#[case] position: Cartesian3) {
        let ellipsoid = Ellipsoid::new(2.0, 2.0, 1.0).unwrap();
        let surface = ellipsoid.scale_to_geodetic_surface(&position).unwrap();
        let norm = surface
            .multiply_components(&ellipsoid.one_over_radii())
            .magnitude_squared();
        assert_relative_eq!(norm, 1.0, epsilon = EPSILON9);
    }

    #[test]
    fn test_scale_to_geodetic_surface_at_origin_is_none() {
        assert!(WGS84.scale_to_geodetic_surface(&Cartesian3::ZERO).is_none());
    }

    #[test]
    fn test_scale_to_geocentric_surface() {
        let surface = UNIT_SPHERE.scale_to_geocentric_surface(&Cartesian3::new(0.5, 0.0, 0.0));
        assert!(surface.equals_epsilon(&Cartesian3::UNIT_X, 1e-14, 1e-14));
    }

    #[test]
    fn test_cartographic_to_cartesian_equator() {
        // Scenario: ellipsoid (2, 2, 1), the origin of geodetic
        // coordinates maps to (2, 0, 0) and back.
        let ellipsoid = Ellipsoid::new(2.0, 2.0, 1.0).unwrap();
        let cartesian = ellipsoid.cartographic_to_cartesian(&Cartographic::ZERO);
        assert!(cartesian.equals_epsilon(&Cartesian3::new(2.0, 0.0, 0.0), 1e-12, 1e-12));

        let back = ellipsoid.cartesian_to_cartographic(&Cartesian3::new(2.0, 0.0, 0.0));
        assert!(back.equals_epsilon(&Cartographic::ZERO, 1e-12, 1e-12));
    }

    #[test]
    fn test_cartesian_to_cartographic_center_is_degenerate_zero() {
        let result = WGS84.cartesian_to_cartographic(&Cartesian3::ZERO);
        assert_eq!(result, Cartographic::ZERO);
    }

    #[rstest]
    #[case(Cartographic::from_degrees(0.0, 0.0, 0.0))]
    #[case(Cartographic::from_degrees(45.0, 30.0, 1000.0))]
    #[case(Cartographic::from_degrees(-120.0, -60.0, 250_000.0))]
    #[case(Cartographic::from_degrees(179.9, 89.0, -500.0))]
    #[case(Cartographic::from_degrees(-179.9, -89.0, 10.0))]
    fn test_round_trip_wgs84(#[case] cartographic: Cartographic) {
        let cartesian = WGS84.cartographic_to_cartesian(&cartographic);
        let round_trip = WGS84.cartesian_to_cartographic(&cartesian);
        assert_relative_eq!(
            round_trip.longitude,
            cartographic.longitude,
            epsilon = EPSILON9
        );
        assert_relative_eq!(round_trip.latitude, cartographic.latitude, epsilon = EPSILON9);
        // Height tolerance is absolute meters at WGS84 scale.
        assert!((round_trip.height - cartographic.height).abs() < 1e-6);
    }

    #[test]
    fn test_surface_normal_orthogonal_to_tangents() {
        let cartographic = Cartographic::from_degrees(30.0, 40.0, 0.0);
        let surface = WGS84.cartographic_to_cartesian(&cartographic);
        let normal = WGS84.geodetic_surface_normal(&surface);

        let delta = 1e-7;
        let east = WGS84.cartographic_to_cartesian(&Cartographic::new(
            cartographic.longitude + delta,
            cartographic.latitude,
            0.0,
        )) - surface;
        let north = WGS84.cartographic_to_cartesian(&Cartographic::new(
            cartographic.longitude,
            cartographic.latitude + delta,
            0.0,
        )) - surface;

        assert!(normal.dot(&east.normalize()).abs() < 1e-6);
        assert!(normal.dot(&north.normalize()).abs() < 1e-6);
    }

    #[test]
    fn test_height_sign_below_surface() {
        let below = WGS84.cartesian_to_cartographic(&Cartesian3::new(6_000_000.0, 0.0, 0.0));
        assert!(below.height < 0.0);
        assert_relative_eq!(below.longitude, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_range() {
        // A point just south of the antimeridian keeps longitude in (-pi, pi].
        let cartographic = Cartographic::from_degrees(180.0, 10.0, 0.0);
        let cartesian = WGS84.cartographic_to_cartesian(&cartographic);
        let back = WGS84.cartesian_to_cartographic(&cartesian);
        assert!(back.longitude > -PI && back.longitude <= PI);
    }
}
