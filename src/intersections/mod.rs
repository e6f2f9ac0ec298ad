//! Ray, plane, and ellipsoid intersection tests
//!
//! Geometric queries used by visibility and picking code:
//!
//! - [`ray_plane`] intersects a ray with an infinite plane.
//! - [`ray_ellipsoid`] returns the parametric interval over which a ray is
//!   inside an ellipsoid.
//! - [`quadratic_vector_expression`] solves a quadric restricted to a
//!   circle, the workhorse behind horizon finding.
//! - [`grazing_altitude_location`] finds the point along a ray's horizon
//!   line closest to an ellipsoid's surface.
//!
//! Rays are parametrized as `origin + t * direction` with `t >= 0`.
//! Degenerate geometry (parallel ray and plane, a ray that misses) is
//! reported as `None` rather than as an error; errors are reserved for
//! invalid arguments such as a non-unit plane normal.

use crate::algebra::Matrix3;
use crate::constants::{EPSILON12, EPSILON15};
use crate::coordinates::Cartesian3;
use crate::ellipsoid::Ellipsoid;
use crate::math::{clamp, equals_epsilon};
use crate::polynomial::{add_with_cancellation_check, quadratic_real_roots, quartic_real_roots};
use crate::{GeodesyError, Result};

/// A ray with an origin and a (not necessarily unit) direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Cartesian3,
    pub direction: Cartesian3,
}

impl Ray {
    pub fn new(origin: Cartesian3, direction: Cartesian3) -> Self {
        Ray { origin, direction }
    }

    /// The point at parameter `t` along the ray
    pub fn point_along(&self, t: f64) -> Cartesian3 {
        self.origin + self.direction * t
    }
}

/// A plane in Hessian normal form, `normal . p + distance = 0`
///
/// The signed `distance` is the plane's offset from the origin along the
/// normal: negative when the origin is on the normal side of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Cartesian3,
    distance: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and signed origin distance
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::NonUnitNormal`] when the normal's magnitude
    /// is not 1 within a small tolerance.
    pub fn new(normal: Cartesian3, distance: f64) -> Result<Self> {
        if !equals_epsilon(normal.magnitude(), 1.0, 0.0, EPSILON12) {
            return Err(GeodesyError::NonUnitNormal {
                magnitude: normal.magnitude(),
            });
        }
        Ok(Plane { normal, distance })
    }

    /// Creates the plane through `point` with the given unit normal
    pub fn from_point_normal(point: &Cartesian3, normal: Cartesian3) -> Result<Self> {
        Plane::new(normal, -normal.dot(point))
    }

    pub fn normal(&self) -> Cartesian3 {
        self.normal
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Signed distance from a point to the plane, positive on the normal side
    pub fn signed_distance_to(&self, point: &Cartesian3) -> f64 {
        self.normal.dot(point) + self.distance
    }
}

/// A closed interval of ray parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub stop: f64,
}

impl Interval {
    pub fn new(start: f64, stop: f64) -> Self {
        Interval { start, stop }
    }
}

/// Intersects a ray with a plane
///
/// Returns `None` when the ray is parallel to the plane (including a ray
/// lying in the plane) or when the intersection lies behind the origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<Cartesian3> {
    let denominator = plane.normal.dot(&ray.direction);
    if denominator.abs() < EPSILON15 {
        return None;
    }

    let t = (-plane.distance - plane.normal.dot(&ray.origin)) / denominator;
    if t < 0.0 {
        return None;
    }
    Some(ray.point_along(t))
}

/// Intersects a ray with an ellipsoid
///
/// Returns the interval of ray parameters inside the ellipsoid, or `None`
/// when the ray misses. A tangent ray yields a zero-width interval. When
/// the origin is inside, the interval starts at zero; the entry point
/// behind the origin is not reported.
///
/// # Examples
///
/// ```rust
/// use ellipsoidal::coordinates::Cartesian3;
/// use ellipsoidal::ellipsoid::UNIT_SPHERE;
/// use ellipsoidal::intersections::{ray_ellipsoid, Ray};
///
/// let ray = Ray::new(Cartesian3::new(-2.0, 0.0, 0.0), Cartesian3::UNIT_X);
/// let hit = ray_ellipsoid(&ray, &UNIT_SPHERE).unwrap();
/// assert_eq!((hit.start, hit.stop), (1.0, 3.0));
/// ```
pub fn ray_ellipsoid(ray: &Ray, ellipsoid: &Ellipsoid) -> Option<Interval> {
    let inverse_radii = ellipsoid.one_over_radii();
    let q = inverse_radii.multiply_components(&ray.origin);
    let w = inverse_radii.multiply_components(&ray.direction);

    let q2 = q.magnitude_squared();
    let qw = q.dot(&w);

    if q2 > 1.0 {
        // Outside the ellipsoid.
        if qw >= 0.0 {
            // Looking outward or tangent along the surface.
            return None;
        }

        // qw < 0: looking inward.
        let qw2 = qw * qw;
        let difference = q2 - 1.0;
        let w2 = w.magnitude_squared();
        let product = w2 * difference;

        if qw2 < product {
            // Ray aimed inward but misses.
            return None;
        }
        if qw2 > product {
            // Two distinct intersections.
            let discriminant = qw * qw - product;
            let temp = -qw + discriminant.sqrt();
            let root0 = temp / w2;
            let root1 = difference / temp;
            if root0 < root1 {
                return Some(Interval::new(root0, root1));
            }
            return Some(Interval::new(root1, root0));
        }
        // qw2 == product: tangent, one repeated root.
        let root = (difference / w2).sqrt();
        return Some(Interval::new(root, root));
    }

    if q2 < 1.0 {
        // Inside the ellipsoid: exactly one exit crossing ahead.
        let difference = q2 - 1.0;
        let w2 = w.magnitude_squared();
        let product = w2 * difference;
        let discriminant = qw * qw - product;
        let temp = -qw + discriminant.sqrt();
        return Some(Interval::new(0.0, temp / w2));
    }

    // q2 == 1.0: on the surface.
    if qw < 0.0 {
        // Heading inward.
        let w2 = w.magnitude_squared();
        return Some(Interval::new(0.0, -qw / w2));
    }
    // Heading outward.
    None
}

/// Tolerance used to decide the sign of the left-hand factor when pairing
/// a cosine root with its sine
const SINE_SIGN_TOLERANCE: f64 = EPSILON12;

/// Solves `x^T A x + b . x + c = 0` restricted to the circle
/// `x.y^2 + x.z^2 = w^2`, `x.x = z`
///
/// Substituting `x = (z, w cos t, w sin t)` reduces the quadric to a
/// quartic in `cos t`. Each cosine root admits two candidate sines; the
/// sign of the product of the factored left and right hand sides selects
/// the consistent one, and both are kept when the product vanishes with a
/// nonzero sine.
pub fn quadratic_vector_expression(
    a: &Matrix3,
    b: &Cartesian3,
    c: f64,
    z: f64,
    w: f64,
) -> Vec<Cartesian3> {
    let w_squared = w * w;

    let l2 = (a.get(1, 1) - a.get(2, 2)) * w_squared;
    let l1 = w
        * (z * add_with_cancellation_check(a.get(0, 1), a.get(1, 0), EPSILON15) + b.y);
    let l0 = a.get(0, 0) * z * z + a.get(2, 2) * w_squared + z * b.x + c;

    let r1 = w_squared * add_with_cancellation_check(a.get(1, 2), a.get(2, 1), EPSILON15);
    let r0 = w * (z * add_with_cancellation_check(a.get(0, 2), a.get(2, 0), EPSILON15) + b.z);

    let mut solutions = Vec::new();

    if r0 == 0.0 && r1 == 0.0 {
        // The sine terms vanish identically; solve the quadratic in cosine
        // and admit both sines for each root.
        let cosines = quadratic_real_roots(l2, l1, l0);
        if cosines.is_empty() {
            return solutions;
        }

        let cosine0 = cosines[0];
        let sine0 = (1.0 - cosine0 * cosine0).max(0.0).sqrt();
        solutions.push(Cartesian3::new(z, w * cosine0, w * sine0));
        solutions.push(Cartesian3::new(z, w * cosine0, -w * sine0));

        if cosines.len() == 2 && cosines[1] != cosine0 {
            let cosine1 = cosines[1];
            let sine1 = (1.0 - cosine1 * cosine1).max(0.0).sqrt();
            solutions.push(Cartesian3::new(z, w * cosine1, w * sine1));
            solutions.push(Cartesian3::new(z, w * cosine1, -w * sine1));
        }
        return solutions;
    }

    let r0_squared = r0 * r0;
    let r1_squared = r1 * r1;
    let l2_squared = l2 * l2;
    let r0r1 = r0 * r1;

    let c4 = l2_squared + r1_squared;
    let c3 = 2.0 * (l1 * l2 + r0r1);
    let c2 = 2.0 * l0 * l2 + l1 * l1 - r1_squared + r0_squared;
    let c1 = 2.0 * (l0 * l1 - r0r1);
    let c0 = l0 * l0 - r0_squared;

    if c4 == 0.0 && c3 == 0.0 && c2 == 0.0 && c1 == 0.0 && c0 == 0.0 {
        return solutions;
    }

    for cosine in quartic_real_roots(c4, c3, c2, c1, c0) {
        let cosine = clamp(cosine, -1.0, 1.0);
        let sine = (1.0 - cosine * cosine).max(0.0).sqrt();

        // Group the left-hand factor's terms by sign before summing, so
        // cancellation between near-equal terms clamps to zero instead of
        // leaving noise that flips the product's sign.
        let left = add_with_cancellation_check(
            l2 * cosine * cosine,
            add_with_cancellation_check(l1 * cosine, l0, SINE_SIGN_TOLERANCE),
            SINE_SIGN_TOLERANCE,
        );
        let right = add_with_cancellation_check(r1 * cosine, r0, EPSILON15);

        let product = left * right;
        if product < 0.0 {
            solutions.push(Cartesian3::new(z, w * cosine, w * sine));
        } else if product > 0.0 {
            solutions.push(Cartesian3::new(z, w * cosine, -w * sine));
        } else if sine != 0.0 {
            // Either sine satisfies the equation.
            solutions.push(Cartesian3::new(z, w * cosine, w * sine));
            solutions.push(Cartesian3::new(z, w * cosine, -w * sine));
        } else {
            solutions.push(Cartesian3::new(z, w * cosine, w * sine));
        }
    }

    solutions
}

/// Finds the point along a ray's horizon closest to an ellipsoid's surface
///
/// For a ray that grazes past an ellipsoid, this locates the position on
/// the surface nearest the ray and returns it as a surface point whose
/// height records the signed grazing altitude (negative when the ray
/// actually intersects the ellipsoid). Returns the ray origin when the
/// ray points away from the ellipsoid, and `None` when no horizon point
/// exists.
pub fn grazing_altitude_location(ray: &Ray, ellipsoid: &Ellipsoid) -> Option<Cartesian3> {
    let position = ray.origin;
    let direction = ray.direction;

    if position != Cartesian3::ZERO {
        let normal = ellipsoid.geodetic_surface_normal(&position);
        if direction.dot(&normal) >= 0.0 {
            // The location on the surface closest to the ray is the origin's
            // own footprint when the ray points away from the body.
            return Some(position);
        }
    }

    let intersects = ray_ellipsoid(ray, ellipsoid).is_some();

    // Work in the scaled space where the ellipsoid is a unit sphere.
    let f = ellipsoid.transform_position_to_scaled_space(&direction);

    // Build an orthonormal basis whose first axis is the scaled direction.
    let first_axis = f.normalize();
    let reference = f.most_orthogonal_axis();
    let second_axis = reference.cross(&first_axis).normalize();
    let third_axis = first_axis.cross(&second_axis).normalize();
    let basis = Matrix3::from_columns(&first_axis, &second_axis, &third_axis);

    let d = Matrix3::from_scale(&ellipsoid.one_over_radii());
    let d_inverse = Matrix3::from_scale(&ellipsoid.radii());
    let c = Matrix3::from_cross_product(&direction);

    let temp = basis.transpose().multiply(&d).multiply(&c);
    let a = temp.multiply(&d_inverse).multiply(&basis);
    let b = temp.multiply_by_vector(&position);

    // Candidate horizon points in the unit circle of the scaled plane
    // through the origin orthogonal to the direction.
    let solutions = quadratic_vector_expression(&a, &(-b), 0.0, 0.0, 1.0);

    let mut closest: Option<Cartesian3> = None;
    let mut maximum_value = f64::NEG_INFINITY;
    for solution in solutions {
        let surface_point =
            d_inverse.multiply_by_vector(&basis.multiply_by_vector(&solution));
        let toward = (surface_point - position).normalize();
        let value = toward.dot(&direction);
        if value > maximum_value {
            maximum_value = value;
            closest = Some(surface_point);
        }
    }

    let closest = closest?;
    let surface_cartographic = ellipsoid.cartesian_to_cartographic(&closest);

    let maximum_value = clamp(maximum_value, 0.0, 1.0);
    let altitude =
        (closest - position).magnitude() * (1.0 - maximum_value * maximum_value).sqrt();
    let altitude = if intersects { -altitude } else { altitude };

    let mut located = surface_cartographic;
    located.height = altitude;
    Some(ellipsoid.cartographic_to_cartesian(&located))
}
