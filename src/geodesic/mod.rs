//! Shortest surface paths on an ellipsoid of revolution
//!
//! An [`EllipsoidGeodesic`] is the geodesic through two surface points,
//! solved with Vincenty's inverse formula at construction. Points along
//! the path are recovered with the direct problem, exposed both by
//! fraction of the total arc and by surface distance.
//!
//! Heights are ignored; both endpoints are treated as lying on the
//! surface, and interpolated points come back with zero height. The
//! ellipsoid must be rotationally symmetric about z (equal x and y
//! radii), which is what the underlying series expansion assumes.

use crate::constants::{EPSILON12, TWO_PI};
use crate::coordinates::Cartographic;
use crate::ellipsoid::{Ellipsoid, WGS84};
use crate::{GeodesyError, Result};

/// Convergence threshold for the longitude-difference iteration
const LAMBDA_CONVERGENCE: f64 = 1.0e-12;

/// Iteration cap for the inverse and direct iterations. Vincenty's
/// inverse iteration can fail to converge for nearly antipodal points;
/// the cap keeps those cases bounded and logged.
const MAX_ITERATIONS: usize = 200;

/// A geodesic between two surface points on an ellipsoid of revolution
#[derive(Debug, Clone, Copy)]
pub struct EllipsoidGeodesic {
    ellipsoid: Ellipsoid,
    start: Cartographic,
    end: Cartographic,
    surface_distance: f64,
    start_heading: f64,
    end_heading: f64,
}

impl EllipsoidGeodesic {
    /// Creates the geodesic between `start` and `end` on `ellipsoid`
    ///
    /// Heights on the endpoints are ignored. The distance, start heading,
    /// and end heading are computed eagerly with Vincenty's inverse
    /// formula.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::NonFiniteInput`] when either endpoint has a
    /// non-finite coordinate, and [`GeodesyError::AsymmetricEllipsoid`]
    /// when the ellipsoid's x and y radii differ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ellipsoidal::coordinates::Cartographic;
    /// use ellipsoidal::geodesic::EllipsoidGeodesic;
    ///
    /// let london = Cartographic::from_degrees(-0.1278, 51.5074, 0.0);
    /// let tokyo = Cartographic::from_degrees(139.6917, 35.6895, 0.0);
    /// let geodesic = EllipsoidGeodesic::new(&london, &tokyo, None).unwrap();
    /// assert!((geodesic.surface_distance() - 9.56e6).abs() < 5.0e4);
    /// ```
    pub fn new(
        start: &Cartographic,
        end: &Cartographic,
        ellipsoid: Option<Ellipsoid>,
    ) -> Result<Self> {
        let ellipsoid = ellipsoid.unwrap_or(*WGS84);

        for point in [start, end] {
            if !(point.longitude.is_finite() && point.latitude.is_finite()) {
                return Err(GeodesyError::NonFiniteInput {
                    operation: "EllipsoidGeodesic::new",
                });
            }
        }
        let radii = ellipsoid.radii();
        if radii.x != radii.y {
            return Err(GeodesyError::AsymmetricEllipsoid {
                x_radius: radii.x,
                y_radius: radii.y,
            });
        }

        let (surface_distance, start_heading, end_heading) =
            vincenty_inverse(&ellipsoid, start, end);

        Ok(EllipsoidGeodesic {
            ellipsoid,
            start: Cartographic::new(start.longitude, start.latitude, 0.0),
            end: Cartographic::new(end.longitude, end.latitude, 0.0),
            surface_distance,
            start_heading,
            end_heading,
        })
    }

    /// The ellipsoid the geodesic lies on
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// The start point, with zero height
    pub fn start(&self) -> Cartographic {
        self.start
    }

    /// The end point, with zero height
    pub fn end(&self) -> Cartographic {
        self.end
    }

    /// The length of the geodesic along the surface, in meters
    pub fn surface_distance(&self) -> f64 {
        self.surface_distance
    }

    /// The heading at the start point, radians clockwise from north
    pub fn start_heading(&self) -> f64 {
        self.start_heading
    }

    /// The heading at the end point, radians clockwise from north
    pub fn end_heading(&self) -> f64 {
        self.end_heading
    }

    /// The point a fraction of the way along the geodesic
    ///
    /// `fraction` 0 is the start and 1 the end; values outside `[0, 1]`
    /// extrapolate along the same great-ellipse path.
    pub fn interpolate_using_fraction(&self, fraction: f64) -> Cartographic {
        self.interpolate_using_surface_distance(fraction * self.surface_distance)
    }

    /// The point a given surface distance along the geodesic from the start
    pub fn interpolate_using_surface_distance(&self, distance: f64) -> Cartographic {
        vincenty_direct(&self.ellipsoid, &self.start, self.start_heading, distance)
    }
}

/// Vincenty's inverse problem: distance and headings between two points
///
/// Returns `(surface_distance, start_heading, end_heading)`. The
/// longitude-difference iteration does not converge for nearly antipodal
/// points; the iteration cap keeps that bounded and the last iterate is
/// used.
fn vincenty_inverse(
    ellipsoid: &Ellipsoid,
    start: &Cartographic,
    end: &Cartographic,
) -> (f64, f64, f64) {
    let major = ellipsoid.maximum_radius();
    let minor = ellipsoid.minimum_radius();
    let flattening = (major - minor) / major;

    // Coincident points have zero distance and an arbitrary heading.
    if start.longitude == end.longitude && start.latitude == end.latitude {
        return (0.0, 0.0, 0.0);
    }

    // Reduced latitudes on the auxiliary sphere.
    let u1 = ((1.0 - flattening) * start.latitude.tan()).atan();
    let u2 = ((1.0 - flattening) * end.latitude.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let l = end.longitude - start.longitude;
    let mut lambda = l;

    let mut sin_sigma;
    let mut cos_sigma;
    let mut sigma;
    let mut cos_squared_alpha;
    let mut cos_2_sigma_m;

    let mut iterations = 0;
    loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let term1 = cos_u2 * sin_lambda;
        let term2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        sin_sigma = (term1 * term1 + term2 * term2).sqrt();
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

        if sin_sigma == 0.0 {
            // Coincident points along the iteration.
            return (0.0, 0.0, 0.0);
        }

        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_squared_alpha = 1.0 - sin_alpha * sin_alpha;

        cos_2_sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_squared_alpha;
        if !cos_2_sigma_m.is_finite() {
            // Both points on the equator.
            cos_2_sigma_m = 0.0;
        }

        let c = flattening / 16.0
            * cos_squared_alpha
            * (4.0 + flattening * (4.0 - 3.0 * cos_squared_alpha));
        let previous_lambda = lambda;
        lambda = l
            + (1.0 - c)
                * flattening
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2_sigma_m
                            + c * cos_sigma
                                * (-1.0 + 2.0 * cos_2_sigma_m * cos_2_sigma_m)));

        iterations += 1;
        if (lambda - previous_lambda).abs() <= LAMBDA_CONVERGENCE {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            log::warn!(
                "vincenty inverse hit the iteration cap (nearly antipodal endpoints); \
                 using the last iterate"
            );
            break;
        }
    }

    let u_squared = cos_squared_alpha * (major * major - minor * minor) / (minor * minor);
    let a = 1.0
        + u_squared / 16384.0
            * (4096.0 + u_squared * (-768.0 + u_squared * (320.0 - 175.0 * u_squared)));
    let b = u_squared / 1024.0
        * (256.0 + u_squared * (-128.0 + u_squared * (74.0 - 47.0 * u_squared)));

    let delta_sigma = b
        * sin_sigma
        * (cos_2_sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m * cos_2_sigma_m)
                    - b / 6.0
                        * cos_2_sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2_sigma_m * cos_2_sigma_m)));

    let distance = minor * a * (sigma - delta_sigma);

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let start_heading = (cos_u2 * sin_lambda)
        .atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let end_heading =
        (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    (distance, start_heading, end_heading)
}

/// Vincenty's direct problem: the point at a distance along a heading
fn vincenty_direct(
    ellipsoid: &Ellipsoid,
    start: &Cartographic,
    heading: f64,
    distance: f64,
) -> Cartographic {
    let major = ellipsoid.maximum_radius();
    let minor = ellipsoid.minimum_radius();
    let flattening = (major - minor) / major;

    if distance == 0.0 {
        return *start;
    }

    let u1 = ((1.0 - flattening) * start.latitude.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_heading, cos_heading) = heading.sin_cos();

    let sigma1 = sin_u1.atan2(cos_u1 * cos_heading);
    let sin_alpha = cos_u1 * sin_heading;
    let cos_squared_alpha = 1.0 - sin_alpha * sin_alpha;

    let u_squared = cos_squared_alpha * (major * major - minor * minor) / (minor * minor);
    let a = 1.0
        + u_squared / 16384.0
            * (4096.0 + u_squared * (-768.0 + u_squared * (320.0 - 175.0 * u_squared)));
    let b = u_squared / 1024.0
        * (256.0 + u_squared * (-128.0 + u_squared * (74.0 - 47.0 * u_squared)));

    // Iterate the arc length on the auxiliary sphere.
    let mut sigma = distance / (minor * a);
    let mut cos_2_sigma_m;
    let mut iterations = 0;
    loop {
        cos_2_sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let delta_sigma = b
            * sin_sigma
            * (cos_2_sigma_m
                + b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m * cos_2_sigma_m)
                        - b / 6.0
                            * cos_2_sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2_sigma_m * cos_2_sigma_m)));
        let previous_sigma = sigma;
        sigma = distance / (minor * a) + delta_sigma;

        iterations += 1;
        if (sigma - previous_sigma).abs() <= EPSILON12 {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            log::warn!("vincenty direct hit the iteration cap; using the last iterate");
            break;
        }
    }

    let (sin_sigma, cos_sigma) = sigma.sin_cos();
    cos_2_sigma_m = (2.0 * sigma1 + sigma).cos();

    let temp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_heading;
    let latitude = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_heading)
        .atan2((1.0 - flattening) * (sin_alpha * sin_alpha + temp * temp).sqrt());

    let lambda = (sin_sigma * sin_heading)
        .atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_heading);
    let c = flattening / 16.0
        * cos_squared_alpha
        * (4.0 + flattening * (4.0 - 3.0 * cos_squared_alpha));
    let l = lambda
        - (1.0 - c)
            * flattening
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2_sigma_m
                        + c * cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m * cos_2_sigma_m)));

    // Keep longitude in (-pi, pi].
    let mut longitude = start.longitude + l;
    if longitude > std::f64::consts::PI {
        longitude -= TWO_PI;
    } else if longitude <= -std::f64::consts::PI {
        longitude += TWO_PI;
    }

    Cartographic::new(longitude, latitude, 0.0)
}
