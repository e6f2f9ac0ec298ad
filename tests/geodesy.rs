//! End-to-end checks across the geodesy pipeline
//!
//! Exercises the public API the way an application would: geodetic
//! conversion feeding local frames, rays against reference ellipsoids,
//! and geodesics subdivided into waypoints.

use approx::assert_relative_eq;
use rstest::rstest;

use ellipsoidal::constants::{DEG2RAD, EPSILON9};
use ellipsoidal::coordinates::{Cartesian3, Cartographic};
use ellipsoidal::ellipsoid::{Ellipsoid, MOON, UNIT_SPHERE, WGS84};
use ellipsoidal::frames::east_north_up_to_fixed_frame;
use ellipsoidal::geodesic::EllipsoidGeodesic;
use ellipsoidal::intersections::{ray_ellipsoid, ray_plane, Plane, Ray};
use ellipsoidal::polynomial::quadratic_real_roots;

#[test]
fn ray_from_center_of_unit_sphere_exits_at_one() {
    let ray = Ray::new(Cartesian3::ZERO, Cartesian3::UNIT_X);
    let interval = ray_ellipsoid(&ray, &UNIT_SPHERE).unwrap();
    assert_eq!(interval.start, 0.0);
    assert_relative_eq!(interval.stop, 1.0, epsilon = 1e-14);
}

#[test]
fn oblate_ellipsoid_round_trip_at_the_origin_of_coordinates() {
    let ellipsoid = Ellipsoid::new(2.0, 2.0, 1.0).unwrap();
    let cartesian = ellipsoid.cartographic_to_cartesian(&Cartographic::ZERO);
    assert!(cartesian.equals_epsilon(&Cartesian3::new(2.0, 0.0, 0.0), 1e-12, 1e-12));

    let cartographic = ellipsoid.cartesian_to_cartographic(&Cartesian3::new(2.0, 0.0, 0.0));
    assert!(cartographic.equals_epsilon(&Cartographic::ZERO, 0.0, 1e-12));
}

#[test]
fn quadratic_roots_ascending() {
    let roots = quadratic_real_roots(1.0, -3.0, 2.0);
    assert_eq!(roots, vec![1.0, 2.0]);
}

#[test]
fn one_degree_equatorial_geodesic() {
    let start = Cartographic::ZERO;
    let end = Cartographic::from_degrees(1.0, 0.0, 0.0);
    let geodesic = EllipsoidGeodesic::new(&start, &end, None).unwrap();

    // A degree of longitude at the equator is about 111.3 km.
    assert!((geodesic.surface_distance() - 111_319.0).abs() < 100.0);

    let midpoint = geodesic.interpolate_using_fraction(0.5);
    assert_relative_eq!(midpoint.latitude, 0.0, epsilon = 1e-9);
    assert_relative_eq!(midpoint.longitude, 0.5 * DEG2RAD, epsilon = 1e-9);
}

#[rstest]
#[case(Cartographic::from_degrees(0.0, 0.0, 0.0))]
#[case(Cartographic::from_degrees(86.925, 27.988, 8_848.0))]
#[case(Cartographic::from_degrees(-155.2, 19.5, 4_205.0))]
#[case(Cartographic::from_degrees(170.0, -85.0, 0.0))]
fn wgs84_conversion_round_trips(#[case] cartographic: Cartographic) {
    let cartesian = WGS84.cartographic_to_cartesian(&cartographic);
    let back = WGS84.cartesian_to_cartographic(&cartesian);
    assert_relative_eq!(back.longitude, cartographic.longitude, epsilon = EPSILON9);
    assert_relative_eq!(back.latitude, cartographic.latitude, epsilon = EPSILON9);
    assert!((back.height - cartographic.height).abs() < 1e-6);
}

#[test]
fn lunar_positions_round_trip() {
    let site = Cartographic::from_degrees(23.47, 0.67, 0.0);
    let cartesian = MOON.cartographic_to_cartesian(&site);
    assert_relative_eq!(cartesian.magnitude(), MOON.maximum_radius(), epsilon = 1e-6);
    let back = MOON.cartesian_to_cartographic(&cartesian);
    assert!(back.equals_epsilon(&site, 0.0, EPSILON9));
}

#[test]
fn enu_frame_lifts_along_the_surface_normal() {
    let site = Cartographic::from_degrees(-71.06, 42.36, 0.0);
    let origin = WGS84.cartographic_to_cartesian(&site);
    let transform = east_north_up_to_fixed_frame(&origin, &WGS84);

    // A point 500 m up in the local frame has geodetic height 500 m.
    let lifted = transform.multiply_by_point(&Cartesian3::new(0.0, 0.0, 500.0));
    let cartographic = WGS84.cartesian_to_cartographic(&lifted);
    assert!((cartographic.height - 500.0).abs() < 1e-5);
    assert_relative_eq!(cartographic.latitude, site.latitude, epsilon = 1e-12);

    // Moving north in the local frame increases latitude.
    let north = transform.multiply_by_point(&Cartesian3::new(0.0, 10_000.0, 0.0));
    assert!(WGS84.cartesian_to_cartographic(&north).latitude > site.latitude);
}

#[test]
fn nadir_ray_from_orbit_hits_the_subsatellite_point() {
    let subsatellite = Cartographic::from_degrees(30.0, 45.0, 0.0);
    let satellite = WGS84.cartographic_to_cartesian(&Cartographic::new(
        subsatellite.longitude,
        subsatellite.latitude,
        500_000.0,
    ));
    let surface = WGS84.cartographic_to_cartesian(&subsatellite);

    let ray = Ray::new(satellite, (surface - satellite).normalize());
    let interval = ray_ellipsoid(&ray, &WGS84).unwrap();
    let hit = ray.point_along(interval.start);
    assert!(hit.equals_epsilon(&surface, 1e-9, 1e-4));
}

#[test]
fn horizon_plane_blocks_rays_below_it() {
    // The local horizon plane at a surface site, in body-fixed frame.
    let site = WGS84.cartographic_to_cartesian(&Cartographic::from_degrees(0.0, 0.0, 0.0));
    let normal = WGS84.geodetic_surface_normal(&site);
    let plane = Plane::from_point_normal(&site, normal).unwrap();

    // A ray dropping from above crosses the plane at the site.
    let above = site + normal * 1_000.0;
    let down = Ray::new(above, -normal);
    let hit = ray_plane(&down, &plane).unwrap();
    assert!(hit.equals_epsilon(&site, 1e-12, 1e-6));

    // A ray skimming parallel to the plane never does.
    let east = Cartesian3::new(-site.y, site.x, 0.0).normalize();
    assert!(ray_plane(&Ray::new(above, east), &plane).is_none());
}

#[test]
fn geodesic_waypoints_stay_on_the_surface() {
    let start = Cartographic::from_degrees(-122.42, 37.77, 0.0);
    let end = Cartographic::from_degrees(151.21, -33.87, 0.0);
    let geodesic = EllipsoidGeodesic::new(&start, &end, None).unwrap();

    for step in 0..=8 {
        let waypoint = geodesic.interpolate_using_fraction(f64::from(step) / 8.0);
        assert_eq!(waypoint.height, 0.0);
        let cartesian = WGS84.cartographic_to_cartesian(&waypoint);
        let back = WGS84.cartesian_to_cartographic(&cartesian);
        assert!(back.height.abs() < 1e-6);
    }
}
