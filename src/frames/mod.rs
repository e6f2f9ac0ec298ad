//! Local reference frames anchored to an ellipsoid surface
//!
//! A local frame at a surface position is named by which cardinal
//! direction each of its first two axes points: `(East, North)` gives the
//! east-north-up frame common in ground-based work, `(North, East)` the
//! north-east-down frame used in aviation. The third axis is implied by
//! the right-handed cross product of the first two.
//!
//! [`LocalFrameConverter`] produces the 4x4 transform from such a local
//! frame to the ellipsoid's body-fixed frame. Converters for every valid
//! axis pair are built once and memoized; [`east_north_up_to_fixed_frame`]
//! and [`north_east_down_to_fixed_frame`] wrap the two common pairs.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::algebra::Matrix4;
use crate::constants::EPSILON14;
use crate::coordinates::Cartesian3;
use crate::ellipsoid::Ellipsoid;
use crate::math::equals_epsilon;
use crate::{GeodesyError, Result};

/// A cardinal axis direction for naming local frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    East,
    North,
    Up,
    South,
    West,
    Down,
}

impl Axis {
    /// The opposite direction
    fn opposite(self) -> Axis {
        match self {
            Axis::East => Axis::West,
            Axis::West => Axis::East,
            Axis::North => Axis::South,
            Axis::South => Axis::North,
            Axis::Up => Axis::Down,
            Axis::Down => Axis::Up,
        }
    }

    /// The direction this axis degenerates to at the origin, where no
    /// geodetic normal exists
    fn degenerate_vector(self) -> Cartesian3 {
        match self {
            Axis::North => Cartesian3::new(-1.0, 0.0, 0.0),
            Axis::East => Cartesian3::new(0.0, 1.0, 0.0),
            Axis::Up => Cartesian3::new(0.0, 0.0, 1.0),
            Axis::South => Cartesian3::new(1.0, 0.0, 0.0),
            Axis::West => Cartesian3::new(0.0, -1.0, 0.0),
            Axis::Down => Cartesian3::new(0.0, 0.0, -1.0),
        }
    }

    /// The right-handed cross product of two distinct, non-opposite axes
    fn cross(self, other: Axis) -> Axis {
        use Axis::*;
        match (self, other) {
            (East, North) => Up,
            (North, East) => Down,
            (East, Up) => South,
            (Up, East) => North,
            (East, South) => Down,
            (South, East) => Up,
            (East, Down) => North,
            (Down, East) => South,
            (North, Up) => East,
            (Up, North) => West,
            (North, West) => Up,
            (West, North) => Down,
            (North, Down) => West,
            (Down, North) => East,
            (Up, West) => South,
            (West, Up) => North,
            (Up, South) => East,
            (South, Up) => West,
            (South, West) => Down,
            (West, South) => Up,
            (South, Down) => East,
            (Down, South) => West,
            (West, Down) => South,
            (Down, West) => North,
            _ => unreachable!("axis pair validated before lookup"),
        }
    }
}

/// Builds the transform from a named local frame to the body-fixed frame
///
/// Construction validates the axis pair once; conversion itself cannot
/// fail. Converters are `Copy`, so the memoized table hands out values.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrameConverter {
    first: Axis,
    second: Axis,
    third: Axis,
}

/// Converters for every valid axis pair, built on first use
static CONVERTERS: Lazy<HashMap<(Axis, Axis), LocalFrameConverter>> = Lazy::new(|| {
    use Axis::*;
    let axes = [East, North, Up, South, West, Down];
    let mut map = HashMap::new();
    for first in axes {
        for second in axes {
            if first != second && first.opposite() != second {
                map.insert(
                    (first, second),
                    LocalFrameConverter {
                        first,
                        second,
                        third: first.cross(second),
                    },
                );
            }
        }
    }
    map
});

impl LocalFrameConverter {
    /// Looks up the converter for an axis pair
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::InvalidAxisPair`] when the two axes are
    /// equal or opposite, since no frame is determined then.
    pub fn new(first: Axis, second: Axis) -> Result<Self> {
        CONVERTERS
            .get(&(first, second))
            .copied()
            .ok_or(GeodesyError::InvalidAxisPair { first, second })
    }

    /// The transform from the local frame at `origin` to the body-fixed
    /// frame
    ///
    /// The rotation columns are the local axes expressed in body-fixed
    /// coordinates and the translation is the origin itself, so the
    /// transform maps local points into the body-fixed frame. Positions
    /// at the ellipsoid center or on the polar axis have no well-defined
    /// east or north; fixed fallback axes consistent with approaching
    /// along the +x meridian are used there.
    pub fn to_fixed_frame(&self, origin: &Cartesian3, ellipsoid: &Ellipsoid) -> Matrix4 {
        let (first, second, third) = if origin.equals_epsilon(&Cartesian3::ZERO, 0.0, EPSILON14) {
            (
                self.first.degenerate_vector(),
                self.second.degenerate_vector(),
                self.third.degenerate_vector(),
            )
        } else if equals_epsilon(origin.x, 0.0, 0.0, EPSILON14)
            && equals_epsilon(origin.y, 0.0, 0.0, EPSILON14)
        {
            // On the polar axis. Flip the vertical and meridional axes to
            // the hemisphere's sign; east and west are unaffected.
            let hemisphere = origin.z.signum();
            let vector = |axis: Axis| {
                let v = axis.degenerate_vector();
                if matches!(axis, Axis::East | Axis::West) {
                    v
                } else {
                    v * hemisphere
                }
            };
            (
                vector(self.first),
                vector(self.second),
                vector(self.third),
            )
        } else {
            let up = ellipsoid.geodetic_surface_normal(origin);
            let east = Cartesian3::new(-origin.y, origin.x, 0.0).normalize();
            let north = up.cross(&east);
            let resolve = |axis: Axis| match axis {
                Axis::Up => up,
                Axis::Down => -up,
                Axis::East => east,
                Axis::West => -east,
                Axis::North => north,
                Axis::South => -north,
            };
            (
                resolve(self.first),
                resolve(self.second),
                resolve(self.third),
            )
        };

        Matrix4::from_column_major([
            first.x, first.y, first.z, 0.0, //
            second.x, second.y, second.z, 0.0, //
            third.x, third.y, third.z, 0.0, //
            origin.x, origin.y, origin.z, 1.0,
        ])
    }
}

/// The transform from the east-north-up frame at `origin` to the
/// body-fixed frame
///
/// # Examples
///
/// ```rust
/// use ellipsoidal::coordinates::Cartesian3;
/// use ellipsoidal::ellipsoid::UNIT_SPHERE;
/// use ellipsoidal::frames::east_north_up_to_fixed_frame;
///
/// let transform = east_north_up_to_fixed_frame(&Cartesian3::UNIT_X, &UNIT_SPHERE);
/// // Local up at (1, 0, 0) is the body-fixed +x direction.
/// let up = transform.multiply_by_point_as_vector(&Cartesian3::UNIT_Z);
/// assert!(up.equals_epsilon(&Cartesian3::UNIT_X, 1e-14, 1e-14));
/// ```
pub fn east_north_up_to_fixed_frame(origin: &Cartesian3, ellipsoid: &Ellipsoid) -> Matrix4 {
    ENU_CONVERTER.to_fixed_frame(origin, ellipsoid)
}

/// The transform from the north-east-down frame at `origin` to the
/// body-fixed frame
pub fn north_east_down_to_fixed_frame(origin: &Cartesian3, ellipsoid: &Ellipsoid) -> Matrix4 {
    NED_CONVERTER.to_fixed_frame(origin, ellipsoid)
}

static ENU_CONVERTER: Lazy<LocalFrameConverter> = Lazy::new(|| {
    LocalFrameConverter::new(Axis::East, Axis::North).expect("east/north is a valid pair")
});

static NED_CONVERTER: Lazy<LocalFrameConverter> = Lazy::new(|| {
    LocalFrameConverter::new(Axis::North, Axis::East).expect("north/east is a valid pair")
});
