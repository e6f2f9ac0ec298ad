//! Quaternion rotation representation
//!
//! Quaternions built from axis-angle or heading-pitch-roll inputs are unit
//! length by convention; unit length is never enforced, so results of
//! arithmetic on hand-constructed non-unit quaternions are the caller's
//! responsibility.

use crate::coordinates::Cartesian3;

/// A rotation expressed as heading, pitch and roll angles in radians
///
/// Heading is the rotation about the negative z axis, pitch about the
/// negative y axis, and roll about the positive x axis, applied roll first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingPitchRoll {
    /// Rotation about the negative z axis in radians
    pub heading: f64,
    /// Rotation about the negative y axis in radians
    pub pitch: f64,
    /// Rotation about the positive x axis in radians
    pub roll: f64,
}

impl HeadingPitchRoll {
    /// Creates a heading-pitch-roll triple from radians
    pub const fn new(heading: f64, pitch: f64, roll: f64) -> Self {
        HeadingPitchRoll {
            heading,
            pitch,
            roll,
        }
    }
}

/// A quaternion, `x*i + y*j + z*k + w`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    /// Imaginary i component
    pub x: f64,
    /// Imaginary j component
    pub y: f64,
    /// Imaginary k component
    pub z: f64,
    /// Real component
    pub w: f64,
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a quaternion from components
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    /// Creates a rotation of `angle` radians about a unit `axis`
    ///
    /// The axis is expected to be unit length by convention; it is not
    /// normalized here.
    pub fn from_axis_angle(axis: &Cartesian3, angle: f64) -> Self {
        let half_angle = angle / 2.0;
        let s = half_angle.sin();
        Quaternion {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half_angle.cos(),
        }
    }

    /// Creates a rotation from heading, pitch and roll
    ///
    /// The rotations compose as roll about +x, then pitch about -y, then
    /// heading about -z.
    pub fn from_heading_pitch_roll(hpr: &HeadingPitchRoll) -> Self {
        let roll = Quaternion::from_axis_angle(&Cartesian3::UNIT_X, hpr.roll);
        let pitch = Quaternion::from_axis_angle(&Cartesian3::UNIT_Y, -hpr.pitch);
        let heading = Quaternion::from_axis_angle(&Cartesian3::UNIT_Z, -hpr.heading);
        heading.multiply(&pitch.multiply(&roll))
    }

    /// Hamilton product `self * other`
    ///
    /// Applying the result rotates by `other` first, then `self`.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        let lx = self.x;
        let ly = self.y;
        let lz = self.z;
        let lw = self.w;
        let rx = other.x;
        let ry = other.y;
        let rz = other.z;
        let rw = other.w;
        Quaternion {
            x: lw * rx + lx * rw + ly * rz - lz * ry,
            y: lw * ry - lx * rz + ly * rw + lz * rx,
            z: lw * rz + lx * ry - ly * rx + lz * rw,
            w: lw * rw - lx * rx - ly * ry - lz * rz,
        }
    }

    /// The conjugate, which for a unit quaternion is the inverse rotation
    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// The quaternion magnitude
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}
