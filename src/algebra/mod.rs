//! Matrix and quaternion algebra
//!
//! Fixed-size 3x3 and 4x4 matrices stored as flat column-major arrays, plus
//! a quaternion type for building rotation matrices from axis-angle and
//! heading-pitch-roll inputs. The column-major layout is a crate-wide
//! convention: basis vectors of a frame are the matrix columns.

pub mod matrix3;
pub mod matrix4;
pub mod quaternion;

pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::{HeadingPitchRoll, Quaternion};
