//! 3x3 matrix stored as a flat column-major array
//!
//! The element at row `r`, column `c` lives at index `c * 3 + r`. Columns
//! are the natural unit of access because a rotation matrix's columns are
//! the rotated basis vectors.

use crate::algebra::quaternion::Quaternion;
use crate::coordinates::Cartesian3;

/// A 3x3 matrix of `f64`, column-major
///
/// # Examples
///
/// ```rust
/// use ellipsoidal::algebra::Matrix3;
/// use ellipsoidal::coordinates::Cartesian3;
///
/// let scale = Matrix3::from_scale(&Cartesian3::new(2.0, 3.0, 4.0));
/// let v = scale.multiply_by_vector(&Cartesian3::new(1.0, 1.0, 1.0));
/// assert_eq!(v, Cartesian3::new(2.0, 3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    m: [f64; 9],
}

impl Matrix3 {
    /// The identity matrix
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Creates a matrix from a column-major array
    pub const fn from_column_major(m: [f64; 9]) -> Self {
        Matrix3 { m }
    }

    /// Creates a matrix from three column vectors
    pub fn from_columns(c0: &Cartesian3, c1: &Cartesian3, c2: &Cartesian3) -> Self {
        Matrix3 {
            m: [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z],
        }
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[col * 3 + row]
    }

    /// Sets the element at `row`, `col`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.m[col * 3 + row] = value;
    }

    /// Column `col` as a vector
    pub fn column(&self, col: usize) -> Cartesian3 {
        let base = col * 3;
        Cartesian3::new(self.m[base], self.m[base + 1], self.m[base + 2])
    }

    /// Creates a non-uniform scale matrix
    pub fn from_scale(scale: &Cartesian3) -> Self {
        Matrix3 {
            m: [scale.x, 0.0, 0.0, 0.0, scale.y, 0.0, 0.0, 0.0, scale.z],
        }
    }

    /// Creates the skew-symmetric cross-product matrix of a vector
    ///
    /// For any `u`, `Matrix3::from_cross_product(&v).multiply_by_vector(&u)`
    /// equals `v.cross(&u)`.
    pub fn from_cross_product(vector: &Cartesian3) -> Self {
        Matrix3 {
            m: [
                0.0, vector.z, -vector.y, // column 0
                -vector.z, 0.0, vector.x, // column 1
                vector.y, -vector.x, 0.0, // column 2
            ],
        }
    }

    /// Creates a rotation matrix from a unit quaternion
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let x2 = q.x * q.x;
        let xy = q.x * q.y;
        let xz = q.x * q.z;
        let xw = q.x * q.w;
        let y2 = q.y * q.y;
        let yz = q.y * q.z;
        let yw = q.y * q.w;
        let z2 = q.z * q.z;
        let zw = q.z * q.w;
        let w2 = q.w * q.w;

        let m00 = x2 - y2 - z2 + w2;
        let m01 = 2.0 * (xy - zw);
        let m02 = 2.0 * (xz + yw);

        let m10 = 2.0 * (xy + zw);
        let m11 = -x2 + y2 - z2 + w2;
        let m12 = 2.0 * (yz - xw);

        let m20 = 2.0 * (xz - yw);
        let m21 = 2.0 * (yz + xw);
        let m22 = -x2 - y2 + z2 + w2;

        Matrix3 {
            m: [m00, m10, m20, m01, m11, m21, m02, m12, m22],
        }
    }

    /// Creates a rotation matrix from heading, pitch and roll angles
    ///
    /// Heading is rotation about the negative z axis, pitch about the
    /// negative y axis, roll about the positive x axis; the rotation is
    /// built through an intermediate quaternion.
    pub fn from_heading_pitch_roll(hpr: &crate::algebra::HeadingPitchRoll) -> Self {
        Matrix3::from_quaternion(&Quaternion::from_heading_pitch_roll(hpr))
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix3) -> Matrix3 {
        let mut m = [0.0; 9];
        for col in 0..3 {
            for row in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.get(row, k) * other.get(k, col);
                }
                m[col * 3 + row] = sum;
            }
        }
        Matrix3 { m }
    }

    /// Matrix-vector product
    pub fn multiply_by_vector(&self, v: &Cartesian3) -> Cartesian3 {
        Cartesian3::new(
            self.m[0] * v.x + self.m[3] * v.y + self.m[6] * v.z,
            self.m[1] * v.x + self.m[4] * v.y + self.m[7] * v.z,
            self.m[2] * v.x + self.m[5] * v.y + self.m[8] * v.z,
        )
    }

    /// Transpose
    pub fn transpose(&self) -> Matrix3 {
        Matrix3 {
            m: [
                self.m[0], self.m[3], self.m[6], self.m[1], self.m[4], self.m[7], self.m[2],
                self.m[5], self.m[8],
            ],
        }
    }

    /// Converts to a nalgebra matrix for linear algebra operations
    pub fn to_matrix3(&self) -> nalgebra::Matrix3<f64> {
        nalgebra::Matrix3::from_column_slice(&self.m)
    }

    /// Creates from a nalgebra matrix
    pub fn from_matrix3(mat: &nalgebra::Matrix3<f64>) -> Self {
        let mut m = [0.0; 9];
        m.copy_from_slice(mat.as_slice());
        Matrix3 { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::HeadingPitchRoll;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity() {
        let v = Cartesian3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix3::IDENTITY.multiply_by_vector(&v), v);
    }

    #[test]
    fn test_column_access() {
        let m = Matrix3::from_columns(
            &Cartesian3::new(1.0, 2.0, 3.0),
            &Cartesian3::new(4.0, 5.0, 6.0),
            &Cartesian3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.column(1), Cartesian3::new(4.0, 5.0, 6.0));
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.get(0, 2), 7.0);
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = Matrix3::from_columns(
            &Cartesian3::new(1.0, 2.0, 3.0),
            &Cartesian3::new(-4.0, 5.5, 6.0),
            &Cartesian3::new(7.0, 8.0, -9.25),
        );
        let b = Matrix3::from_columns(
            &Cartesian3::new(0.5, -1.0, 2.0),
            &Cartesian3::new(3.0, 4.0, -5.0),
            &Cartesian3::new(6.0, 7.5, 8.0),
        );
        let ours = a.multiply(&b);
        let theirs = Matrix3::from_matrix3(&(a.to_matrix3() * b.to_matrix3()));
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(ours.get(row, col), theirs.get(row, col), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_transpose() {
        let m = Matrix3::from_columns(
            &Cartesian3::new(1.0, 2.0, 3.0),
            &Cartesian3::new(4.0, 5.0, 6.0),
            &Cartesian3::new(7.0, 8.0, 9.0),
        );
        let t = m.transpose();
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(t.get(row, col), m.get(col, row));
            }
        }
    }

    #[test]
    fn test_from_cross_product() {
        let v = Cartesian3::new(1.0, 2.0, 3.0);
        let u = Cartesian3::new(-4.0, 5.0, 0.5);
        let skew = Matrix3::from_cross_product(&v);
        let via_matrix = skew.multiply_by_vector(&u);
        let direct = v.cross(&u);
        assert!(via_matrix.equals_epsilon(&direct, 1e-14, 1e-14));
    }

    #[test]
    fn test_from_quaternion_quarter_turn_about_z() {
        let q = Quaternion::from_axis_angle(&Cartesian3::UNIT_Z, PI / 2.0);
        let m = Matrix3::from_quaternion(&q);
        let rotated = m.multiply_by_vector(&Cartesian3::UNIT_X);
        assert!(rotated.equals_epsilon(&Cartesian3::UNIT_Y, 1e-14, 1e-14));
    }

    #[test]
    fn test_from_heading_pitch_roll_zero_is_identity() {
        let m = Matrix3::from_heading_pitch_roll(&HeadingPitchRoll::new(0.0, 0.0, 0.0));
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(
                    m.get(row, col),
                    Matrix3::IDENTITY.get(row, col),
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn test_from_heading_rotates_x_toward_negative_y() {
        // A positive heading turns the frame clockwise when viewed from +z.
        let m = Matrix3::from_heading_pitch_roll(&HeadingPitchRoll::new(PI / 2.0, 0.0, 0.0));
        let rotated = m.multiply_by_vector(&Cartesian3::UNIT_X);
        assert!(rotated.equals_epsilon(&-Cartesian3::UNIT_Y, 1e-14, 1e-14));
    }

    #[test]
    fn test_from_scale() {
        let m = Matrix3::from_scale(&Cartesian3::new(2.0, 3.0, 4.0));
        assert_eq!(
            m.multiply_by_vector(&Cartesian3::new(1.0, 1.0, 1.0)),
            Cartesian3::new(2.0, 3.0, 4.0)
        );
    }
}
