//! 4x4 matrix stored as a flat column-major array
//!
//! Used for rigid local-frame transforms: a 3x3 rotation block in the upper
//! left, a translation in the fourth column. The element at row `r`,
//! column `c` lives at index `c * 4 + r`.

use crate::algebra::matrix3::Matrix3;
use crate::coordinates::Cartesian3;

/// A 4x4 matrix of `f64`, column-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    m: [f64; 16],
}

impl Matrix4 {
    /// The identity matrix
    pub const IDENTITY: Matrix4 = Matrix4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from a column-major array
    pub const fn from_column_major(m: [f64; 16]) -> Self {
        Matrix4 { m }
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// Sets the element at `row`, `col`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.m[col * 4 + row] = value;
    }

    /// Creates a rigid transform from a rotation block and a translation
    pub fn from_rotation_translation(rotation: &Matrix3, translation: &Cartesian3) -> Self {
        Matrix4 {
            m: [
                rotation.get(0, 0),
                rotation.get(1, 0),
                rotation.get(2, 0),
                0.0,
                rotation.get(0, 1),
                rotation.get(1, 1),
                rotation.get(2, 1),
                0.0,
                rotation.get(0, 2),
                rotation.get(1, 2),
                rotation.get(2, 2),
                0.0,
                translation.x,
                translation.y,
                translation.z,
                1.0,
            ],
        }
    }

    /// Creates a pure translation transform
    pub fn from_translation(translation: &Cartesian3) -> Self {
        Matrix4::from_rotation_translation(&Matrix3::IDENTITY, translation)
    }

    /// The upper-left 3x3 rotation block
    pub fn rotation(&self) -> Matrix3 {
        let mut rotation = Matrix3::IDENTITY;
        for col in 0..3 {
            for row in 0..3 {
                rotation.set(row, col, self.get(row, col));
            }
        }
        rotation
    }

    /// The translation (fourth column)
    pub fn translation(&self) -> Cartesian3 {
        Cartesian3::new(self.m[12], self.m[13], self.m[14])
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let mut m = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.get(row, k) * other.get(k, col);
                }
                m[col * 4 + row] = sum;
            }
        }
        Matrix4 { m }
    }

    /// Transforms a point, with the translation participating (w = 1)
    pub fn multiply_by_point(&self, point: &Cartesian3) -> Cartesian3 {
        Cartesian3::new(
            self.m[0] * point.x + self.m[4] * point.y + self.m[8] * point.z + self.m[12],
            self.m[1] * point.x + self.m[5] * point.y + self.m[9] * point.z + self.m[13],
            self.m[2] * point.x + self.m[6] * point.y + self.m[10] * point.z + self.m[14],
        )
    }

    /// Transforms a direction, ignoring the translation (w = 0)
    pub fn multiply_by_point_as_vector(&self, direction: &Cartesian3) -> Cartesian3 {
        Cartesian3::new(
            self.m[0] * direction.x + self.m[4] * direction.y + self.m[8] * direction.z,
            self.m[1] * direction.x + self.m[5] * direction.y + self.m[9] * direction.z,
            self.m[2] * direction.x + self.m[6] * direction.y + self.m[10] * direction.z,
        )
    }

    /// Transpose
    pub fn transpose(&self) -> Matrix4 {
        let mut m = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                m[row * 4 + col] = self.m[col * 4 + row];
            }
        }
        Matrix4 { m }
    }

    /// Fast inverse of a rigid rotation-plus-translation transform
    ///
    /// Valid only when the upper-left 3x3 block is orthonormal and the
    /// bottom row is `(0, 0, 0, 1)`; the result is undefined otherwise.
    /// Under that precondition the inverse is the transposed rotation with
    /// a counter-rotated, negated translation, and no general matrix
    /// inversion is needed.
    pub fn inverse_transformation(&self) -> Matrix4 {
        let rotation_transposed = self.rotation().transpose();
        let translation = self.translation();
        let inverse_translation = -rotation_transposed.multiply_by_vector(&translation);
        Matrix4::from_rotation_translation(&rotation_transposed, &inverse_translation)
    }

    /// Converts to a nalgebra matrix for linear algebra operations
    pub fn to_matrix4(&self) -> nalgebra::Matrix4<f64> {
        nalgebra::Matrix4::from_column_slice(&self.m)
    }

    /// Creates from a nalgebra matrix
    pub fn from_matrix4(mat: &nalgebra::Matrix4<f64>) -> Self {
        let mut m = [0.0; 16];
        m.copy_from_slice(mat.as_slice());
        Matrix4 { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Quaternion;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn rigid_example() -> Matrix4 {
        let rotation =
            Matrix3::from_quaternion(&Quaternion::from_axis_angle(&Cartesian3::UNIT_Z, PI / 3.0));
        Matrix4::from_rotation_translation(&rotation, &Cartesian3::new(10.0, -20.0, 30.0))
    }

    #[test]
    fn test_point_vs_vector_transform() {
        let m = Matrix4::from_translation(&Cartesian3::new(5.0, 6.0, 7.0));
        let p = Cartesian3::new(1.0, 2.0, 3.0);
        // Points pick up the translation, directions do not.
        assert_eq!(m.multiply_by_point(&p), Cartesian3::new(6.0, 8.0, 10.0));
        assert_eq!(m.multiply_by_point_as_vector(&p), p);
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = rigid_example();
        let b = Matrix4::from_translation(&Cartesian3::new(-1.0, 2.5, 0.125));
        let ours = a.multiply(&b);
        let theirs = Matrix4::from_matrix4(&(a.to_matrix4() * b.to_matrix4()));
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(ours.get(row, col), theirs.get(row, col), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_transformation_round_trip() {
        let m = rigid_example();
        let inverse = m.inverse_transformation();
        let p = Cartesian3::new(3.0, -4.0, 5.0);
        let round_trip = inverse.multiply_by_point(&m.multiply_by_point(&p));
        assert!(round_trip.equals_epsilon(&p, 1e-12, 1e-12));

        // The composed transform is the identity.
        let composed = inverse.multiply(&m);
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(
                    composed.get(row, col),
                    Matrix4::IDENTITY.get(row, col),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_rotation_and_translation_accessors() {
        let m = rigid_example();
        assert_eq!(m.translation(), Cartesian3::new(10.0, -20.0, 30.0));
        let r = m.rotation();
        // Rotation block columns stay unit length.
        for col in 0..3 {
            assert_relative_eq!(r.column(col).magnitude(), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_transpose_involution() {
        let m = rigid_example();
        assert_eq!(m.transpose().transpose(), m);
    }
}
