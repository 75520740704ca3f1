//! 3D transformation utilities

use nalgebra::{Isometry3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points and point clouds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3f;

    #[test]
    fn test_translation_roundtrip() {
        let t = Transform3D::translation(Vector3::new(1.0, -2.0, 3.0));
        let p = Point3f::new(0.5, 0.5, 0.5);
        let moved = t.transform_point(&p);
        assert_eq!(moved, Point3f::new(1.5, -1.5, 3.5));

        let back = t.inverse().unwrap().transform_point(&moved);
        assert!((back - p).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        let t = Transform3D::rotation(q);
        let p = Point3f::new(1.0, 0.0, 0.0);
        let rotated = t.transform_point(&p);
        assert!((rotated.coords.norm() - 1.0).abs() < 1e-6);
        approx::assert_relative_eq!(rotated, Point3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_applied_before_translation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        let t = Transform3D::from_translation_rotation(Vector3::new(1.0, 0.0, 0.0), q);
        let p = t.transform_point(&Point3f::new(1.0, 0.0, 0.0));
        approx::assert_relative_eq!(p, Point3f::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
