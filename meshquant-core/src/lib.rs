//! Core data structures for meshquant
//!
//! This crate provides the fundamental types shared by the mesh
//! preprocessing pipeline: points, point clouds, triangle meshes,
//! rigid transforms, and the common error type.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, Isometry3, UnitQuaternion};

/// Common result type for meshquant operations
pub type Result<T> = std::result::Result<T, Error>;

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = TriangleMesh;
