//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices, faces and optional UV assignments
///
/// UV data is stored the way OBJ files express it: a pool of 2D
/// texture coordinates plus a per-corner index triple for each face.
/// Two faces sharing a vertex may assign it different UV indices,
/// which is exactly what seam extraction looks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub face_uvs: Option<Vec<[usize; 3]>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            uvs: None,
            face_uvs: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            uvs: None,
            face_uvs: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh, returning its index
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Set per-corner UV assignments
    ///
    /// Requires one index triple per face.
    pub fn set_uvs(&mut self, uvs: Vec<[f32; 2]>, face_uvs: Vec<[usize; 3]>) -> Result<()> {
        if face_uvs.len() != self.faces.len() {
            return Err(Error::LengthMismatch {
                expected: self.faces.len(),
                actual: face_uvs.len(),
            });
        }
        self.uvs = Some(uvs);
        self.face_uvs = Some(face_uvs);
        Ok(())
    }

    /// Copy the vertex positions into a point cloud
    pub fn vertex_cloud(&self) -> PointCloud<Point3f> {
        PointCloud::from_points(self.vertices.clone())
    }

    /// Replace the vertex positions, keeping topology
    ///
    /// Used to re-export a mesh with reconstructed (dequantized)
    /// positions. The replacement must have one position per vertex.
    pub fn set_vertices(&mut self, vertices: Vec<Point3f>) -> Result<()> {
        if vertices.len() != self.vertices.len() {
            return Err(Error::LengthMismatch {
                expected: self.vertices.len(),
                actual: vertices.len(),
            });
        }
        self.vertices = vertices;
        Ok(())
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
