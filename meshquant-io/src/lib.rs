//! I/O operations for meshquant
//!
//! Reading meshes from OBJ files, exporting reconstructed geometry as
//! OBJ or ASCII PLY, and writing the flat result artifacts (summary
//! CSV, seam-token lists) the pipeline produces.

pub mod obj;
pub mod ply;
pub mod report;

pub use report::*;

use meshquant_core::{Error, Point3f, PointCloud, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Trait for writing point clouds to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud<Point3f>, path: P) -> Result<()>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => obj::ObjReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => obj::ObjWriter::write_mesh(mesh, path),
        Some("ply") => ply::PlyWriter::write_mesh(mesh, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format() {
        assert!(read_mesh("mesh.stl").is_err());
        let mesh = TriangleMesh::new();
        assert!(write_mesh(&mesh, "mesh.stl").is_err());
    }
}
