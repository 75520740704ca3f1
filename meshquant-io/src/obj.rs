//! OBJ format support
//!
//! Reads the subset of Wavefront OBJ the pipeline needs: vertex
//! positions, triangulated faces (polygon fans), and optional
//! per-corner texcoord indices (`v/vt` references), which drive UV
//! seam detection downstream.

use crate::{MeshReader, MeshWriter};
use meshquant_core::{Error, Point3f, Result, TriangleMesh};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct ObjReader;
pub struct ObjWriter;

/// One face corner: a vertex index and an optional texcoord index
struct Corner {
    vertex: usize,
    uv: Option<usize>,
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut positions: Vec<Point3f> = Vec::new();
        let mut texcoords: Vec<[f32; 2]> = Vec::new();
        let mut faces: Vec<[usize; 3]> = Vec::new();
        let mut face_uvs: Vec<[usize; 3]> = Vec::new();
        let mut all_corners_have_uvs = true;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let coords = parse_floats::<3>(parts, line_no)?;
                    positions.push(Point3f::new(coords[0], coords[1], coords[2]));
                }
                Some("vt") => {
                    let coords = parse_floats::<2>(parts, line_no)?;
                    texcoords.push(coords);
                }
                Some("f") => {
                    let corners = parts
                        .map(|token| parse_corner(token, positions.len(), texcoords.len(), line_no))
                        .collect::<Result<Vec<Corner>>>()?;
                    if corners.len() < 3 {
                        return Err(Error::InvalidInput(format!(
                            "face with fewer than 3 vertices at line {}",
                            line_no + 1
                        )));
                    }
                    // Fan-triangulate polygons
                    for i in 1..corners.len() - 1 {
                        let tri = [&corners[0], &corners[i], &corners[i + 1]];
                        faces.push([tri[0].vertex, tri[1].vertex, tri[2].vertex]);
                        match (tri[0].uv, tri[1].uv, tri[2].uv) {
                            (Some(a), Some(b), Some(c)) => face_uvs.push([a, b, c]),
                            _ => all_corners_have_uvs = false,
                        }
                    }
                }
                // Normals, groups, materials and the rest are ignored
                _ => {}
            }
        }

        if positions.is_empty() {
            return Err(Error::InvalidInput(format!(
                "no vertices found in {}",
                path.display()
            )));
        }

        debug!(
            path = %path.display(),
            vertices = positions.len(),
            faces = faces.len(),
            "loaded OBJ mesh"
        );

        let mut mesh = TriangleMesh::from_vertices_and_faces(positions, faces);
        if all_corners_have_uvs && !face_uvs.is_empty() {
            mesh.set_uvs(texcoords, face_uvs)?;
        }
        Ok(mesh)
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }

        match (&mesh.uvs, &mesh.face_uvs) {
            (Some(uvs), Some(face_uvs)) => {
                for uv in uvs {
                    writeln!(writer, "vt {} {}", uv[0], uv[1])?;
                }
                for (face, uv) in mesh.faces.iter().zip(face_uvs.iter()) {
                    writeln!(
                        writer,
                        "f {}/{} {}/{} {}/{}",
                        face[0] + 1,
                        uv[0] + 1,
                        face[1] + 1,
                        uv[1] + 1,
                        face[2] + 1,
                        uv[2] + 1
                    )?;
                }
            }
            _ => {
                for face in &mesh.faces {
                    writeln!(writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Parse exactly N whitespace-separated floats
fn parse_floats<'a, const N: usize>(
    mut parts: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        let token = parts.next().ok_or_else(|| {
            Error::InvalidInput(format!("too few values at line {}", line_no + 1))
        })?;
        *slot = token.parse::<f32>().map_err(|_| {
            Error::InvalidInput(format!("invalid number '{}' at line {}", token, line_no + 1))
        })?;
    }
    Ok(out)
}

/// Parse a face corner token: `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn parse_corner(
    token: &str,
    vertex_count: usize,
    texcoord_count: usize,
    line_no: usize,
) -> Result<Corner> {
    let mut fields = token.split('/');
    let vertex_field = fields.next().unwrap_or("");
    let uv_field = fields.next().unwrap_or("");

    let vertex = resolve_index(vertex_field, vertex_count, line_no)?;
    let uv = if uv_field.is_empty() {
        None
    } else {
        Some(resolve_index(uv_field, texcoord_count, line_no)?)
    };

    Ok(Corner { vertex, uv })
}

/// Resolve a 1-based (possibly negative, end-relative) OBJ index
fn resolve_index(field: &str, count: usize, line_no: usize) -> Result<usize> {
    let raw = field.parse::<i64>().map_err(|_| {
        Error::InvalidInput(format!("invalid index '{}' at line {}", field, line_no + 1))
    })?;
    let resolved = if raw > 0 {
        (raw - 1) as usize
    } else if raw < 0 {
        let back = (-raw) as usize;
        if back > count {
            return Err(Error::InvalidInput(format!(
                "index {} out of range at line {}",
                raw,
                line_no + 1
            )));
        }
        count - back
    } else {
        return Err(Error::InvalidInput(format!(
            "index 0 is not valid at line {}",
            line_no + 1
        )));
    };

    if resolved >= count {
        return Err(Error::InvalidInput(format!(
            "index {} out of range at line {}",
            raw,
            line_no + 1
        )));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_obj_roundtrip() {
        let temp_file = "test_roundtrip.obj";

        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );

        ObjWriter::write_mesh(&mesh, temp_file).unwrap();
        let loaded = ObjReader::read_mesh(temp_file).unwrap();

        assert_eq!(mesh.vertex_count(), loaded.vertex_count());
        assert_eq!(mesh.face_count(), loaded.face_count());
        for (a, b) in mesh.vertices.iter().zip(loaded.vertices.iter()) {
            assert!((a - b).norm() < 1e-6);
        }
        assert_eq!(mesh.faces, loaded.faces);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_obj_with_texcoords() {
        let temp_file = "test_texcoords.obj";

        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3
f 1/1 3/3 4/4
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face_uvs.as_ref().unwrap().len(), 2);
        assert_eq!(mesh.face_uvs.as_ref().unwrap()[0], [0, 1, 2]);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_obj_quad_triangulation() {
        let temp_file = "test_quad.obj";

        let content = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [0, 2, 3]);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_obj_negative_indices() {
        let temp_file = "test_negative.obj";

        let content = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
";
        fs::write(temp_file, content).unwrap();

        let mesh = ObjReader::read_mesh(temp_file).unwrap();
        assert_eq!(mesh.faces[0], [0, 1, 2]);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_obj_rejects_bad_data() {
        let temp_file = "test_bad_vertex.obj";
        fs::write(temp_file, "v 0.0 abc 1.0\n").unwrap();
        assert!(ObjReader::read_mesh(temp_file).is_err());

        fs::write(temp_file, "v 0 0 0\nf 1 2 3\n").unwrap();
        assert!(ObjReader::read_mesh(temp_file).is_err());

        fs::write(temp_file, "# nothing here\n").unwrap();
        assert!(ObjReader::read_mesh(temp_file).is_err());

        let _ = fs::remove_file(temp_file);
    }
}
