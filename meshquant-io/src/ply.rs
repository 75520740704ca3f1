//! PLY format support
//!
//! The pipeline exports reconstructed geometry as PLY so the lossy
//! round-trip can be inspected in standard viewers. Only writing is
//! supported; meshes are loaded from OBJ.

use crate::{MeshWriter, PointCloudWriter};
use meshquant_core::{Point3f, PointCloud, Result, TriangleMesh};
use ply_rs::{
    ply::{
        Addable, DefaultElement, ElementDef, Ply, Property, PropertyDef, PropertyType, ScalarType,
    },
    writer::Writer,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct PlyWriter;

fn vertex_element_def(count: usize) -> ElementDef {
    let mut vertex_element = ElementDef::new("vertex".to_string());
    vertex_element.count = count;
    for name in ["x", "y", "z"] {
        vertex_element.properties.add(PropertyDef::new(
            name.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    vertex_element
}

fn vertex_payload(points: &[Point3f]) -> Vec<DefaultElement> {
    points
        .iter()
        .map(|point| {
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(point.x));
            vertex.insert("y".to_string(), Property::Float(point.y));
            vertex.insert("z".to_string(), Property::Float(point.z));
            vertex
        })
        .collect()
}

impl PointCloudWriter for PlyWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud<Point3f>, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.comments.push("exported by meshquant".to_string());
        ply.header.elements.add(vertex_element_def(cloud.len()));
        ply.payload
            .insert("vertex".to_string(), vertex_payload(&cloud.points));

        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;

        Ok(())
    }
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.comments.push("exported by meshquant".to_string());
        ply.header.elements.add(vertex_element_def(mesh.vertex_count()));

        let mut face_element = ElementDef::new("face".to_string());
        face_element.count = mesh.face_count();
        face_element.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::Int),
        ));
        ply.header.elements.add(face_element);

        ply.payload
            .insert("vertex".to_string(), vertex_payload(&mesh.vertices));

        let faces = mesh
            .faces
            .iter()
            .map(|face| {
                let mut element = DefaultElement::new();
                let indices = vec![face[0] as i32, face[1] as i32, face[2] as i32];
                element.insert("vertex_indices".to_string(), Property::ListInt(indices));
                element
            })
            .collect();
        ply.payload.insert("face".to_string(), faces);

        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;

        Ok(())
    }
}
