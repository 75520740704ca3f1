//! Seam extraction and tokenization
//!
//! A seam is an edge where the mesh parameterization breaks: either a
//! boundary edge (referenced by exactly one face) or an edge whose two
//! adjacent faces assign different UV indices to a shared vertex (the
//! border between two UV islands). Seam edges are encoded as a flat
//! sequence of `SEAM_{a}_{b}` symbols.

use meshquant_core::{Error, Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A seam edge as a canonical vertex index pair, smaller index first
pub type SeamEdge = (usize, usize);

/// An ordered sequence of seam tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeamTokenSequence {
    pub tokens: Vec<String>,
}

impl SeamTokenSequence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<String> {
        self.tokens.iter()
    }
}

/// Per-edge adjacency built from face enumeration
struct EdgeInfo {
    /// Faces referencing this edge, in enumeration order
    faces: Vec<usize>,
}

fn canonical(a: usize, b: usize) -> SeamEdge {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Extract seam edges from mesh topology
///
/// Output order is the first-occurrence order of each edge under
/// face/edge enumeration, deduplicated, so the same mesh always
/// yields the same sequence. A closed mesh without UV data has no
/// seams and yields an empty vector.
pub fn extract_seams(mesh: &TriangleMesh) -> Vec<SeamEdge> {
    let mut order: Vec<SeamEdge> = Vec::new();
    let mut edges: HashMap<SeamEdge, EdgeInfo> = HashMap::new();

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for corner in 0..3 {
            let edge = canonical(face[corner], face[(corner + 1) % 3]);
            match edges.get_mut(&edge) {
                Some(info) => info.faces.push(face_idx),
                None => {
                    order.push(edge);
                    edges.insert(
                        edge,
                        EdgeInfo {
                            faces: vec![face_idx],
                        },
                    );
                }
            }
        }
    }

    let seams: Vec<SeamEdge> = order
        .into_iter()
        .filter(|edge| {
            let info = &edges[edge];
            match info.faces.as_slice() {
                // Boundary edge
                [_] => true,
                [f0, f1] => uv_discontinuous(mesh, *edge, *f0, *f1),
                // Non-manifold edges are parameterization breaks too
                _ => true,
            }
        })
        .collect();

    debug!(
        faces = mesh.face_count(),
        seams = seams.len(),
        "seam extraction complete"
    );
    seams
}

/// Check whether two faces sharing `edge` assign it different UV indices
fn uv_discontinuous(mesh: &TriangleMesh, edge: SeamEdge, f0: usize, f1: usize) -> bool {
    let Some(face_uvs) = &mesh.face_uvs else {
        return false;
    };

    let uv_of = |face_idx: usize, vertex: usize| -> Option<usize> {
        let face = &mesh.faces[face_idx];
        let corner = face.iter().position(|&v| v == vertex)?;
        Some(face_uvs[face_idx][corner])
    };

    for vertex in [edge.0, edge.1] {
        match (uv_of(f0, vertex), uv_of(f1, vertex)) {
            (Some(a), Some(b)) if a != b => return true,
            _ => {}
        }
    }
    false
}

/// Encode seam edges as discrete symbols
pub fn tokenize(seams: &[SeamEdge]) -> SeamTokenSequence {
    SeamTokenSequence {
        tokens: seams
            .iter()
            .map(|(a, b)| format!("SEAM_{}_{}", a, b))
            .collect(),
    }
}

/// Decode a token sequence back into seam edges
pub fn decode(sequence: &SeamTokenSequence) -> Result<Vec<SeamEdge>> {
    sequence
        .iter()
        .map(|token| {
            let rest = token
                .strip_prefix("SEAM_")
                .ok_or_else(|| Error::InvalidInput(format!("malformed seam token: {}", token)))?;
            let (a, b) = rest
                .split_once('_')
                .ok_or_else(|| Error::InvalidInput(format!("malformed seam token: {}", token)))?;
            let a = a
                .parse::<usize>()
                .map_err(|_| Error::InvalidInput(format!("malformed seam token: {}", token)))?;
            let b = b
                .parse::<usize>()
                .map_err(|_| Error::InvalidInput(format!("malformed seam token: {}", token)))?;
            Ok((a, b))
        })
        .collect()
}
