//! Uniform scalar quantization
//!
//! Maps normalized coordinates onto a fixed number of evenly spaced
//! integer bins and back. Quantize/dequantize are pure transforms;
//! the only information lost is the sub-bin position.

use meshquant_core::{Error, Point3f, PointCloud, Result};
use serde::{Deserialize, Serialize};

/// A point cloud quantized to integer bin indices
///
/// Keeps the bin count and value range it was produced with so it can
/// be dequantized without external bookkeeping. Invariant: every
/// index lies in `[0, num_bins - 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantizedPointSet {
    pub indices: Vec<[u32; 3]>,
    pub num_bins: u32,
    pub range: (f32, f32),
}

impl QuantizedPointSet {
    /// Number of quantized points
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Validate a bin count / value range pair
fn check_config(num_bins: u32, range: (f32, f32)) -> Result<()> {
    if num_bins < 2 {
        return Err(Error::InvalidConfig(format!(
            "num_bins must be >= 2, got {}",
            num_bins
        )));
    }
    if !(range.1 > range.0) {
        return Err(Error::InvalidConfig(format!(
            "value range ({}, {}) is empty or inverted",
            range.0, range.1
        )));
    }
    Ok(())
}

/// Quantize a cloud of normalized points to `num_bins` levels per axis
///
/// Coordinates are mapped into `[0, 1]` over `range`, clamped, then
/// rounded to the nearest of `num_bins` evenly spaced bins.
pub fn quantize(
    cloud: &PointCloud<Point3f>,
    num_bins: u32,
    range: (f32, f32),
) -> Result<QuantizedPointSet> {
    check_config(num_bins, range)?;

    let (a, b) = range;
    let scale = (num_bins - 1) as f32;
    let indices = cloud
        .iter()
        .map(|p| {
            let mut q = [0u32; 3];
            for (axis, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                let t = ((v - a) / (b - a)).clamp(0.0, 1.0);
                q[axis] = ((t * scale + 0.5).floor() as u32).min(num_bins - 1);
            }
            q
        })
        .collect();

    Ok(QuantizedPointSet {
        indices,
        num_bins,
        range,
    })
}

/// Map bin indices back to coordinates at the bin centers
pub fn dequantize(qset: &QuantizedPointSet) -> PointCloud<Point3f> {
    let (a, b) = qset.range;
    let scale = (qset.num_bins - 1) as f32;
    qset.indices
        .iter()
        .map(|q| {
            Point3f::new(
                a + (q[0] as f32 / scale) * (b - a),
                a + (q[1] as f32 / scale) * (b - a),
                a + (q[2] as f32 / scale) * (b - a),
            )
        })
        .collect()
}
