//! Density-adaptive quantization
//!
//! Instead of one global bin width, every point is quantized with a
//! width derived from its local neighborhood density: crowded regions
//! get fine bins, sparse regions get coarse ones. Widths are clamped
//! to a configured `[min_width, max_width]` so the bin count stays
//! bounded.
//!
//! The width policy is `max_width / (1 + density)` where density is
//! the neighbor count inside `neighborhood_radius` (the point itself
//! excluded). An isolated point therefore gets exactly `max_width`.

use crate::nearest_neighbor::GridSearch;
use meshquant_core::{Error, NearestNeighborSearch, Point3f, PointCloud, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Knobs for density-adaptive quantization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Radius of the ball used to count neighbors
    pub neighborhood_radius: f32,
    /// Finest allowed bin width
    pub min_width: f32,
    /// Coarsest allowed bin width, also the width of isolated points
    pub max_width: f32,
}

impl AdaptiveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighborhood_radius <= 0.0 || !self.neighborhood_radius.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "neighborhood_radius must be positive, got {}",
                self.neighborhood_radius
            )));
        }
        if self.min_width <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_width must be positive, got {}",
                self.min_width
            )));
        }
        if self.min_width > self.max_width {
            return Err(Error::InvalidConfig(format!(
                "min_width {} exceeds max_width {}",
                self.min_width, self.max_width
            )));
        }
        Ok(())
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        // Tuned for unit-sphere normalized coordinates in [-1, 1]
        Self {
            neighborhood_radius: 0.1,
            min_width: 5.0e-4,
            max_width: 1.0e-2,
        }
    }
}

/// A point cloud quantized with per-point bin widths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveQuantizedPointSet {
    pub indices: Vec<[u32; 3]>,
    pub widths: Vec<f32>,
    pub range: (f32, f32),
}

impl AdaptiveQuantizedPointSet {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Average bin width actually used, for uniform-vs-adaptive reports
    pub fn mean_width(&self) -> f32 {
        if self.widths.is_empty() {
            return 0.0;
        }
        self.widths.iter().sum::<f32>() / self.widths.len() as f32
    }
}

/// Count neighbors within `radius` of each point, self excluded
pub fn compute_local_density(cloud: &PointCloud<Point3f>, radius: f32) -> Result<Vec<f32>> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "neighborhood_radius must be positive, got {}",
            radius
        )));
    }
    if cloud.is_empty() {
        return Ok(Vec::new());
    }

    let index = GridSearch::with_cell_size(cloud, radius)?;
    let densities = cloud
        .points
        .par_iter()
        .map(|p| {
            // The query point is always its own neighbor
            (index.find_radius_neighbors(p, radius).len() - 1) as f32
        })
        .collect();
    Ok(densities)
}

/// Map local densities to clamped bin widths
pub fn adaptive_bin_widths(densities: &[f32], config: &AdaptiveConfig) -> Result<Vec<f32>> {
    config.validate()?;
    Ok(densities
        .iter()
        .map(|&d| (config.max_width / (1.0 + d)).clamp(config.min_width, config.max_width))
        .collect())
}

/// Quantize each point with its own bin width
pub fn quantize_adaptive(
    cloud: &PointCloud<Point3f>,
    widths: &[f32],
    range: (f32, f32),
) -> Result<AdaptiveQuantizedPointSet> {
    if widths.len() != cloud.len() {
        return Err(Error::LengthMismatch {
            expected: cloud.len(),
            actual: widths.len(),
        });
    }
    if !(range.1 > range.0) {
        return Err(Error::InvalidConfig(format!(
            "value range ({}, {}) is empty or inverted",
            range.0, range.1
        )));
    }
    if let Some(w) = widths.iter().find(|w| **w <= 0.0 || !w.is_finite()) {
        return Err(Error::InvalidConfig(format!(
            "bin widths must be positive and finite, got {}",
            w
        )));
    }

    let (a, b) = range;
    let indices = cloud
        .iter()
        .zip(widths.iter())
        .map(|(p, &w)| {
            let mut q = [0u32; 3];
            for (axis, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                let t = v.clamp(a, b) - a;
                q[axis] = ((t / w) + 0.5).floor() as u32;
            }
            q
        })
        .collect();

    Ok(AdaptiveQuantizedPointSet {
        indices,
        widths: widths.to_vec(),
        range,
    })
}

/// Map adaptive bin indices back to coordinates
pub fn dequantize_adaptive(qset: &AdaptiveQuantizedPointSet) -> PointCloud<Point3f> {
    let (a, b) = qset.range;
    qset.indices
        .iter()
        .zip(qset.widths.iter())
        .map(|(q, &w)| {
            Point3f::new(
                (a + q[0] as f32 * w).clamp(a, b),
                (a + q[1] as f32 * w).clamp(a, b),
                (a + q[2] as f32 * w).clamp(a, b),
            )
        })
        .collect()
}

/// Density estimation, width assignment and quantization in one step
pub fn adaptive_quantize(
    cloud: &PointCloud<Point3f>,
    config: &AdaptiveConfig,
    range: (f32, f32),
) -> Result<AdaptiveQuantizedPointSet> {
    config.validate()?;
    let densities = compute_local_density(cloud, config.neighborhood_radius)?;
    let widths = adaptive_bin_widths(&densities, config)?;
    let qset = quantize_adaptive(cloud, &widths, range)?;
    debug!(
        points = cloud.len(),
        mean_width = qset.mean_width(),
        "adaptive quantization complete"
    );
    Ok(qset)
}
