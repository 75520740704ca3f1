//! Per-mesh processing
//!
//! Runs one mesh through both normalization methods, the uniform
//! quantize/dequantize round trip, and error evaluation. Pure with
//! respect to the filesystem; writing artifacts is the batch layer's
//! job.

use crate::config::PipelineConfig;
use meshquant_algorithms::{
    dequantize, denormalize, mae, mse, normalize, quantize, NormalizationMethod,
    ReconstructionRecord,
};
use meshquant_core::{Point3f, PointCloud, Result};
use tracing::info;

/// Everything produced for a single mesh
#[derive(Debug, Clone)]
pub struct MeshReport {
    pub records: Vec<ReconstructionRecord>,
    /// Reconstructed vertex positions per method, in record order
    pub reconstructed: Vec<(NormalizationMethod, PointCloud<Point3f>)>,
}

/// Both normalization methods, in the order records are reported
pub const METHODS: [NormalizationMethod; 2] =
    [NormalizationMethod::MinMax, NormalizationMethod::UnitSphere];

/// Run the normalize → quantize → dequantize → denormalize round trip
/// for every method and evaluate reconstruction error against the
/// original vertices.
pub fn process_cloud(
    mesh_name: &str,
    cloud: &PointCloud<Point3f>,
    config: &PipelineConfig,
) -> Result<MeshReport> {
    config.validate()?;

    let mut records = Vec::with_capacity(METHODS.len());
    let mut reconstructed = Vec::with_capacity(METHODS.len());

    for method in METHODS {
        let (normalized, params) = normalize(cloud, method)?;
        let qset = quantize(&normalized, config.num_bins, method.value_range())?;
        let dequantized = dequantize(&qset);
        let restored = denormalize(&dequantized, &params);

        let record = ReconstructionRecord {
            mesh: mesh_name.to_string(),
            method,
            mse: mse(cloud, &restored)?,
            mae: mae(cloud, &restored)?,
        };
        info!(
            mesh = mesh_name,
            method = method.name(),
            mse = record.mse,
            mae = record.mae,
            "evaluated reconstruction"
        );

        records.push(record);
        reconstructed.push((method, restored));
    }

    Ok(MeshReport {
        records,
        reconstructed,
    })
}
