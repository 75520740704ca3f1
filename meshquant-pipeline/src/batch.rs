//! Batch orchestration
//!
//! Discovers mesh files, runs each through the full pipeline in
//! parallel, and writes all result artifacts. Every mesh is processed
//! in isolation: normalization and quantization parameters are never
//! shared, and a failing mesh is recorded and skipped rather than
//! aborting the batch.

use crate::config::PipelineConfig;
use crate::experiment::adaptive_comparison;
use crate::process::process_cloud;
use meshquant_algorithms::{extract_seams, tokenize, ReconstructionRecord};
use meshquant_core::{Error, Result};
use meshquant_io::{read_mesh, write_mesh, write_summary, write_tokens};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A mesh that could not be processed, with the reason
#[derive(Debug, Clone)]
pub struct MeshFailure {
    pub mesh: String,
    pub error: String,
}

/// Outcome of a whole batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub records: Vec<ReconstructionRecord>,
    pub failures: Vec<MeshFailure>,
    /// Total number of mesh files attempted
    pub attempted: usize,
}

/// File name of the results table inside the output directory
pub const SUMMARY_FILE: &str = "results_summary.csv";

/// Collect and sort the mesh files in a directory
fn discover_meshes(mesh_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(mesh_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("obj"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no .obj meshes found in {}",
            mesh_dir.display()
        )));
    }
    Ok(paths)
}

/// Process one mesh end to end, writing its per-mesh artifacts
fn run_one(path: &Path, output_dir: &Path, config: &PipelineConfig) -> Result<Vec<ReconstructionRecord>> {
    let mesh_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mesh = read_mesh(path)?;
    let cloud = mesh.vertex_cloud();
    info!(mesh = %mesh_name, vertices = cloud.len(), "processing mesh");

    // Normalization / quantization round trips
    let report = process_cloud(&mesh_name, &cloud, config)?;
    for (method, restored) in &report.reconstructed {
        let mut reconstructed_mesh = mesh.clone();
        reconstructed_mesh.set_vertices(restored.points.clone())?;
        let out = output_dir.join(format!("reconstructed_{}_{}.ply", method.name(), stem));
        write_mesh(&reconstructed_mesh, out)?;
    }

    // Seam tokenization
    let tokens = tokenize(&extract_seams(&mesh));
    write_tokens(&tokens, output_dir.join(format!("seam_tokens_{}.txt", stem)))?;

    // Adaptive vs. uniform comparison
    let comparison = adaptive_comparison(&mesh_name, &cloud, config)?;
    fs::write(
        output_dir.join(format!("adaptive_results_{}.txt", stem)),
        comparison.to_report(),
    )?;

    Ok(report.records)
}

/// Run the pipeline over every mesh in a directory
pub fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
    mesh_dir: P,
    output_dir: Q,
    config: &PipelineConfig,
) -> Result<BatchSummary> {
    config.validate()?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let paths = discover_meshes(mesh_dir.as_ref())?;
    let attempted = paths.len();

    // Embarrassingly parallel across meshes; each run is isolated
    let outcomes: Vec<std::result::Result<Vec<ReconstructionRecord>, MeshFailure>> = paths
        .par_iter()
        .map(|path| {
            run_one(path, output_dir, config).map_err(|e| MeshFailure {
                mesh: path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
                error: e.to_string(),
            })
        })
        .collect();

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(mesh_records) => records.extend(mesh_records),
            Err(failure) => {
                warn!(mesh = %failure.mesh, error = %failure.error, "mesh failed");
                failures.push(failure);
            }
        }
    }

    if !records.is_empty() {
        write_summary(&records, output_dir.join(SUMMARY_FILE))?;
    }

    info!(
        attempted,
        succeeded = attempted - failures.len(),
        failed = failures.len(),
        "batch complete"
    );
    Ok(BatchSummary {
        records,
        failures,
        attempted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_workspace(tag: &str) -> (PathBuf, PathBuf) {
        let base = env::temp_dir().join(format!("meshquant_batch_{}", tag));
        let meshes = base.join("meshes");
        let outputs = base.join("outputs");
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&meshes).unwrap();
        (meshes, outputs)
    }

    const TRIANGLE_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.25
v 0.5 1.0 0.75
f 1 2 3
";

    #[test]
    fn test_batch_writes_artifacts() {
        let (meshes, outputs) = temp_workspace("ok");
        fs::write(meshes.join("tri.obj"), TRIANGLE_OBJ).unwrap();

        let config = PipelineConfig {
            versions: 2,
            ..Default::default()
        };
        let summary = run_batch(&meshes, &outputs, &config).unwrap();

        assert_eq!(summary.attempted, 1);
        assert!(summary.failures.is_empty());
        assert_eq!(summary.records.len(), 2);

        assert!(outputs.join(SUMMARY_FILE).exists());
        assert!(outputs.join("reconstructed_minmax_tri.ply").exists());
        assert!(outputs.join("reconstructed_unit_sphere_tri.ply").exists());
        assert!(outputs.join("seam_tokens_tri.txt").exists());
        assert!(outputs.join("adaptive_results_tri.txt").exists());

        // A lone triangle is all boundary: three seam tokens
        let tokens = fs::read_to_string(outputs.join("seam_tokens_tri.txt")).unwrap();
        assert_eq!(tokens.lines().count(), 3);

        let _ = fs::remove_dir_all(meshes.parent().unwrap());
    }

    #[test]
    fn test_failed_mesh_does_not_abort_batch() {
        let (meshes, outputs) = temp_workspace("partial");
        fs::write(meshes.join("good.obj"), TRIANGLE_OBJ).unwrap();
        fs::write(meshes.join("broken.obj"), "v 0.0 nope 1.0\n").unwrap();

        let config = PipelineConfig {
            versions: 1,
            ..Default::default()
        };
        let summary = run_batch(&meshes, &outputs, &config).unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].mesh, "broken.obj");
        // The good mesh still produced its records and summary row
        assert_eq!(summary.records.len(), 2);
        assert!(outputs.join(SUMMARY_FILE).exists());

        let _ = fs::remove_dir_all(meshes.parent().unwrap());
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let (meshes, outputs) = temp_workspace("empty");
        let result = run_batch(&meshes, &outputs, &PipelineConfig::default());
        assert!(result.is_err());
        let _ = fs::remove_dir_all(meshes.parent().unwrap());
    }
}
