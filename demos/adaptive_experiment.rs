//! Adaptive vs. uniform quantization demo
//!
//! Generates a synthetic cloud with strongly non-uniform density and
//! runs the rotation/translation-invariant comparison experiment.

use meshquant_core::{Point3f, PointCloud};
use meshquant_pipeline::{adaptive_comparison, PipelineConfig};

fn main() -> anyhow::Result<()> {
    // Dense spiral near the origin plus a sparse outer shell
    let mut points = Vec::new();
    for i in 0..400 {
        let t = i as f32 * 0.05;
        points.push(Point3f::new(
            0.1 * t.cos() * t.sqrt() * 0.1,
            0.1 * t.sin() * t.sqrt() * 0.1,
            0.002 * t,
        ));
    }
    for i in 0..20 {
        let t = i as f32 * 0.7;
        points.push(Point3f::new(3.0 * t.cos(), 3.0 * t.sin(), (i % 5) as f32));
    }
    let cloud = PointCloud::from_points(points);

    let config = PipelineConfig::default();
    let result = adaptive_comparison("synthetic", &cloud, &config)?;
    print!("{}", result.to_report());

    Ok(())
}
