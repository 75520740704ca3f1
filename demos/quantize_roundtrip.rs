//! Quantization round-trip demo
//!
//! Builds a small point cloud, runs both normalization methods through
//! the quantize/dequantize round trip, and prints the reconstruction
//! error at a few bin resolutions.

use meshquant_algorithms::{
    denormalize, dequantize, mae, mse, normalize, quantize, NormalizationMethod,
};
use meshquant_core::{Point3f, PointCloud};

fn main() -> anyhow::Result<()> {
    let cloud = PointCloud::from_points(vec![
        Point3f::new(0.3, -1.2, 4.5),
        Point3f::new(2.1, 0.4, -0.7),
        Point3f::new(-3.3, 2.2, 1.1),
        Point3f::new(0.9, 0.9, 0.9),
        Point3f::new(0.0, 0.0, 0.0),
    ]);
    println!("Input cloud: {} points", cloud.len());

    for method in [NormalizationMethod::MinMax, NormalizationMethod::UnitSphere] {
        println!("\n{} normalization:", method.name());
        let (normalized, params) = normalize(&cloud, method)?;

        for num_bins in [16, 256, 1024] {
            let qset = quantize(&normalized, num_bins, method.value_range())?;
            let restored = denormalize(&dequantize(&qset), &params);
            println!(
                "  {:>5} bins -> MSE={:.8e}  MAE={:.8e}",
                num_bins,
                mse(&cloud, &restored)?,
                mae(&cloud, &restored)?
            );
        }
    }

    Ok(())
}
