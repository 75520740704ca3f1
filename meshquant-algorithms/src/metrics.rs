//! Reconstruction error metrics
//!
//! Mean squared and mean absolute error between an original and a
//! reconstructed point cloud, averaged over every coordinate of
//! every point. Accumulation is done in f64 so large clouds don't
//! lose precision.

use crate::normalization::NormalizationMethod;
use meshquant_core::{Error, Point3f, PointCloud, Result};
use serde::{Deserialize, Serialize};

/// Evaluated reconstruction error for one (mesh, method) pair
///
/// Written once to the summary table and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionRecord {
    pub mesh: String,
    pub method: NormalizationMethod,
    pub mse: f64,
    pub mae: f64,
}

fn check_lengths(original: &PointCloud<Point3f>, reconstructed: &PointCloud<Point3f>) -> Result<()> {
    if original.len() != reconstructed.len() {
        return Err(Error::LengthMismatch {
            expected: original.len(),
            actual: reconstructed.len(),
        });
    }
    if original.is_empty() {
        return Err(Error::InvalidInput(
            "error metrics are undefined for empty point clouds".to_string(),
        ));
    }
    Ok(())
}

/// Mean squared error over all coordinates
pub fn mse(original: &PointCloud<Point3f>, reconstructed: &PointCloud<Point3f>) -> Result<f64> {
    check_lengths(original, reconstructed)?;

    let sum: f64 = original
        .iter()
        .zip(reconstructed.iter())
        .map(|(a, b)| {
            let d = a - b;
            (d.x as f64).powi(2) + (d.y as f64).powi(2) + (d.z as f64).powi(2)
        })
        .sum();

    Ok(sum / (original.len() * 3) as f64)
}

/// Mean absolute error over all coordinates
pub fn mae(original: &PointCloud<Point3f>, reconstructed: &PointCloud<Point3f>) -> Result<f64> {
    check_lengths(original, reconstructed)?;

    let sum: f64 = original
        .iter()
        .zip(reconstructed.iter())
        .map(|(a, b)| {
            let d = a - b;
            (d.x as f64).abs() + (d.y as f64).abs() + (d.z as f64).abs()
        })
        .sum();

    Ok(sum / (original.len() * 3) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_identical_clouds() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(1.0, 2.0, 3.0),
            Point3f::new(-4.0, 5.0, -6.0),
        ]);
        assert_eq!(mse(&cloud, &cloud).unwrap(), 0.0);
        assert_eq!(mae(&cloud, &cloud).unwrap(), 0.0);
    }

    #[test]
    fn test_known_values() {
        let a = PointCloud::from_points(vec![Point3f::new(0.0, 0.0, 0.0)]);
        let b = PointCloud::from_points(vec![Point3f::new(1.0, 2.0, 2.0)]);
        // squared diffs: 1 + 4 + 4 = 9, over 3 coordinates
        assert!((mse(&a, &b).unwrap() - 3.0).abs() < 1e-12);
        // abs diffs: 1 + 2 + 2 = 5, over 3 coordinates
        assert!((mae(&a, &b).unwrap() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_nonnegative_and_positive_when_different() {
        let a = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 1.0),
        ]);
        let mut b = a.clone();
        b[1].x += 0.001;
        assert!(mse(&a, &b).unwrap() > 0.0);
        assert!(mae(&a, &b).unwrap() > 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let a = PointCloud::from_points(vec![Point3f::origin()]);
        let b = PointCloud::from_points(vec![Point3f::origin(), Point3f::origin()]);
        assert!(matches!(
            mse(&a, &b),
            Err(Error::LengthMismatch {
                expected: 1,
                actual: 2
            })
        ));
        assert!(mae(&a, &b).is_err());
    }

    #[test]
    fn test_empty_clouds_rejected() {
        let empty = PointCloud::<Point3f>::new();
        assert!(mse(&empty, &empty).is_err());
        assert!(mae(&empty, &empty).is_err());
    }
}
