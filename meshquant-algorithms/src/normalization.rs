//! Coordinate normalization strategies
//!
//! Both strategies rescale a point cloud into a bounded domain and
//! return the parameters needed to invert the mapping exactly:
//!
//! - Min–max maps each axis independently into `[0, 1]`.
//! - Unit-sphere centers the cloud on its centroid and scales it into
//!   the unit ball, so coordinates land in `[-1, 1]`.

use meshquant_core::{Bounded, Error, Point3f, PointCloud, Result, Vector3f};
use serde::{Deserialize, Serialize};

/// Normalization strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationMethod {
    MinMax,
    UnitSphere,
}

impl NormalizationMethod {
    /// Stable name used in result records and file names
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationMethod::MinMax => "minmax",
            NormalizationMethod::UnitSphere => "unit_sphere",
        }
    }

    /// The coordinate range normalized points fall into
    pub fn value_range(&self) -> (f32, f32) {
        match self {
            NormalizationMethod::MinMax => (0.0, 1.0),
            NormalizationMethod::UnitSphere => (-1.0, 1.0),
        }
    }
}

impl std::fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters recorded during normalization, sufficient for exact inversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NormalizationParams {
    MinMax { min: Vector3f, max: Vector3f },
    UnitSphere { centroid: Point3f, radius: f32 },
}

impl NormalizationParams {
    /// The method these parameters belong to
    pub fn method(&self) -> NormalizationMethod {
        match self {
            NormalizationParams::MinMax { .. } => NormalizationMethod::MinMax,
            NormalizationParams::UnitSphere { .. } => NormalizationMethod::UnitSphere,
        }
    }
}

/// Rescale a point cloud with the given strategy
///
/// Returns the normalized cloud along with the parameters needed to
/// invert the mapping. Degenerate geometry is clamped rather than
/// rejected: a zero-extent axis maps to 0.0 under min–max, and a
/// cloud of identical points collapses to the origin under
/// unit-sphere. An empty cloud is an error.
pub fn normalize(
    cloud: &PointCloud<Point3f>,
    method: NormalizationMethod,
) -> Result<(PointCloud<Point3f>, NormalizationParams)> {
    if cloud.is_empty() {
        return Err(Error::InvalidInput(
            "cannot normalize an empty point cloud".to_string(),
        ));
    }

    match method {
        NormalizationMethod::MinMax => {
            let (min, max) = cloud.bounding_box();
            let extent = max - min;

            let normalized = cloud
                .iter()
                .map(|p| {
                    let d = p - min;
                    Point3f::new(
                        norm_axis(d.x, extent.x),
                        norm_axis(d.y, extent.y),
                        norm_axis(d.z, extent.z),
                    )
                })
                .collect();

            let params = NormalizationParams::MinMax {
                min: min.coords,
                max: max.coords,
            };
            Ok((normalized, params))
        }
        NormalizationMethod::UnitSphere => {
            // Non-empty cloud, centroid always exists
            let centroid = cloud.centroid().ok_or_else(|| {
                Error::InvalidInput("cannot normalize an empty point cloud".to_string())
            })?;
            let radius = cloud
                .iter()
                .map(|p| (p - centroid).norm())
                .fold(0.0_f32, f32::max);

            let normalized = cloud
                .iter()
                .map(|p| {
                    if radius > 0.0 {
                        Point3f::from((p - centroid) / radius)
                    } else {
                        Point3f::origin()
                    }
                })
                .collect();

            let params = NormalizationParams::UnitSphere { centroid, radius };
            Ok((normalized, params))
        }
    }
}

/// Invert a normalization using its recorded parameters
pub fn denormalize(
    cloud: &PointCloud<Point3f>,
    params: &NormalizationParams,
) -> PointCloud<Point3f> {
    match params {
        NormalizationParams::MinMax { min, max } => {
            let extent = max - min;
            cloud
                .iter()
                .map(|p| {
                    Point3f::new(
                        p.x * extent.x + min.x,
                        p.y * extent.y + min.y,
                        p.z * extent.z + min.z,
                    )
                })
                .collect()
        }
        NormalizationParams::UnitSphere { centroid, radius } => cloud
            .iter()
            .map(|p| Point3f::from(p.coords * *radius + centroid.coords))
            .collect(),
    }
}

/// Single-axis min–max mapping; zero-extent axes pin to 0.0
fn norm_axis(delta: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        delta / extent
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cloud() -> PointCloud<Point3f> {
        PointCloud::from_points(vec![
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(4.0, 0.0, -1.5),
            Point3f::new(-2.0, 3.0, 2.0),
            Point3f::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_normalize_empty_fails() {
        let cloud = PointCloud::<Point3f>::new();
        assert!(normalize(&cloud, NormalizationMethod::MinMax).is_err());
        assert!(normalize(&cloud, NormalizationMethod::UnitSphere).is_err());
    }

    #[test]
    fn test_minmax_range() {
        let cloud = sample_cloud();
        let (normalized, _) = normalize(&cloud, NormalizationMethod::MinMax).unwrap();
        for p in normalized.iter() {
            for c in [p.x, p.y, p.z] {
                assert!((0.0..=1.0).contains(&c), "coordinate {} out of range", c);
            }
        }
    }

    #[test]
    fn test_minmax_roundtrip() {
        let cloud = sample_cloud();
        let (normalized, params) = normalize(&cloud, NormalizationMethod::MinMax).unwrap();
        let restored = denormalize(&normalized, &params);
        for (a, b) in cloud.iter().zip(restored.iter()) {
            approx::assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_unit_sphere_roundtrip() {
        let cloud = sample_cloud();
        let (normalized, params) = normalize(&cloud, NormalizationMethod::UnitSphere).unwrap();
        for p in normalized.iter() {
            assert!(p.coords.norm() <= 1.0 + 1e-6);
        }
        let restored = denormalize(&normalized, &params);
        for (a, b) in cloud.iter().zip(restored.iter()) {
            assert!((a - b).norm() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_axis_clamps_to_zero() {
        // All points share the same z
        let cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 2.0),
            Point3f::new(1.0, 3.0, 2.0),
        ]);
        let (normalized, params) = normalize(&cloud, NormalizationMethod::MinMax).unwrap();
        for p in normalized.iter() {
            assert_eq!(p.z, 0.0);
        }
        // Degenerate axes still invert exactly
        let restored = denormalize(&normalized, &params);
        for (a, b) in cloud.iter().zip(restored.iter()) {
            assert!((a - b).norm() < 1e-6);
        }
    }

    #[test]
    fn test_identical_points_collapse_to_origin() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(5.0, 5.0, 5.0),
            Point3f::new(5.0, 5.0, 5.0),
        ]);
        let (normalized, params) = normalize(&cloud, NormalizationMethod::UnitSphere).unwrap();
        for p in normalized.iter() {
            assert_eq!(*p, Point3f::origin());
        }
        let restored = denormalize(&normalized, &params);
        for (a, b) in cloud.iter().zip(restored.iter()) {
            assert!((a - b).norm() < 1e-6);
        }
    }

    #[test]
    fn test_params_carry_method() {
        let cloud = sample_cloud();
        let (_, params) = normalize(&cloud, NormalizationMethod::MinMax).unwrap();
        assert_eq!(params.method(), NormalizationMethod::MinMax);
        assert_eq!(params.method().value_range(), (0.0, 1.0));

        let (_, params) = normalize(&cloud, NormalizationMethod::UnitSphere).unwrap();
        assert_eq!(params.method(), NormalizationMethod::UnitSphere);
        assert_eq!(params.method().value_range(), (-1.0, 1.0));
    }
}
