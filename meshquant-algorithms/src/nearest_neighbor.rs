//! Nearest neighbor search implementations
//!
//! Density estimation only needs radius queries, so alongside the
//! brute-force fallback there is a uniform-grid index whose cell size
//! matches the query radius: a radius query then touches at most 27
//! cells.

use meshquant_core::{NearestNeighborSearch, Point3f, PointCloud, Result};
use std::collections::HashMap;

/// Simple brute force nearest neighbor search for small datasets
pub struct BruteForceSearch {
    points: Vec<Point3f>,
}

impl BruteForceSearch {
    pub fn new(points: &[Point3f]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }
}

impl NearestNeighborSearch for BruteForceSearch {
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        let mut distances: Vec<(usize, f32)> = self
            .points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, (point - query).norm()))
            .collect();

        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(k);
        distances
    }

    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)> {
        let radius_squared = radius * radius;
        self.points
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| {
                let distance_squared = (point - query).norm_squared();
                if distance_squared <= radius_squared {
                    Some((idx, distance_squared.sqrt()))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Uniform-grid spatial index for fixed-radius neighbor queries
pub struct GridSearch {
    points: Vec<Point3f>,
    cell_size: f32,
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
}

impl GridSearch {
    /// Build an index with the given cell size
    ///
    /// For radius queries at radius `r`, a cell size of `r` keeps the
    /// candidate scan to the 3x3x3 cell neighborhood.
    pub fn with_cell_size(cloud: &PointCloud<Point3f>, cell_size: f32) -> Result<Self> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(meshquant_core::Error::InvalidConfig(format!(
                "grid cell size must be positive and finite, got {}",
                cell_size
            )));
        }

        let mut cells: HashMap<(i32, i32, i32), Vec<usize>> = HashMap::new();
        for (idx, point) in cloud.iter().enumerate() {
            cells
                .entry(Self::cell_of(point, cell_size))
                .or_default()
                .push(idx);
        }

        Ok(Self {
            points: cloud.points.clone(),
            cell_size,
            cells,
        })
    }

    fn cell_of(point: &Point3f, cell_size: f32) -> (i32, i32, i32) {
        (
            (point.x / cell_size).floor() as i32,
            (point.y / cell_size).floor() as i32,
            (point.z / cell_size).floor() as i32,
        )
    }
}

impl NearestNeighborSearch for GridSearch {
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        // k queries are rare in this pipeline; fall back to a full scan
        BruteForceSearch::new(&self.points).find_k_nearest(query, k)
    }

    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)> {
        let radius_squared = radius * radius;
        let reach = (radius / self.cell_size).ceil() as i32;
        let (cx, cy, cz) = Self::cell_of(query, self.cell_size);

        let mut neighbors = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                for dz in -reach..=reach {
                    let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in indices {
                        let distance_squared = (self.points[idx] - query).norm_squared();
                        if distance_squared <= radius_squared {
                            neighbors.push((idx, distance_squared.sqrt()));
                        }
                    }
                }
            }
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_cloud() -> PointCloud<Point3f> {
        PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.05, 0.0, 0.0),
            Point3f::new(0.0, 0.05, 0.0),
            Point3f::new(2.0, 2.0, 2.0),
        ])
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let cloud = cluster_cloud();
        let brute = BruteForceSearch::new(&cloud.points);
        let grid = GridSearch::with_cell_size(&cloud, 0.1).unwrap();

        for point in cloud.iter() {
            let mut a: Vec<usize> = brute
                .find_radius_neighbors(point, 0.1)
                .into_iter()
                .map(|(i, _)| i)
                .collect();
            let mut b: Vec<usize> = grid
                .find_radius_neighbors(point, 0.1)
                .into_iter()
                .map(|(i, _)| i)
                .collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_grid_rejects_bad_cell_size() {
        let cloud = cluster_cloud();
        assert!(GridSearch::with_cell_size(&cloud, 0.0).is_err());
        assert!(GridSearch::with_cell_size(&cloud, -1.0).is_err());
    }

    #[test]
    fn test_k_nearest_orders_by_distance() {
        let cloud = cluster_cloud();
        let brute = BruteForceSearch::new(&cloud.points);
        let result = brute.find_k_nearest(&Point3f::new(0.0, 0.0, 0.0), 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].0, 0);
        assert!(result[0].1 <= result[1].1 && result[1].1 <= result[2].1);
    }
}
