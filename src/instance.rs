//! Module for parsing and representing delivery route instances.
//!
//! An instance is a set of 2-D locations with Euclidean distances. The full
//! pairwise distance matrix is computed once at construction time and is
//! read-only for the rest of the computation.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

/// Represents a delivery location in a route instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Location identifier (1-indexed in files, 0-indexed internally)
    pub id: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Location {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Location { id, x, y }
    }

    /// Euclidean distance to another location
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Represents a complete route instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteInstance {
    /// Name of the instance
    pub name: String,
    /// Comment/description
    pub comment: String,
    /// Number of locations (including the depot at index 0)
    pub dimension: usize,
    /// List of all locations
    pub locations: Vec<Location>,
    /// Precomputed distance matrix
    #[serde(skip)]
    pub distance_matrix: Vec<Vec<f64>>,
}

impl RouteInstance {
    /// Build an instance from raw coordinates.
    ///
    /// Locations get 0-indexed ids in input order. Rejects an empty point
    /// set and non-finite coordinates before any matrix construction.
    pub fn from_points(name: &str, points: &[(f64, f64)]) -> Result<Self, String> {
        if points.is_empty() {
            return Err("Instance must contain at least one location".to_string());
        }
        for (i, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(format!(
                    "Non-finite coordinates for location {}: ({}, {})",
                    i, x, y
                ));
            }
        }

        let locations: Vec<Location> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Location::new(i, x, y))
            .collect();

        let distance_matrix = Self::compute_distance_matrix(&locations);

        Ok(RouteInstance {
            name: name.to_string(),
            comment: String::new(),
            dimension: locations.len(),
            locations,
            distance_matrix,
        })
    }

    /// Parse a route instance from a coordinate-list file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(&path).map_err(|e| format!("Cannot open file: {}", e))?;
        let reader = BufReader::new(file);

        let mut name = String::new();
        let mut comment = String::new();
        let mut dimension = 0usize;
        let mut coords: Vec<(f64, f64)> = Vec::new();

        let mut section = String::new();

        for line in reader.lines() {
            let line = line.map_err(|e| format!("Read error: {}", e))?;
            let line = line.trim();

            if line.is_empty() || line == "EOF" {
                continue;
            }

            if line.starts_with("NAME:") {
                name = line.replace("NAME:", "").trim().to_string();
                continue;
            }
            if line.starts_with("COMMENT:") {
                comment = line.replace("COMMENT:", "").trim().to_string();
                continue;
            }
            if line.starts_with("DIMENSION:") {
                dimension = line
                    .replace("DIMENSION:", "")
                    .trim()
                    .parse()
                    .map_err(|_| "Invalid dimension")?;
                continue;
            }

            if line.starts_with("NODE_COORD_SECTION") {
                section = "coords".to_string();
                continue;
            }

            if section == "coords" {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 3 {
                    let x: f64 = parts[1].parse().map_err(|_| "Invalid x coordinate")?;
                    let y: f64 = parts[2].parse().map_err(|_| "Invalid y coordinate")?;
                    coords.push((x, y));
                }
            }
        }

        if coords.is_empty() {
            return Err("Instance file contains no coordinates".to_string());
        }
        if dimension != 0 && coords.len() != dimension {
            return Err(format!(
                "DIMENSION is {} but {} coordinates found",
                dimension,
                coords.len()
            ));
        }

        let mut instance = Self::from_points(&name, &coords)?;
        instance.comment = comment;
        Ok(instance)
    }

    /// Write the instance to a coordinate-list file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let mut contents = String::new();
        contents.push_str(&format!("NAME: {}\n", self.name));
        if !self.comment.is_empty() {
            contents.push_str(&format!("COMMENT: {}\n", self.comment));
        }
        contents.push_str(&format!("DIMENSION: {}\n", self.dimension));
        contents.push_str("NODE_COORD_SECTION\n");
        for location in &self.locations {
            contents.push_str(&format!(
                "{} {} {}\n",
                location.id + 1,
                location.x,
                location.y
            ));
        }
        contents.push_str("EOF\n");

        std::fs::write(&path, contents).map_err(|e| format!("Cannot write file: {}", e))
    }

    /// Generate an instance with coordinates drawn uniformly from [0, extent).
    /// Deterministic for a given seed.
    pub fn generate_random(name: &str, n: usize, seed: u64, extent: f64) -> Result<Self, String> {
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;

        if n == 0 {
            return Err("Instance must contain at least one location".to_string());
        }
        if !extent.is_finite() || extent <= 0.0 {
            return Err(format!("Invalid coordinate extent: {}", extent));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)))
            .collect();

        let mut instance = Self::from_points(name, &points)?;
        instance.comment = format!("uniform in [0, {}) with seed {}", extent, seed);
        Ok(instance)
    }

    /// Compute the Euclidean distance matrix.
    ///
    /// Each unordered pair is computed once and written to both entries;
    /// diagonal entries stay at the 0.0 default.
    fn compute_distance_matrix(locations: &[Location]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i + 1..n {
                let d = locations[i].distance_to(&locations[j]);
                debug!("Distance between location {} and location {}: {}", i, j, d);
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }

        matrix
    }

    /// Get the distance between two locations
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    /// Calculate total tour length.
    ///
    /// Sums matrix lookups over each consecutive pair. Tours carry their
    /// closing depot index explicitly, so no implicit return arc is added.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        for i in 0..tour.len() - 1 {
            length += self.distance(tour[i], tour[i + 1]);
        }

        length
    }

    /// Check that a tour is a closed walk over all locations: N+1 entries,
    /// anchored at the depot on both ends, every location visited exactly once.
    pub fn is_closed_tour(&self, tour: &[usize]) -> bool {
        if tour.len() != self.dimension + 1 {
            return false;
        }
        if tour[0] != 0 || tour[tour.len() - 1] != 0 {
            return false;
        }
        if tour.iter().any(|&loc| loc >= self.dimension) {
            return false;
        }

        let unique: HashSet<usize> = tour[..tour.len() - 1].iter().cloned().collect();
        unique.len() == self.dimension
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let mut distances: Vec<f64> = Vec::new();
        for i in 0..self.dimension {
            for j in i + 1..self.dimension {
                distances.push(self.distance(i, j));
            }
        }

        let (avg_distance, min_distance, max_distance) = if distances.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let avg = distances.iter().sum::<f64>() / distances.len() as f64;
            let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = distances.iter().cloned().fold(0.0, f64::max);
            (avg, min, max)
        };

        let min_x = self.locations.iter().map(|l| l.x).fold(f64::INFINITY, f64::min);
        let max_x = self.locations.iter().map(|l| l.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = self.locations.iter().map(|l| l.y).fold(f64::INFINITY, f64::min);
        let max_y = self.locations.iter().map(|l| l.y).fold(f64::NEG_INFINITY, f64::max);

        InstanceStatistics {
            name: self.name.clone(),
            dimension: self.dimension,
            avg_distance,
            min_distance,
            max_distance,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

/// Statistics about a route instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub width: f64,
    pub height: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Locations: {}", self.dimension)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Min distance: {:.2}", self.min_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)?;
        writeln!(f, "  Bounding box: {:.2} x {:.2}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_calculation() {
        let instance = RouteInstance::from_points("test", &[(0.0, 0.0), (3.0, 4.0)]).unwrap();

        assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((instance.distance(1, 0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_matrix_symmetry_and_zero_diagonal() {
        let instance = RouteInstance::from_points(
            "test",
            &[(0.0, 0.0), (1.0, 2.0), (4.0, 1.0), (2.0, 5.0)],
        )
        .unwrap();

        for i in 0..instance.dimension {
            assert_eq!(instance.distance(i, i), 0.0);
            for j in 0..instance.dimension {
                assert_eq!(instance.distance(i, j), instance.distance(j, i));
            }
        }
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(RouteInstance::from_points("empty", &[]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        assert!(RouteInstance::from_points("nan", &[(0.0, f64::NAN)]).is_err());
        assert!(RouteInstance::from_points("inf", &[(f64::INFINITY, 0.0)]).is_err());
    }

    #[test]
    fn test_tour_length() {
        let instance = RouteInstance::from_points("test", &[(0.0, 0.0), (3.0, 4.0)]).unwrap();

        assert!((instance.tour_length(&[0, 1, 0]) - 10.0).abs() < 1e-10);
        assert_eq!(instance.tour_length(&[0]), 0.0);
        assert_eq!(instance.tour_length(&[0, 0]), 0.0);
    }

    #[test]
    fn test_is_closed_tour() {
        let instance =
            RouteInstance::from_points("test", &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();

        assert!(instance.is_closed_tour(&[0, 1, 2, 0]));
        assert!(instance.is_closed_tour(&[0, 2, 1, 0]));
        assert!(!instance.is_closed_tour(&[0, 1, 2])); // not closed
        assert!(!instance.is_closed_tour(&[1, 0, 2, 1])); // wrong anchor
        assert!(!instance.is_closed_tour(&[0, 1, 1, 0])); // duplicate visit
        assert!(!instance.is_closed_tour(&[0, 1, 3, 0])); // index out of range
    }

    #[test]
    fn test_single_location_tour() {
        let instance = RouteInstance::from_points("single", &[(0.0, 0.0)]).unwrap();

        assert!(instance.is_closed_tour(&[0, 0]));
        assert_eq!(instance.tour_length(&[0, 0]), 0.0);
    }

    #[test]
    fn test_generator_is_deterministic() {
        let a = RouteInstance::generate_random("a", 6, 7, 50.0).unwrap();
        let b = RouteInstance::generate_random("b", 6, 7, 50.0).unwrap();

        for (la, lb) in a.locations.iter().zip(b.locations.iter()) {
            assert_eq!(la.x, lb.x);
            assert_eq!(la.y, lb.y);
        }
    }

    #[test]
    fn test_generator_rejects_bad_input() {
        assert!(RouteInstance::generate_random("zero", 0, 1, 50.0).is_err());
        assert!(RouteInstance::generate_random("extent", 4, 1, 0.0).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let instance =
            RouteInstance::from_points("roundtrip", &[(0.0, 0.0), (3.0, 4.0), (1.5, 2.5)])
                .unwrap();
        let path = std::env::temp_dir().join("delivery-route-solver-roundtrip.txt");
        instance.save_to_file(&path).unwrap();
        let loaded = RouteInstance::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "roundtrip");
        assert_eq!(loaded.dimension, 3);
        for (a, b) in instance.locations.iter().zip(loaded.locations.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
    }
}
