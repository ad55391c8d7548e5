use crate::instance::RouteInstance;
use crate::solution::Solution;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

pub trait ConstructionHeuristic {
    fn construct(&self, instance: &RouteInstance) -> Solution;
    fn name(&self) -> &str;
}

/// Nearest Neighbor Heuristic
///
/// Builds a closed tour by starting at the depot and repeatedly visiting
/// the nearest unvisited location, then returning to the depot.
pub struct NearestNeighborHeuristic;

impl NearestNeighborHeuristic {
    pub fn new() -> Self {
        NearestNeighborHeuristic
    }

    fn find_nearest(
        &self,
        instance: &RouteInstance,
        current: usize,
        visited: &HashSet<usize>,
    ) -> Option<usize> {
        // Candidates are collected in ascending index order; the stable sort
        // keeps that order among equal distances, so ties go to the lowest index.
        let mut candidates: Vec<(usize, f64)> = (0..instance.dimension)
            .filter(|&n| !visited.contains(&n))
            .map(|n| (n, instance.distance(current, n)))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        candidates.sort_by_key(|&(_, d)| OrderedFloat(d));

        Some(candidates[0].0)
    }
}

impl Default for NearestNeighborHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for NearestNeighborHeuristic {
    fn construct(&self, instance: &RouteInstance) -> Solution {
        let start = std::time::Instant::now();

        let mut tour = vec![0]; // Start at depot
        let mut visited = HashSet::new();
        visited.insert(0);

        let mut current = 0;

        while visited.len() < instance.dimension {
            if let Some(next) = self.find_nearest(instance, current, &visited) {
                tour.push(next);
                visited.insert(next);
                current = next;
            } else {
                break;
            }
        }

        // Close the cycle back at the depot
        tour.push(0);

        let mut solution = Solution::from_tour(instance, tour, self.name());
        solution.computation_time = start.elapsed().as_secs_f64();
        solution
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
