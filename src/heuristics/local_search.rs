//! Local search improvement for delivery route solutions.
//!
//! This module implements 2-opt segment-reversal local search.

use crate::instance::RouteInstance;
use crate::solution::Solution;

/// Trait for local search improvement methods
pub trait LocalSearch {
    fn improve(&self, instance: &RouteInstance, solution: &mut Solution) -> bool;
    fn name(&self) -> &str;
}

/// 2-Opt Local Search
///
/// Reverses segments of the tour to reduce total distance. Every candidate
/// reversal is evaluated by recomputing the full tour length; an improving
/// reversal is adopted immediately and the remaining pairs of the same pass
/// are compared against the updated tour. Passes repeat until one finds no
/// improvement. Convergence is unbounded by default; for adversarial inputs
/// the pass count can grow large, and `max_passes` bounds it explicitly.
pub struct TwoOptSearch {
    /// Maximum number of full passes; None runs to convergence
    pub max_passes: Option<usize>,
}

impl TwoOptSearch {
    pub fn new() -> Self {
        TwoOptSearch { max_passes: None }
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        TwoOptSearch {
            max_passes: Some(max_passes),
        }
    }
}

impl Default for TwoOptSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSearch for TwoOptSearch {
    fn improve(&self, instance: &RouteInstance, solution: &mut Solution) -> bool {
        let n = solution.tour.len();
        if n < 4 {
            return false;
        }

        let mut total_improved = false;
        let mut improved = true;
        let mut passes = 0;

        while improved {
            if let Some(limit) = self.max_passes {
                if passes >= limit {
                    break;
                }
            }
            improved = false;
            passes += 1;

            // The depot anchors positions 0 and n-1; reversals stay strictly inside
            for i in 1..n - 2 {
                for j in i + 1..n - 1 {
                    let delta = solution.two_opt_delta(instance, i, j);

                    if delta < 0.0 {
                        solution.apply_two_opt(i, j);
                        solution.cost += delta;
                        improved = true;
                        total_improved = true;
                    }
                }
            }
        }

        solution.passes = Some(passes);
        solution.validate(instance);
        total_improved
    }

    fn name(&self) -> &str {
        "2-Opt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::construction::{ConstructionHeuristic, NearestNeighborHeuristic};

    #[test]
    fn test_square_already_optimal() {
        let instance = RouteInstance::from_points(
            "square",
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        )
        .unwrap();
        let mut solution = NearestNeighborHeuristic::new().construct(&instance);

        let improved = TwoOptSearch::new().improve(&instance, &mut solution);

        assert!(!improved);
        assert_eq!(solution.tour, vec![0, 1, 2, 3, 0]);
        assert!((solution.cost - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_removes_crossing() {
        // Nearest neighbor visits this convex quadrilateral out of hull
        // order, so two of its edges cross
        let instance = RouteInstance::from_points(
            "kite",
            &[(0.0, 0.0), (3.0, 0.0), (3.5, 1.0), (0.5, 1.0)],
        )
        .unwrap();
        let mut solution = NearestNeighborHeuristic::new().construct(&instance);
        let nn_cost = solution.cost;
        assert_eq!(solution.tour, vec![0, 3, 1, 2, 0]);

        let improved = TwoOptSearch::new().improve(&instance, &mut solution);

        assert!(improved);
        assert!(solution.cost < nn_cost);
        let expected = 6.0 + 2.0 * 1.25f64.sqrt();
        assert!((solution.cost - expected).abs() < 1e-10);
    }

    #[test]
    fn test_small_tours_unchanged() {
        let instance = RouteInstance::from_points("pair", &[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        let mut solution = NearestNeighborHeuristic::new().construct(&instance);

        assert!(!TwoOptSearch::new().improve(&instance, &mut solution));
        assert_eq!(solution.tour, vec![0, 1, 0]);

        let instance =
            RouteInstance::from_points("triangle", &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
                .unwrap();
        let mut solution = NearestNeighborHeuristic::new().construct(&instance);

        assert!(!TwoOptSearch::new().improve(&instance, &mut solution));
        assert_eq!(solution.tour, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_never_worse_than_construction() {
        for seed in 0..5 {
            let instance = RouteInstance::generate_random("random", 10, seed, 100.0).unwrap();
            let mut solution = NearestNeighborHeuristic::new().construct(&instance);
            let nn_cost = solution.cost;

            TwoOptSearch::new().improve(&instance, &mut solution);

            assert!(solution.cost <= nn_cost);
            assert!(solution.is_complete(&instance));
        }
    }

    #[test]
    fn test_result_is_locally_optimal() {
        let instance = RouteInstance::generate_random("random", 9, 11, 100.0).unwrap();
        let mut solution = NearestNeighborHeuristic::new().construct(&instance);

        TwoOptSearch::new().improve(&instance, &mut solution);

        let n = solution.tour.len();
        for i in 1..n - 2 {
            for j in i + 1..n - 1 {
                assert!(solution.two_opt_delta(&instance, i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_max_passes_cap() {
        let instance = RouteInstance::generate_random("random", 12, 5, 100.0).unwrap();

        let mut capped = NearestNeighborHeuristic::new().construct(&instance);
        TwoOptSearch::with_max_passes(1).improve(&instance, &mut capped);
        assert_eq!(capped.passes, Some(1));

        let mut free = NearestNeighborHeuristic::new().construct(&instance);
        TwoOptSearch::new().improve(&instance, &mut free);
        assert!(free.cost <= capped.cost);
    }
}
