//! Solution representation and manipulation for delivery routes.
//!
//! This module provides the data structure and methods for representing,
//! manipulating, and evaluating closed-tour solutions.

use crate::instance::RouteInstance;
use serde::{Deserialize, Serialize};

/// Represents a solution to a route instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The tour as a sequence of location indices (starting and ending at depot 0)
    pub tour: Vec<usize>,
    /// Total tour length
    pub cost: f64,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of improvement passes (if applicable)
    pub passes: Option<usize>,
}

impl Solution {
    /// Create a new empty solution
    pub fn new() -> Self {
        Solution {
            tour: Vec::new(),
            cost: f64::INFINITY,
            algorithm: String::new(),
            computation_time: 0.0,
            passes: None,
        }
    }

    /// Create a solution from a tour
    pub fn from_tour(instance: &RouteInstance, tour: Vec<usize>, algorithm: &str) -> Self {
        let cost = instance.tour_length(&tour);

        Solution {
            tour,
            cost,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            passes: None,
        }
    }

    /// Recompute the cost from the tour
    pub fn validate(&mut self, instance: &RouteInstance) {
        self.cost = instance.tour_length(&self.tour);
    }

    /// Check if the tour is a closed walk visiting every location exactly once
    pub fn is_complete(&self, instance: &RouteInstance) -> bool {
        instance.is_closed_tour(&self.tour)
    }

    /// Calculate the delta cost of a 2-opt move (reverse positions i through j).
    /// Both the candidate and the current tour are evaluated in full.
    pub fn two_opt_delta(&self, instance: &RouteInstance, i: usize, j: usize) -> f64 {
        let n = self.tour.len();
        if i >= j || j >= n {
            return 0.0;
        }

        let mut new_tour = self.tour.clone();
        new_tour[i..=j].reverse();
        let old_cost = instance.tour_length(&self.tour);
        let new_cost = instance.tour_length(&new_tour);
        new_cost - old_cost
    }

    /// Apply a 2-opt move (reverse positions i through j)
    pub fn apply_two_opt(&mut self, i: usize, j: usize) {
        self.tour[i..=j].reverse();
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(passes) = self.passes {
            writeln!(f, "  Passes: {}", passes)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}
