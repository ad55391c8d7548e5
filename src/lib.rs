//! Delivery Route Solver Library
//!
//! A heuristic solver for closed delivery routes over 2-D locations,
//! approximating the minimum-distance traveling-salesman tour.
//!
//! # Features
//!
//! - Euclidean distance matrix built once per instance
//! - Nearest-neighbor construction heuristic
//! - 2-opt local search refinement
//! - Instance file parsing, generation, and analysis
//!
//! # Example
//!
//! ```
//! use delivery_route_solver::instance::RouteInstance;
//! use delivery_route_solver::heuristics::construction::{ConstructionHeuristic, NearestNeighborHeuristic};
//! use delivery_route_solver::heuristics::local_search::{LocalSearch, TwoOptSearch};
//!
//! // Build an instance from coordinates
//! let instance = RouteInstance::from_points(
//!     "square",
//!     &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
//! ).unwrap();
//!
//! // Construct an initial tour
//! let nn = NearestNeighborHeuristic::new();
//! let mut solution = nn.construct(&instance);
//!
//! // Improve with 2-opt
//! let two_opt = TwoOptSearch::new();
//! two_opt.improve(&instance, &mut solution);
//!
//! println!("Route length: {:.2}", solution.cost);
//! ```

pub mod instance;
pub mod solution;
pub mod heuristics;

pub use instance::RouteInstance;
pub use solution::Solution;
