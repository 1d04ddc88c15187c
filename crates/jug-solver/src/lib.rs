//! Solver library for the two water jugs puzzle.
//!
//! Given two jug capacities and a target volume, this crate decides whether
//! the target can be measured and produces a trace of fill, empty and pour
//! steps that reaches it.

pub mod feasibility;
pub mod jug;
pub mod search;
pub mod simulation;
pub mod solver;

// Re-export main types
pub use feasibility::{check, gcd, is_feasible, Infeasibility};
pub use jug::{JugPuzzle, Operation, Sequence, Step};
pub use search::{shortest, shortest_bounded};
pub use simulation::{generate, simulate, SimulationResult, SimulationStatus};
pub use solver::{solve, solve_with, SolverConfig, SolverResult, Strategy};
