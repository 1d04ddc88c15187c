//! Top-level solver.
//!
//! Rejects infeasible puzzles up front, then either runs the greedy
//! simulation in both orientations and keeps the shorter trace, or runs the
//! breadth-first search when a globally shortest trace is wanted.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::feasibility::{check, Infeasibility};
use crate::jug::{JugPuzzle, Sequence};
use crate::search::shortest_bounded;
use crate::simulation::generate;

/// How the trace is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Shorter of the two greedy pour simulations
    #[default]
    Greedy,
    /// Breadth-first search over all jug states
    Shortest,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => f.write_str("greedy"),
            Strategy::Shortest => f.write_str("shortest"),
        }
    }
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// State limit for `Strategy::Shortest`. Past it the greedy trace is used.
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Greedy,
            max_states: 1_000_000,
        }
    }
}

/// Result of solving one puzzle
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Whether a trace was found
    pub solved: bool,
    /// The selected trace
    pub sequence: Option<Sequence>,
    /// Why the puzzle has no solution
    pub reason: Option<Infeasibility>,
    /// Strategy that produced `sequence`
    pub strategy: Strategy,
    /// Number of candidate traces compared
    pub candidates_considered: usize,
    /// Time elapsed in microseconds
    pub time_elapsed_us: u64,
}

/// Solve with the default configuration.
///
/// Returns `None` when the target cannot be measured with the two jugs.
pub fn solve(capacity_a: u32, capacity_b: u32, target: u32) -> Option<Sequence> {
    solve_with(
        &JugPuzzle::new(capacity_a, capacity_b, target),
        &SolverConfig::default(),
    )
    .sequence
}

/// Solve a puzzle and report how the answer was reached.
pub fn solve_with(puzzle: &JugPuzzle, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let JugPuzzle {
        capacity_a,
        capacity_b,
        target,
    } = *puzzle;

    if let Err(reason) = check(capacity_a, capacity_b, target) {
        tracing::debug!(capacity_a, capacity_b, target, %reason, "no solution");
        return SolverResult {
            solved: false,
            sequence: None,
            reason: Some(reason),
            strategy: config.strategy,
            candidates_considered: 0,
            time_elapsed_us: start_time.elapsed().as_micros() as u64,
        };
    }

    if config.strategy == Strategy::Shortest {
        match shortest_bounded(capacity_a, capacity_b, target, config.max_states) {
            Some(sequence) => {
                tracing::debug!(steps = sequence.len(), "shortest trace found");
                return SolverResult {
                    solved: true,
                    sequence: Some(sequence),
                    reason: None,
                    strategy: Strategy::Shortest,
                    candidates_considered: 1,
                    time_elapsed_us: start_time.elapsed().as_micros() as u64,
                };
            }
            None => {
                tracing::warn!(
                    max_states = config.max_states,
                    "state limit reached, falling back to greedy"
                );
            }
        }
    }

    let (sequence, candidates_considered) = shorter_orientation(capacity_a, capacity_b, target);
    SolverResult {
        solved: sequence.is_some(),
        sequence,
        reason: None,
        strategy: Strategy::Greedy,
        candidates_considered,
        time_elapsed_us: start_time.elapsed().as_micros() as u64,
    }
}

/// Run both orientations and keep the shorter trace. Ties keep A-to-B.
fn shorter_orientation(capacity_a: u32, capacity_b: u32, target: u32) -> (Option<Sequence>, usize) {
    let forward = generate(capacity_a, capacity_b, target);
    let reversed = generate(capacity_b, capacity_a, target);

    tracing::debug!(
        forward = ?forward.as_ref().map(Sequence::len),
        reversed = ?reversed.as_ref().map(Sequence::len),
        "greedy candidates"
    );

    let considered = forward.is_some() as usize + reversed.is_some() as usize;
    let chosen = match (forward, reversed) {
        (Some(f), Some(r)) => {
            if r.len() < f.len() {
                Some(r)
            } else {
                Some(f)
            }
        }
        (f, r) => f.or(r),
    };
    (chosen, considered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::is_feasible;
    use crate::jug::Operation;

    #[test]
    fn test_five_three_four() {
        let sequence = solve(5, 3, 4).unwrap();
        assert_eq!(sequence.len(), 6);
        assert_eq!(
            sequence.operations(),
            vec![
                Operation::Fill,
                Operation::Pour,
                Operation::Empty,
                Operation::Pour,
                Operation::Fill,
                Operation::Pour,
            ]
        );
        assert_eq!(
            sequence.volumes(),
            vec![(5, 0), (2, 3), (2, 0), (0, 2), (5, 2), (4, 3)]
        );
    }

    #[test]
    fn test_target_exceeds_capacity() {
        assert!(solve(7, 3, 10).is_none());
    }

    #[test]
    fn test_large_values() {
        let sequence = solve(57, 32, 10).unwrap();
        assert_eq!(sequence.len(), 32);
        assert_eq!(sequence.source_capacity, 32);
    }

    #[test]
    fn test_no_capacity() {
        assert!(solve(0, 0, 0).is_none());
    }

    #[test]
    fn test_zero_target_prefers_first_jug() {
        let sequence = solve(4, 6, 0).unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.operations(), vec![Operation::Fill]);
        assert_eq!(sequence.volumes(), vec![(4, 0)]);
    }

    #[test]
    fn test_not_multiple_of_gcd() {
        assert!(solve(6, 4, 5).is_none());

        let result = solve_with(&JugPuzzle::new(6, 4, 5), &SolverConfig::default());
        assert!(!result.solved);
        assert_eq!(
            result.reason,
            Some(Infeasibility::NotMultipleOfGcd { target: 5, gcd: 2 })
        );
    }

    #[test]
    fn test_one_orientation_cycles() {
        let sequence = solve(0, 5, 5).unwrap();
        assert_eq!(sequence.source_capacity, 5);
        assert_eq!(sequence.volumes(), vec![(5, 0)]);

        let result = solve_with(&JugPuzzle::new(0, 5, 5), &SolverConfig::default());
        assert_eq!(result.candidates_considered, 1);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(solve(57, 32, 10), solve(57, 32, 10));
        assert_eq!(solve(13, 7, 2), solve(13, 7, 2));
    }

    #[test]
    fn test_shortest_strategy() {
        let config = SolverConfig {
            strategy: Strategy::Shortest,
            ..Default::default()
        };
        let result = solve_with(&JugPuzzle::new(57, 32, 10), &config);
        assert!(result.solved);
        assert_eq!(result.strategy, Strategy::Shortest);
        assert!(result.sequence.unwrap().len() <= 32);
    }

    #[test]
    fn test_shortest_falls_back_to_greedy() {
        let config = SolverConfig {
            strategy: Strategy::Shortest,
            max_states: 2,
        };
        let result = solve_with(&JugPuzzle::new(57, 32, 10), &config);
        assert!(result.solved);
        assert_eq!(result.strategy, Strategy::Greedy);
        assert_eq!(result.sequence.unwrap().len(), 32);
    }

    #[test]
    fn test_solution_properties() {
        for a in 0..20u32 {
            for b in 0..20u32 {
                for t in 0..22u32 {
                    let solution = solve(a, b, t);
                    assert_eq!(solution.is_some(), is_feasible(a, b, t), "({}, {}, {})", a, b, t);

                    let Some(sequence) = solution else { continue };
                    let first = sequence.first().unwrap();
                    assert_eq!(first.operation, Operation::Fill);
                    assert_eq!(first.source_volume, sequence.source_capacity);
                    assert_eq!(first.destination_volume, 0);
                    assert!(sequence.reaches(t));

                    for (i, step) in sequence.iter().enumerate() {
                        assert_eq!(step.index as usize, i + 1);
                        assert!(step.source_volume <= sequence.source_capacity);
                        assert!(step.destination_volume <= sequence.destination_capacity);
                    }
                }
            }
        }
    }
}
