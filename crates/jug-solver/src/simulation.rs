//! Greedy pour simulation.
//!
//! Fills the source jug and keeps pouring as much as possible into the
//! destination, refilling the source when it runs dry and emptying the
//! destination when it fills up. Every state change is recorded as a step.

use std::collections::HashSet;

use crate::jug::{Operation, Sequence};

/// How a simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// One of the jugs holds the target
    Reached,
    /// Returned to an earlier state without reaching the target
    Cycle,
}

/// Result of running one orientation
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub status: SimulationStatus,
    /// Steps recorded up to the end of the simulation
    pub sequence: Sequence,
}

impl SimulationResult {
    pub fn reached(&self) -> bool {
        self.status == SimulationStatus::Reached
    }
}

/// Run the pour simulation with `source_capacity` as the jug filled first.
///
/// The state at the top of each round is remembered. The simulation is
/// deterministic, so seeing one twice means the target is out of reach for
/// this orientation and the run stops with `SimulationStatus::Cycle`.
pub fn simulate(source_capacity: u32, destination_capacity: u32, target: u32) -> SimulationResult {
    let mut source = source_capacity;
    let mut destination = 0;

    let mut sequence = Sequence::new(source_capacity, destination_capacity);
    sequence.push(Operation::Fill, source, destination);

    let mut seen_states = HashSet::new();

    while source != target && destination != target {
        if !seen_states.insert((source, destination)) {
            return SimulationResult {
                status: SimulationStatus::Cycle,
                sequence,
            };
        }

        let amount = source.min(destination_capacity - destination);
        destination += amount;
        source -= amount;
        sequence.push(Operation::Pour, source, destination);

        if source == target || destination == target {
            break;
        }

        if source == 0 {
            source = source_capacity;
            sequence.push(Operation::Fill, source, destination);
        }

        if destination == destination_capacity {
            destination = 0;
            sequence.push(Operation::Empty, source, destination);
        }
    }

    SimulationResult {
        status: SimulationStatus::Reached,
        sequence,
    }
}

/// Generate the trace for one orientation, or `None` if it cycles.
pub fn generate(source_capacity: u32, destination_capacity: u32, target: u32) -> Option<Sequence> {
    let result = simulate(source_capacity, destination_capacity, target);
    if result.reached() {
        Some(result.sequence)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::is_feasible;

    #[test]
    fn test_five_three_four() {
        let sequence = generate(5, 3, 4).unwrap();

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
    fn test_reversed_orientation_is_longer() {
        let sequence = generate(3, 5, 4).unwrap();
        assert_eq!(sequence.len(), 8);
        assert_eq!(sequence.last().unwrap().destination_volume, 4);
    }

    #[test]
    fn test_target_met_by_first_fill() {
        let sequence = generate(4, 6, 0).unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.volumes(), vec![(4, 0)]);

        let sequence = generate(4, 6, 4).unwrap();
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_empty_source_cycles() {
        let result = simulate(0, 5, 5);
        assert_eq!(result.status, SimulationStatus::Cycle);
        assert!(generate(0, 5, 5).is_none());
    }

    #[test]
    fn test_empty_destination_cycles() {
        assert!(generate(5, 0, 3).is_none());
        assert!(generate(5, 0, 5).is_some());
    }

    #[test]
    fn test_feasible_orientations_reach_target() {
        for s in 1..15u32 {
            for d in 1..15u32 {
                for t in 0..=s.max(d) {
                    if !is_feasible(s, d, t) {
                        continue;
                    }
                    let sequence = generate(s, d, t)
                        .unwrap_or_else(|| panic!("({}, {}, {}) cycled", s, d, t));

                    assert!(sequence.reaches(t));
                    for (i, step) in sequence.iter().enumerate() {
                        assert_eq!(step.index as usize, i + 1);
                        assert!(step.source_volume <= s);
                        assert!(step.destination_volume <= d);
                    }
                    assert!(sequence.len() as u32 <= 2 * (s + d) + 1);
                }
            }
        }
    }
}
