//! Jug puzzle representation types.
//!
//! A solution trace is a `Sequence` of `Step`s. Each step records which
//! operation produced it and the volumes left in the two jugs afterwards.
//! These types serialize to the JSON format printed by the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Operation that produced a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Fill,
    Empty,
    Pour,
}

impl Operation {
    /// Capitalized name for display
    pub fn display(self) -> &'static str {
        match self {
            Operation::Fill => "Fill",
            Operation::Empty => "Empty",
            Operation::Pour => "Pour",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// One completed operation and the jug volumes right after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub operation: Operation,
    /// 1-based position in the sequence
    pub index: u32,
    pub source_volume: u32,
    pub destination_volume: u32,
}

impl Step {
    pub fn new(operation: Operation, index: u32, source_volume: u32, destination_volume: u32) -> Self {
        Self {
            operation,
            index,
            source_volume,
            destination_volume,
        }
    }

    /// Label shown next to each step, e.g. `Step 3: Empty`
    pub fn label(&self) -> String {
        format!("Step {}: {}", self.index, self.operation)
    }

    /// Check if either jug holds exactly `target`
    pub fn holds(&self, target: u32) -> bool {
        self.source_volume == target || self.destination_volume == target
    }
}

/// Inline capacity for step storage. Most traces for small jugs fit.
const INLINE_STEPS: usize = 8;

/// An ordered, append-only trace of steps for one choice of source jug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub source_capacity: u32,
    pub destination_capacity: u32,
    steps: SmallVec<[Step; INLINE_STEPS]>,
}

impl Sequence {
    /// Create an empty sequence for the given jug orientation
    pub fn new(source_capacity: u32, destination_capacity: u32) -> Self {
        Self {
            source_capacity,
            destination_capacity,
            steps: SmallVec::new(),
        }
    }

    /// Append a step. The index is assigned here so indices never skip.
    pub fn push(&mut self, operation: Operation, source_volume: u32, destination_volume: u32) {
        let index = self.steps.len() as u32 + 1;
        self.steps
            .push(Step::new(operation, index, source_volume, destination_volume));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Check if the final step leaves `target` in one of the jugs
    pub fn reaches(&self, target: u32) -> bool {
        self.last().map_or(false, |step| step.holds(target))
    }

    /// Operations in order, mostly useful for display and tests
    pub fn operations(&self) -> Vec<Operation> {
        self.steps.iter().map(|s| s.operation).collect()
    }

    /// `(source, destination)` volume pairs in order
    pub fn volumes(&self) -> Vec<(u32, u32)> {
        self.steps
            .iter()
            .map(|s| (s.source_volume, s.destination_volume))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Puzzle input as read from JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JugPuzzle {
    pub capacity_a: u32,
    pub capacity_b: u32,
    pub target: u32,
}

impl JugPuzzle {
    pub fn new(capacity_a: u32, capacity_b: u32, target: u32) -> Self {
        Self {
            capacity_a,
            capacity_b,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_contiguous_indices() {
        let mut sequence = Sequence::new(5, 3);
        sequence.push(Operation::Fill, 5, 0);
        sequence.push(Operation::Pour, 2, 3);
        sequence.push(Operation::Empty, 2, 0);

        let indices: Vec<u32> = sequence.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(sequence.len(), 3);
        assert!(sequence.reaches(2));
        assert!(!sequence.reaches(4));
    }

    #[test]
    fn test_step_label() {
        let step = Step::new(Operation::Empty, 3, 2, 0);
        assert_eq!(step.label(), "Step 3: Empty");
        assert_eq!(Operation::Pour.to_string(), "Pour");
    }

    #[test]
    fn test_puzzle_json_format() {
        let puzzle: JugPuzzle =
            serde_json::from_str(r#"{"capacityA": 5, "capacityB": 3, "target": 4}"#).unwrap();
        assert_eq!(puzzle, JugPuzzle::new(5, 3, 4));
    }

    #[test]
    fn test_step_json_format() {
        let step = Step::new(Operation::Fill, 1, 5, 0);
        let value = serde_json::to_value(step).unwrap();
        assert_eq!(value["operation"], "fill");
        assert_eq!(value["sourceVolume"], 5);
        assert_eq!(value["destinationVolume"], 0);
    }

    #[test]
    fn test_empty_sequence() {
        let sequence = Sequence::new(4, 6);
        assert!(sequence.is_empty());
        assert!(sequence.first().is_none());
        assert!(!sequence.reaches(0));
    }
}
