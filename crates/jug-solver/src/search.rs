//! Breadth-first search over the jug state graph.
//!
//! Unlike the greedy simulation this considers every move from every state,
//! so the trace it returns is the shortest one overall. States are
//! `(volume_a, volume_b)` pairs; the search starts with both jugs empty.

use std::collections::{HashMap, VecDeque};

use crate::jug::{Operation, Sequence};

type State = (u32, u32);

/// A move between two states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    FillA,
    FillB,
    EmptyA,
    EmptyB,
    PourAToB,
    PourBToA,
}

/// Expansion order. Fixed so that ties always resolve the same way.
const MOVES: [Move; 6] = [
    Move::FillA,
    Move::FillB,
    Move::EmptyA,
    Move::EmptyB,
    Move::PourAToB,
    Move::PourBToA,
];

impl Move {
    fn apply(self, (a, b): State, capacity_a: u32, capacity_b: u32) -> State {
        match self {
            Move::FillA => (capacity_a, b),
            Move::FillB => (a, capacity_b),
            Move::EmptyA => (0, b),
            Move::EmptyB => (a, 0),
            Move::PourAToB => {
                let amount = a.min(capacity_b - b);
                (a - amount, b + amount)
            }
            Move::PourBToA => {
                let amount = b.min(capacity_a - a);
                (a + amount, b - amount)
            }
        }
    }

    fn operation(self) -> Operation {
        match self {
            Move::FillA | Move::FillB => Operation::Fill,
            Move::EmptyA | Move::EmptyB => Operation::Empty,
            Move::PourAToB | Move::PourBToA => Operation::Pour,
        }
    }
}

/// Find a shortest trace with no limit on the number of states explored.
pub fn shortest(capacity_a: u32, capacity_b: u32, target: u32) -> Option<Sequence> {
    shortest_bounded(capacity_a, capacity_b, target, usize::MAX)
}

/// Find a shortest trace, giving up once `max_states` states are discovered.
///
/// Returns `None` when the target is unreachable or the limit is hit. The
/// jug filled by the first move becomes the source of the returned sequence.
pub fn shortest_bounded(
    capacity_a: u32,
    capacity_b: u32,
    target: u32,
    max_states: usize,
) -> Option<Sequence> {
    // The first fill already leaves 0 in the other jug
    if target == 0 {
        let mut sequence = Sequence::new(capacity_a, capacity_b);
        sequence.push(Operation::Fill, capacity_a, 0);
        return Some(sequence);
    }

    let start: State = (0, 0);
    let mut parents: HashMap<State, (State, Move)> = HashMap::new();
    let mut queue: VecDeque<State> = VecDeque::new();
    queue.push_back(start);

    while let Some(state) = queue.pop_front() {
        for mv in MOVES {
            let next = mv.apply(state, capacity_a, capacity_b);
            if next == start || parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, (state, mv));

            if next.0 == target || next.1 == target {
                return Some(rebuild(&parents, start, next, capacity_a, capacity_b));
            }
            if parents.len() >= max_states {
                return None;
            }
            queue.push_back(next);
        }
    }

    None
}

/// Walk parent links back from `goal` and lay the path out as a sequence
fn rebuild(
    parents: &HashMap<State, (State, Move)>,
    start: State,
    goal: State,
    capacity_a: u32,
    capacity_b: u32,
) -> Sequence {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        let (previous, mv) = parents[&current];
        path.push((mv, current));
        current = previous;
    }
    path.reverse();

    // Only fills leave (0, 0), so the first move names the source jug
    let a_is_source = !matches!(path.first(), Some((Move::FillB, _)));

    let mut sequence = if a_is_source {
        Sequence::new(capacity_a, capacity_b)
    } else {
        Sequence::new(capacity_b, capacity_a)
    };
    for (mv, (a, b)) in path {
        if a_is_source {
            sequence.push(mv.operation(), a, b);
        } else {
            sequence.push(mv.operation(), b, a);
        }
    }
    sequence
}
