//! Cheap feasibility rules checked before any simulation.
//!
//! The volumes reachable with two jugs are exactly the multiples of
//! `gcd(a, b)` that fit in the larger jug. Anything else is rejected here
//! so the simulation never runs on an unsolvable input.

use thiserror::Error;

/// Why a puzzle has no solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Infeasibility {
    #[error("both jugs have zero capacity")]
    NoCapacity,
    #[error("target {target} > largest capacity {largest}")]
    ExceedsCapacity { target: u32, largest: u32 },
    #[error("target {target} is not a multiple of gcd {gcd}")]
    NotMultipleOfGcd { target: u32, gcd: u32 },
}

impl Infeasibility {
    /// Stable identifier used in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            Infeasibility::NoCapacity => "no_capacity",
            Infeasibility::ExceedsCapacity { .. } => "exceeds_capacity",
            Infeasibility::NotMultipleOfGcd { .. } => "not_multiple_of_gcd",
        }
    }
}

/// Greatest common divisor, with `gcd(a, 0) == a`
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Check whether `target` can be measured with the two jugs.
///
/// Rules are applied in order, so the first one that fails is reported.
pub fn check(capacity_a: u32, capacity_b: u32, target: u32) -> Result<(), Infeasibility> {
    if capacity_a == 0 && capacity_b == 0 {
        return Err(Infeasibility::NoCapacity);
    }

    let small = capacity_a.min(capacity_b);
    let large = capacity_a.max(capacity_b);

    if target > large {
        return Err(Infeasibility::ExceedsCapacity {
            target,
            largest: large,
        });
    }

    // Non-zero: large > 0 after the first rule
    let divisor = gcd(large, small);
    if target % divisor != 0 {
        return Err(Infeasibility::NotMultipleOfGcd {
            target,
            gcd: divisor,
        });
    }

    Ok(())
}

pub fn is_feasible(capacity_a: u32, capacity_b: u32, target: u32) -> bool {
    check(capacity_a, capacity_b, target).is_ok()
}
