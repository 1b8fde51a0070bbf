use std::fmt::Debug;
use std::hash::Hash;

use num_traits::SaturatingAdd;
use num_traits::sign::Unsigned;

/// An edge label. The engine reports paths as node sequences; actions only
/// exist so a `Space` can enumerate its neighbours deterministically.
pub trait Action: Copy + Clone + Debug + PartialEq + Eq {}

/// An opaque, comparable, hashable node identifier.
pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// A step cost. Unsigned, so non-negative by construction.
pub trait Cost:
    Copy
    + Clone
    + Debug
    + std::fmt::Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + SaturatingAdd
    + Unsigned
    + num_traits::bounds::UpperBounded
    + std::ops::Add
    + std::ops::AddAssign
{
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }
}

/// A search space (graph provider). Used read-only by the engine.
pub trait Space<St, A, C>: Clone + std::fmt::Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    fn apply(&self, s: &St, a: &A) -> Option<St>;

    fn cost(&self, _s: &St, _a: &A) -> C {
        C::one()
    }

    /// Expands a State.
    ///
    /// The enumeration order must be deterministic; the engine preserves it
    /// when admitting neighbours, and the search results depend on it.
    fn neighbours(&self, s: &St) -> Vec<(St, A)>;

    /// Verify a State is valid.
    fn valid(&self, s: &St) -> bool;

    fn size(&self) -> Option<usize> {
        None
    }

    fn supports_random_state() -> bool {
        false
    }
    fn random_state<R: rand::Rng>(&self, _r: &mut R) -> Option<St> {
        debug_assert!(!Self::supports_random_state());
        None
    }
}

/// A goal-distance estimate used by the informed strategies.
///
/// The engine enforces no admissibility contract. A heuristic that
/// overestimates still produces a result, but A* loses its optimality
/// guarantee.
pub trait Heuristic<St, C>: std::fmt::Debug
where
    St: State,
    C: Cost,
{
    fn h(s: &St, goal: &St) -> C;
}

/// The heuristic used when a strategy needs none (BFS, DFS).
#[derive(Debug)]
pub struct ZeroHeuristic;

impl<St, C> Heuristic<St, C> for ZeroHeuristic
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn h(_s: &St, _goal: &St) -> C {
        C::zero()
    }
}
