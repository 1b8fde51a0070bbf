use std::fmt::Debug;

use crate::engine::SearchError;
use crate::space::Cost;
use crate::space::State;

pub mod astar;
pub mod fifo;
pub mod greedy;
pub mod lifo;

pub use astar::AStarFrontier;
pub use fifo::FifoFrontier;
pub use greedy::GreedyFrontier;
pub use lifo::LifoFrontier;

/// What the engine should do with a neighbour, per the active strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Record the parent link and insert the node into the frontier.
    Insert,
    /// Replace the parent link and cost, and re-rank the resident entry.
    Reprioritize,
    /// Leave the node untouched.
    Skip,
}

/// Read-only facts about a neighbour at admission time.
///
/// The engine owns the parent/cost/closed bookkeeping; strategies only get
/// this view of it to rule on admission.
#[derive(Copy, Clone, Debug)]
pub struct AdmitContext<C>
where
    C: Cost,
{
    /// A parent link exists for the node.
    pub discovered: bool,
    /// The node is resident in the frontier.
    pub in_frontier: bool,
    /// The node has been expanded.
    pub closed: bool,
    /// Path cost through the node being expanded.
    pub tentative_g: C,
    /// Best known path cost, if the node was discovered before.
    pub current_g: Option<C>,
}

/// The working set of discovered-but-unexpanded nodes.
///
/// One variant per algorithm; the concrete shape (queue, stack, priority
/// structure) is owned by the active variant for the duration of a single
/// search call and does not outlive it.
pub trait Frontier<St, C>: Debug
where
    St: State,
    C: Cost,
{
    /// Whether this strategy consumes heuristic estimates.
    const INFORMED: bool;

    /// The extraction priority recorded in step traces: `h` for greedy,
    /// `g + h` for A*, zero for the uninformed variants.
    fn f(g: C, h: C) -> C;

    /// Leaves the frontier containing exactly the start node.
    fn initialize(&mut self, start: St, h: C);

    /// Rules on a neighbour. Pure decision; the engine applies it.
    fn admit(&self, node: &St, ctx: &AdmitContext<C>) -> Admission;

    /// Adds a node per the variant's ordering.
    fn insert(&mut self, node: St, g: C, h: C);

    /// Re-ranks a resident node after a cheaper path was found.
    ///
    /// Only the A* variant ever admits with [`Admission::Reprioritize`].
    fn reprioritize(&mut self, node: &St, g: C, h: C);

    /// Removes and returns the node the ordering selects next.
    ///
    /// Fails with [`SearchError::EmptyFrontier`] on an empty frontier; that
    /// is a programmer error, callers check `is_empty` first.
    fn extract_next(&mut self) -> Result<St, SearchError>;

    fn contains(&self, node: &St) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the frontier contents in extraction order, for step
    /// records only.
    fn representation(&self) -> Vec<St>;
}
