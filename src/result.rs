use std::time::Duration;

use derive_more::Display;
use human_duration::human_duration;
use rustc_hash::FxHashMap;

use crate::space::Cost;
use crate::space::State;

/// Why a search call returned.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Termination {
    /// The goal was expanded and a path reconstructed.
    #[display("path found")]
    PathFound,
    /// The frontier emptied without reaching the goal. Expected outcome, not
    /// an error.
    #[display("frontier exhausted")]
    FrontierExhausted,
    /// The step bound was hit before the frontier emptied. Distinct from
    /// exhaustion so callers can tell the two apart.
    #[display("step limit exceeded")]
    StepLimitExceeded,
    /// The parent walk from the goal failed to reach the start. Indicates a
    /// broken search invariant.
    #[display("disconnected parent map")]
    DisconnectedPath,
}

/// The g/h/f values an informed strategy used when expanding a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExpansionRank<C>
where
    C: Cost,
{
    pub g: C,
    pub h: C,
    pub f: C,
}

/// Immutable snapshot of one expansion, appended per loop iteration.
#[derive(Clone, Debug)]
pub struct StepRecord<St, C>
where
    St: State,
    C: Cost,
{
    /// 1-based expansion counter.
    pub step: usize,
    pub expanded: St,
    /// Ranking of the expanded node; `None` for the uninformed strategies.
    pub rank: Option<ExpansionRank<C>>,
    /// Neighbours inserted or re-prioritized by this expansion, in the
    /// space's enumeration order.
    pub neighbours_admitted: Vec<St>,
    /// Frontier contents just before extraction.
    pub frontier_before: Vec<St>,
    /// Frontier contents after neighbour admission.
    pub frontier_after: Vec<St>,
}

/// Outcome of one search call. Created once, never mutated; reporting
/// collaborators read it after the run completes.
#[derive(Clone, Debug)]
pub struct SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    /// Node sequence start→goal, absent on failure.
    pub path: Option<Vec<St>>,
    /// Cost of `path` under the space's step costs.
    pub path_cost: Option<C>,
    /// Every discovered node, in discovery order.
    pub visited: Vec<St>,
    pub termination: Termination,
    /// Number of expansions performed.
    pub steps: usize,
    /// Wall-clock duration of the call.
    pub duration: Duration,
    /// Per-expansion records; empty unless tracing was requested.
    pub trace: Vec<StepRecord<St, C>>,
    /// Node -> step at which it was first discovered (0 for the start).
    pub discovery: FxHashMap<St, usize>,
    /// Node -> step at which it was expanded.
    pub expansion: FxHashMap<St, usize>,
    /// Node -> discovering predecessor (`None` for the start).
    pub parents: FxHashMap<St, Option<St>>,
}

impl<St, C> SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn success(&self) -> bool {
        self.termination == Termination::PathFound
    }

    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Path nodes over visited nodes. Absent when no path was found.
    #[must_use]
    pub fn efficiency(&self) -> Option<f64> {
        let path_len = self.path_len()?;
        if self.visited.is_empty() {
            return None;
        }
        Some(path_len as f64 / self.visited.len() as f64)
    }

    /// Average nodes discovered per expansion, excluding the start node.
    ///
    /// Approximates the branching factor of the search space; zero when at
    /// most one node was expanded.
    #[must_use]
    pub fn avg_branching_factor(&self) -> f64 {
        if self.expansion.len() <= 1 {
            return 0.0;
        }
        (self.discovery.len() - 1) as f64 / self.expansion.len() as f64
    }
}

impl<St, C> std::fmt::Display for SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.success() {
            writeln!(
                f,
                "Search succeeded in {} steps ({})",
                self.steps,
                human_duration(&self.duration)
            )?;
            if let Some(len) = self.path_len() {
                writeln!(f, "  path length:      {len} nodes")?;
            }
            if let Some(cost) = self.path_cost {
                writeln!(f, "  path cost:        {cost}")?;
            }
            writeln!(f, "  visited nodes:    {}", self.visited_count())?;
            if let Some(efficiency) = self.efficiency() {
                writeln!(f, "  efficiency:       {:.1}%", efficiency * 100.0)?;
            }
            write!(
                f,
                "  branching factor: {:.2} neighbours/node",
                self.avg_branching_factor()
            )
        } else {
            writeln!(
                f,
                "Search failed ({}) after {} steps ({})",
                self.termination,
                self.steps,
                human_duration(&self.duration)
            )?;
            writeln!(f, "  visited nodes:    {}", self.visited_count())?;
            write!(
                f,
                "  branching factor: {:.2} neighbours/node",
                self.avg_branching_factor()
            )
        }
    }
}
