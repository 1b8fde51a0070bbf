use derive_more::Display;

use crate::engine;
use crate::engine::SearchError;
use crate::engine::SearchOptions;
use crate::frontiers::AStarFrontier;
use crate::frontiers::FifoFrontier;
use crate::frontiers::GreedyFrontier;
use crate::frontiers::LifoFrontier;
use crate::result::SearchResult;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Heuristic;
use crate::space::Space;
use crate::space::State;
use crate::space::ZeroHeuristic;

/// The four search strategies, one per frontier variant.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// FIFO frontier. Shortest path in node count on unit costs.
    #[display("BFS")]
    BreadthFirst,
    /// LIFO frontier. Deep exploration; the path found is rarely shortest.
    #[display("DFS")]
    DepthFirst,
    /// Ranked by `h` alone. Fast, no optimality guarantee.
    #[display("Greedy")]
    GreedyBestFirst,
    /// Ranked by `f = g + h`. Optimal under an admissible heuristic.
    #[display("A*")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
        Algorithm::AStar,
    ];

    #[must_use]
    pub fn is_informed(self) -> bool {
        matches!(self, Algorithm::GreedyBestFirst | Algorithm::AStar)
    }
}

/// Runs `algorithm` on `space` from `start` to `goal`.
///
/// The uninformed strategies never call `H`; passing the space's real
/// heuristic for them is harmless.
pub fn solve<H, Sp, St, A, C>(
    space: &Sp,
    start: St,
    goal: St,
    algorithm: Algorithm,
    options: &SearchOptions,
) -> Result<SearchResult<St, C>, SearchError>
where
    H: Heuristic<St, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    match algorithm {
        Algorithm::BreadthFirst => {
            engine::run::<ZeroHeuristic, _, _, _, _, _>(
                space,
                start,
                goal,
                FifoFrontier::new(),
                options,
            )
        }
        Algorithm::DepthFirst => {
            engine::run::<ZeroHeuristic, _, _, _, _, _>(
                space,
                start,
                goal,
                LifoFrontier::new(),
                options,
            )
        }
        Algorithm::GreedyBestFirst => {
            engine::run::<H, _, _, _, _, _>(space, start, goal, GreedyFrontier::new(), options)
        }
        Algorithm::AStar => {
            engine::run::<H, _, _, _, _, _>(space, start, goal, AStarFrontier::new(), options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informedness() {
        assert!(!Algorithm::BreadthFirst.is_informed());
        assert!(!Algorithm::DepthFirst.is_informed());
        assert!(Algorithm::GreedyBestFirst.is_informed());
        assert!(Algorithm::AStar.is_informed());
    }

    #[test]
    fn display_names() {
        let names: Vec<String> = Algorithm::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["BFS", "DFS", "Greedy", "A*"]);
    }
}
