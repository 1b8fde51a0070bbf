use hrsw::Stopwatch;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::frontiers::Admission;
use crate::frontiers::AdmitContext;
use crate::frontiers::Frontier;
use crate::path;
use crate::result::ExpansionRank;
use crate::result::SearchResult;
use crate::result::StepRecord;
use crate::result::Termination;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Heuristic;
use crate::space::Space;
use crate::space::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Programmer error: `extract_next()` on an empty frontier. Callers must
    /// check emptiness first; this is not a recoverable runtime condition.
    #[error("extract_next() called on an empty frontier")]
    EmptyFrontier,
    /// The parent walk from the goal did not terminate at the start, so a
    /// search invariant was broken (missing link or cycle in parent links).
    #[error("parent walk did not terminate at the start node")]
    DisconnectedPath,
}

#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    /// Bound on expansions. `None` runs until the frontier empties.
    pub max_steps: Option<usize>,
    /// Record a [`StepRecord`] per expansion. The trace feeds post-run
    /// reporting and costs nothing when left off.
    pub record_trace: bool,
}

/// Runs one search to completion.
///
/// The shared traversal loop for all four strategies; only the frontier
/// plugged in varies. The engine owns the closed set, the parent links and
/// the cost bookkeeping, and the frontier value passed in is consumed by the
/// call, so concurrent runs share no mutable state.
///
/// "No path" and "step limit hit" are result states, not errors; the only
/// error this returns is [`SearchError::EmptyFrontier`], which cannot occur
/// as the loop checks emptiness before extracting.
pub fn run<H, F, Sp, St, A, C>(
    space: &Sp,
    start: St,
    goal: St,
    mut frontier: F,
    options: &SearchOptions,
) -> Result<SearchResult<St, C>, SearchError>
where
    H: Heuristic<St, C>,
    F: Frontier<St, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    let mut stopwatch = Stopwatch::new_started();
    log::debug!(
        "search: start={start:?} goal={goal:?} max_steps={:?}",
        options.max_steps
    );

    let mut parents: FxHashMap<St, Option<St>> = FxHashMap::default();
    parents.insert(start, None);
    let mut best_g: FxHashMap<St, C> = FxHashMap::default();
    best_g.insert(start, C::zero());
    let mut discovery: FxHashMap<St, usize> = FxHashMap::default();
    discovery.insert(start, 0);
    let mut visited = vec![start];

    if start == goal {
        stopwatch.stop();
        return Ok(SearchResult {
            path: Some(vec![start]),
            path_cost: Some(C::zero()),
            visited,
            termination: Termination::PathFound,
            steps: 0,
            duration: stopwatch.elapsed(),
            trace: vec![],
            discovery,
            expansion: FxHashMap::default(),
            parents,
        });
    }

    frontier.initialize(start, H::h(&start, &goal));
    let mut closed: FxHashSet<St> = FxHashSet::default();
    let mut expansion: FxHashMap<St, usize> = FxHashMap::default();
    let mut trace = vec![];
    let mut steps = 0usize;

    let termination = loop {
        if frontier.is_empty() {
            break Termination::FrontierExhausted;
        }
        if options.max_steps.is_some_and(|limit| steps >= limit) {
            break Termination::StepLimitExceeded;
        }

        let frontier_before = options.record_trace.then(|| frontier.representation());

        let current = frontier.extract_next()?;
        if closed.contains(&current) {
            // Stale entry left behind by a cost update; already expanded.
            continue;
        }

        closed.insert(current);
        steps += 1;
        expansion.insert(current, steps);

        if current == goal {
            break Termination::PathFound;
        }

        let g_current = best_g[&current];
        let mut admitted = vec![];
        for (neighbour, action) in space.neighbours(&current) {
            let tentative_g = g_current.saturating_add(&space.cost(&current, &action));
            let ctx = AdmitContext {
                discovered: parents.contains_key(&neighbour),
                in_frontier: frontier.contains(&neighbour),
                closed: closed.contains(&neighbour),
                tentative_g,
                current_g: best_g.get(&neighbour).copied(),
            };

            match frontier.admit(&neighbour, &ctx) {
                Admission::Skip => {}
                Admission::Insert => {
                    parents.insert(neighbour, Some(current));
                    best_g.insert(neighbour, tentative_g);
                    if !ctx.discovered {
                        discovery.insert(neighbour, steps);
                        visited.push(neighbour);
                    }
                    let h = if F::INFORMED {
                        H::h(&neighbour, &goal)
                    } else {
                        C::zero()
                    };
                    frontier.insert(neighbour, tentative_g, h);
                    admitted.push(neighbour);
                }
                Admission::Reprioritize => {
                    parents.insert(neighbour, Some(current));
                    best_g.insert(neighbour, tentative_g);
                    frontier.reprioritize(&neighbour, tentative_g, H::h(&neighbour, &goal));
                    admitted.push(neighbour);
                }
            }
        }

        if options.record_trace {
            let rank = F::INFORMED.then(|| {
                let h = H::h(&current, &goal);
                ExpansionRank {
                    g: g_current,
                    h,
                    f: F::f(g_current, h),
                }
            });
            trace.push(StepRecord {
                step: steps,
                expanded: current,
                rank,
                neighbours_admitted: admitted,
                frontier_before: frontier_before.unwrap_or_default(),
                frontier_after: frontier.representation(),
            });
        }
    };

    let (path, path_cost, termination) = match termination {
        Termination::PathFound => match path::reconstruct(&parents, &start, &goal) {
            Ok(p) => (Some(p), Some(best_g[&goal]), Termination::PathFound),
            Err(e) => {
                log::error!("path reconstruction failed: {e}");
                (None, None, Termination::DisconnectedPath)
            }
        },
        other => (None, None, other),
    };

    stopwatch.stop();
    log::debug!(
        "search: {termination:?} after {steps} steps, {} nodes discovered",
        visited.len()
    );

    Ok(SearchResult {
        path,
        path_cost,
        visited,
        termination,
        steps,
        duration: stopwatch.elapsed(),
        trace,
        discovery,
        expansion,
        parents,
    })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::algorithms::Algorithm;
    use crate::algorithms::solve;
    use crate::maze_2d::MazeCost;
    use crate::maze_2d::MazeHeuristicManhattan;
    use crate::maze_2d::MazeProblem;
    use crate::maze_2d::MazeState;

    fn s(row: u32, col: u32) -> MazeState {
        MazeState::new(row, col).unwrap()
    }

    fn run_on(
        problem: &MazeProblem,
        algorithm: Algorithm,
        options: &SearchOptions,
    ) -> SearchResult<MazeState, MazeCost> {
        solve::<MazeHeuristicManhattan, _, _, _, _>(
            problem.space(),
            problem.start(),
            problem.goal(),
            algorithm,
            options,
        )
        .unwrap()
    }

    fn open_5x5() -> MazeProblem {
        MazeProblem::open_grid(5, 5, (1, 1), (3, 3)).unwrap()
    }

    #[test]
    fn start_equals_goal_is_trivial_success() {
        let problem = MazeProblem::open_grid(3, 3, (1, 1), (1, 1)).unwrap();

        for algorithm in Algorithm::ALL {
            let result = run_on(&problem, algorithm, &SearchOptions::default());
            assert!(result.success(), "{algorithm}");
            assert_eq!(result.path, Some(vec![s(1, 1)]));
            assert_eq!(result.steps, 0);
            assert_eq!(result.visited, vec![s(1, 1)]);
        }
    }

    #[test]
    fn bfs_finds_shortest_on_open_grid() {
        let result = run_on(&open_5x5(), Algorithm::BreadthFirst, &SearchOptions::default());

        assert!(result.success());
        // Manhattan distance 4, so 5 nodes inclusive of both endpoints.
        assert_eq!(result.path_len(), Some(5));
        assert_eq!(result.path_cost, Some(4));
    }

    #[test]
    fn astar_matches_bfs_length_on_unit_costs() {
        let problem = open_5x5();
        let bfs = run_on(&problem, Algorithm::BreadthFirst, &SearchOptions::default());
        let astar = run_on(&problem, Algorithm::AStar, &SearchOptions::default());

        assert!(astar.success());
        assert_eq!(astar.path_len(), bfs.path_len());
        assert_eq!(astar.path_cost, bfs.path_cost);
    }

    #[test]
    fn bfs_path_is_never_longer() {
        let maze = indoc! {"
            #########
            #S...#..#
            ##.#.#.##
            #..#...G#
            #.###.###
            #.......#
            #########
        "};
        let problem = MazeProblem::try_from(maze).unwrap();
        let bfs = run_on(&problem, Algorithm::BreadthFirst, &SearchOptions::default());
        assert!(bfs.success());

        for algorithm in [Algorithm::DepthFirst, Algorithm::GreedyBestFirst, Algorithm::AStar] {
            let other = run_on(&problem, algorithm, &SearchOptions::default());
            assert!(other.success(), "{algorithm}");
            assert!(
                bfs.path_len() <= other.path_len(),
                "{algorithm}: {:?} < {:?}",
                other.path_len(),
                bfs.path_len()
            );
        }
    }

    #[test]
    fn greedy_no_longer_than_dfs_on_open_grid() {
        let problem = open_5x5();
        let dfs = run_on(&problem, Algorithm::DepthFirst, &SearchOptions::default());
        let greedy = run_on(&problem, Algorithm::GreedyBestFirst, &SearchOptions::default());

        assert!(dfs.success());
        assert!(greedy.success());
        assert!(greedy.path_len() <= dfs.path_len());
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        let maze = indoc! {"
            #####
            #S#G#
            #####
        "};
        let problem = MazeProblem::try_from(maze).unwrap();

        for algorithm in Algorithm::ALL {
            let result = run_on(&problem, algorithm, &SearchOptions::default());
            assert!(!result.success(), "{algorithm}");
            assert_eq!(result.termination, Termination::FrontierExhausted);
            assert_eq!(result.path, None);
            assert!(!result.visited.is_empty());
        }
    }

    #[test]
    fn zero_step_limit_is_reported_as_such() {
        let options = SearchOptions {
            max_steps: Some(0),
            ..SearchOptions::default()
        };

        for algorithm in Algorithm::ALL {
            let result = run_on(&open_5x5(), algorithm, &options);
            assert!(!result.success(), "{algorithm}");
            assert_eq!(result.termination, Termination::StepLimitExceeded);
            assert!(result.visited.len() <= 1);
        }
    }

    #[test]
    fn step_limit_stops_mid_search() {
        let options = SearchOptions {
            max_steps: Some(3),
            ..SearchOptions::default()
        };
        let result = run_on(&open_5x5(), Algorithm::BreadthFirst, &options);

        assert_eq!(result.termination, Termination::StepLimitExceeded);
        assert_eq!(result.steps, 3);
    }

    #[test]
    fn reruns_are_identical() {
        let maze = indoc! {"
            ########
            #S.....#
            #.####.#
            #.#..#.#
            #.#.##.#
            #....#G#
            ########
        "};
        let problem = MazeProblem::try_from(maze).unwrap();

        for algorithm in Algorithm::ALL {
            let first = run_on(&problem, algorithm, &SearchOptions::default());
            let second = run_on(&problem, algorithm, &SearchOptions::default());

            assert_eq!(first.path, second.path, "{algorithm}");
            assert_eq!(first.visited, second.visited, "{algorithm}");
            assert_eq!(first.steps, second.steps, "{algorithm}");
        }
    }

    #[test]
    fn stored_parents_reproduce_the_path() {
        let problem = open_5x5();

        for algorithm in Algorithm::ALL {
            let result = run_on(&problem, algorithm, &SearchOptions::default());
            assert!(result.success(), "{algorithm}");

            let rebuilt =
                path::reconstruct(&result.parents, &problem.start(), &problem.goal()).unwrap();
            assert_eq!(Some(rebuilt), result.path, "{algorithm}");
        }
    }

    #[test]
    fn trace_records_one_entry_per_non_goal_expansion() {
        let options = SearchOptions {
            max_steps: None,
            record_trace: true,
        };
        let problem = open_5x5();

        let result = run_on(&problem, Algorithm::BreadthFirst, &options);
        assert!(result.success());
        // The goal expansion returns before its record is appended.
        assert_eq!(result.trace.len(), result.steps - 1);

        let first = &result.trace[0];
        assert_eq!(first.step, 1);
        assert_eq!(first.expanded, s(1, 1));
        assert_eq!(first.frontier_before, vec![s(1, 1)]);
        // Open grid: all four neighbours of the start are admitted.
        assert_eq!(first.neighbours_admitted.len(), 4);
        assert_eq!(first.frontier_after.len(), 4);
        assert!(first.rank.is_none());

        for window in result.trace.windows(2) {
            assert_eq!(window[0].step + 1, window[1].step);
        }
    }

    #[test]
    fn trace_carries_ranks_for_informed_strategies() {
        let options = SearchOptions {
            max_steps: None,
            record_trace: true,
        };
        let result = run_on(&open_5x5(), Algorithm::AStar, &options);

        assert!(result.success());
        let first = result.trace[0].rank.expect("informed trace has ranks");
        assert_eq!(first.g, 0);
        assert_eq!(first.h, 4); // Manhattan (1,1) -> (3,3)
        assert_eq!(first.f, 4);
    }

    #[test]
    fn trace_is_empty_when_not_requested() {
        let result = run_on(&open_5x5(), Algorithm::AStar, &SearchOptions::default());
        assert!(result.trace.is_empty());
    }

    /// Fixed-point relaxation over all reachable cells. Slow but obviously
    /// correct, used as the reference for optimality checks.
    fn exhaustive_shortest_cost(problem: &MazeProblem) -> Option<MazeCost> {
        let mut dist: FxHashMap<MazeState, MazeCost> = FxHashMap::default();
        dist.insert(problem.start(), 0);

        loop {
            let mut changed = false;
            let snapshot: Vec<(MazeState, MazeCost)> =
                dist.iter().map(|(node, d)| (*node, *d)).collect();
            for (node, d) in snapshot {
                for (neighbour, action) in problem.space().neighbours(&node) {
                    let candidate = d + problem.space().cost(&node, &action);
                    if dist.get(&neighbour).is_none_or(|&current| candidate < current) {
                        dist.insert(neighbour, candidate);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        dist.get(&problem.goal()).copied()
    }

    #[test]
    fn astar_is_optimal_on_small_mazes() {
        let maze = indoc! {"
            ##########
            #S...#...#
            #.##.#.#.#
            #.#..#.#.#
            #.#.##.#.#
            #...#..#G#
            ##########
        "};
        let base = MazeProblem::try_from(maze).unwrap();

        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let problem = base.randomize(&mut rng).unwrap();

            let expected = exhaustive_shortest_cost(&problem);
            let astar = run_on(&problem, Algorithm::AStar, &SearchOptions::default());
            let bfs = run_on(&problem, Algorithm::BreadthFirst, &SearchOptions::default());

            match expected {
                Some(cost) => {
                    assert!(astar.success(), "seed {seed}");
                    assert_eq!(astar.path_cost, Some(cost), "seed {seed}");
                    assert_eq!(bfs.path_cost, Some(cost), "seed {seed}");
                }
                None => {
                    assert_eq!(astar.termination, Termination::FrontierExhausted, "seed {seed}");
                    assert_eq!(bfs.termination, Termination::FrontierExhausted, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn visited_is_bounded_by_reachable_nodes() {
        let problem = open_5x5();
        // 5x5 open grid has 25 reachable cells.
        for algorithm in Algorithm::ALL {
            let result = run_on(&problem, algorithm, &SearchOptions::default());
            assert!(result.visited.len() <= 25, "{algorithm}");

            let mut sorted = result.visited.clone();
            sorted.sort_by_key(|n| (n.row(), n.col()));
            sorted.dedup();
            assert_eq!(sorted.len(), result.visited.len(), "{algorithm}: duplicates");
        }
    }
}
