use crate::data_structures::indexed_heap::IndexedMinHeap;
use crate::engine::SearchError;
use crate::frontiers::Admission;
use crate::frontiers::AdmitContext;
use crate::frontiers::Frontier;
use crate::space::Cost;
use crate::space::State;

/// The ranking tuple for A*.
///
/// We prefer lower f-values and break ties on higher g: among nodes with
/// equal f, the one closer to the goal by path cost goes first, which cuts
/// down re-expansions. Callers relying on result determinism get exactly
/// this tie-break.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AStarRank<C>
where
    C: Cost,
{
    f: C,
    g: C,
}

impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            g,
        }
    }
}

impl<C> Ord for AStarRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .cmp(&other.f)
            .then_with(|| other.g.cmp(&self.g))
    }
}

impl<C> PartialOrd for AStarRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The A* frontier: an indexed priority structure ranked by `f = g + h`.
///
/// Re-discovering an open node with a strictly cheaper path re-ranks the
/// resident entry in place (no stale duplicates, no linear rebuild). Closed
/// nodes are skipped outright under the consistent-heuristic assumption.
#[derive(Clone, Debug, Default)]
pub struct AStarFrontier<St, C>
where
    St: State,
    C: Cost,
{
    heap: IndexedMinHeap<St, AStarRank<C>>,
}

impl<St, C> AStarFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: IndexedMinHeap::new(),
        }
    }
}

impl<St, C> Frontier<St, C> for AStarFrontier<St, C>
where
    St: State,
    C: Cost,
{
    const INFORMED: bool = true;

    fn f(g: C, h: C) -> C {
        g.saturating_add(&h)
    }

    fn initialize(&mut self, start: St, h: C) {
        debug_assert!(self.heap.is_empty());
        self.insert(start, C::zero(), h);
    }

    fn admit(&self, _node: &St, ctx: &AdmitContext<C>) -> Admission {
        if ctx.closed {
            // No cost improvement on a closed node is considered.
            return Admission::Skip;
        }
        if ctx.in_frontier {
            return match ctx.current_g {
                Some(g) if ctx.tentative_g < g => Admission::Reprioritize,
                _ => Admission::Skip,
            };
        }
        Admission::Insert
    }

    fn insert(&mut self, node: St, g: C, h: C) {
        self.heap.push(node, AStarRank::new(g, h));
    }

    fn reprioritize(&mut self, node: &St, g: C, h: C) {
        // A strictly lower g with an unchanged h strictly lowers f, so this
        // is always a rank improvement.
        self.heap.decrease(node, AStarRank::new(g, h));
    }

    fn extract_next(&mut self) -> Result<St, SearchError> {
        self.heap
            .pop()
            .map(|(node, _rank)| node)
            .ok_or(SearchError::EmptyFrontier)
    }

    fn contains(&self, node: &St) -> bool {
        self.heap.contains(node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn representation(&self) -> Vec<St> {
        let mut entries: Vec<(AStarRank<C>, St)> = self.heap.iter().copied().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter().map(|(_, node)| node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_2d::MazeCost;
    use crate::maze_2d::MazeState;

    fn s(row: u32, col: u32) -> MazeState {
        MazeState::new(row, col).unwrap()
    }

    #[test]
    fn ranking() {
        let g = 2u32;
        let h_low = 0u32;
        let h_high = 1u32;
        assert!(AStarRank::new(g, h_low) < AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) == AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) > AStarRank::new(g, h_low));

        // Same f-value: the higher g wins.
        let high_g = AStarRank::new(4u32, 0u32);
        let low_g = AStarRank::new(0u32, 4u32);
        assert!(high_g < low_g);
        assert_eq!(high_g.f, low_g.f);
    }

    #[test]
    fn extracts_lowest_f_first() {
        let mut frontier = AStarFrontier::<MazeState, MazeCost>::new();
        frontier.initialize(s(0, 0), 6);
        frontier.insert(s(0, 1), 1, 3); // f=4
        frontier.insert(s(1, 0), 1, 7); // f=8

        assert_eq!(frontier.extract_next(), Ok(s(0, 1)));
        assert_eq!(frontier.extract_next(), Ok(s(0, 0)));
        assert_eq!(frontier.extract_next(), Ok(s(1, 0)));
    }

    #[test]
    fn admission_rules() {
        let frontier = AStarFrontier::<MazeState, MazeCost>::new();
        let node = s(0, 0);

        let fresh = AdmitContext::<MazeCost> {
            discovered: false,
            in_frontier: false,
            closed: false,
            tentative_g: 3,
            current_g: None,
        };
        assert_eq!(frontier.admit(&node, &fresh), Admission::Insert);

        let closed = AdmitContext::<MazeCost> {
            discovered: true,
            closed: true,
            current_g: Some(1),
            ..fresh
        };
        assert_eq!(frontier.admit(&node, &closed), Admission::Skip);

        let open_cheaper = AdmitContext::<MazeCost> {
            discovered: true,
            in_frontier: true,
            current_g: Some(5),
            ..fresh
        };
        assert_eq!(frontier.admit(&node, &open_cheaper), Admission::Reprioritize);

        // Equal tentative cost does not reprioritize.
        let open_equal = AdmitContext::<MazeCost> {
            current_g: Some(3),
            ..open_cheaper
        };
        assert_eq!(frontier.admit(&node, &open_equal), Admission::Skip);
    }

    #[test]
    fn reprioritize_moves_node_forward() {
        let mut frontier = AStarFrontier::<MazeState, MazeCost>::new();
        frontier.initialize(s(0, 0), 2);
        frontier.insert(s(2, 2), 9, 1); // f=10
        frontier.insert(s(1, 1), 3, 3); // f=6

        frontier.reprioritize(&s(2, 2), 1, 1); // now f=2, g high: first out
        assert_eq!(frontier.extract_next(), Ok(s(2, 2)));
        assert_eq!(frontier.extract_next(), Ok(s(0, 0)));
        assert_eq!(frontier.extract_next(), Ok(s(1, 1)));
    }
}
