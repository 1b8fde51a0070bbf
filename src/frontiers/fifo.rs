use std::collections::VecDeque;

use crate::engine::SearchError;
use crate::frontiers::Admission;
use crate::frontiers::AdmitContext;
use crate::frontiers::Frontier;
use crate::space::Cost;
use crate::space::State;

/// The BFS frontier: extraction order equals insertion order.
///
/// All nodes at depth `k` are expanded before any node at depth `k+1`, which
/// is what guarantees shortest paths by edge count.
#[derive(Clone, Debug, Default)]
pub struct FifoFrontier<St>
where
    St: State,
{
    queue: VecDeque<St>,
}

impl<St> FifoFrontier<St>
where
    St: State,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<St, C> Frontier<St, C> for FifoFrontier<St>
where
    St: State,
    C: Cost,
{
    const INFORMED: bool = false;

    fn f(_g: C, _h: C) -> C {
        C::zero()
    }

    fn initialize(&mut self, start: St, _h: C) {
        debug_assert!(self.queue.is_empty());
        self.queue.push_back(start);
    }

    fn admit(&self, _node: &St, ctx: &AdmitContext<C>) -> Admission {
        // Once discovered, a node is never re-inserted.
        if ctx.discovered {
            Admission::Skip
        } else {
            Admission::Insert
        }
    }

    fn insert(&mut self, node: St, _g: C, _h: C) {
        self.queue.push_back(node);
    }

    fn reprioritize(&mut self, _node: &St, _g: C, _h: C) {
        unreachable!("FIFO never admits a node for reprioritization");
    }

    fn extract_next(&mut self) -> Result<St, SearchError> {
        self.queue.pop_front().ok_or(SearchError::EmptyFrontier)
    }

    fn contains(&self, node: &St) -> bool {
        self.queue.contains(node)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn representation(&self) -> Vec<St> {
        self.queue.iter().copied().collect()
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
    fn extracts_oldest_first() {
        let mut frontier = FifoFrontier::<MazeState>::new();
        Frontier::<_, MazeCost>::initialize(&mut frontier, s(0, 0), 0);
        Frontier::<_, MazeCost>::insert(&mut frontier, s(0, 1), 1, 0);
        Frontier::<_, MazeCost>::insert(&mut frontier, s(1, 0), 1, 0);

        assert_eq!(
            Frontier::<_, MazeCost>::representation(&frontier),
            vec![s(0, 0), s(0, 1), s(1, 0)]
        );
        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(0, 0)));
        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(0, 1)));
        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(1, 0)));
        assert_eq!(
            Frontier::<_, MazeCost>::extract_next(&mut frontier),
            Err(SearchError::EmptyFrontier)
        );
    }

    #[test]
    fn admits_only_undiscovered() {
        let frontier = FifoFrontier::<MazeState>::new();
        let fresh = AdmitContext::<MazeCost> {
            discovered: false,
            in_frontier: false,
            closed: false,
            tentative_g: 1,
            current_g: None,
        };
        let seen = AdmitContext::<MazeCost> {
            discovered: true,
            ..fresh
        };

        assert_eq!(frontier.admit(&s(0, 0), &fresh), Admission::Insert);
        assert_eq!(frontier.admit(&s(0, 0), &seen), Admission::Skip);
    }
}
