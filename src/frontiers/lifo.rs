use crate::engine::SearchError;
use crate::frontiers::Admission;
use crate::frontiers::AdmitContext;
use crate::frontiers::Frontier;
use crate::space::Cost;
use crate::space::State;

/// The DFS frontier: extraction order is reverse insertion order.
///
/// No shortest-path guarantee; the path found depends entirely on the
/// space's neighbour enumeration order.
#[derive(Clone, Debug, Default)]
pub struct LifoFrontier<St>
where
    St: State,
{
    stack: Vec<St>,
}

impl<St> LifoFrontier<St>
where
    St: State,
{
    #[must_use]
    pub fn new() -> Self {
        Self { stack: vec![] }
    }
}

impl<St, C> Frontier<St, C> for LifoFrontier<St>
where
    St: State,
    C: Cost,
{
    const INFORMED: bool = false;

    fn f(_g: C, _h: C) -> C {
        C::zero()
    }

    fn initialize(&mut self, start: St, _h: C) {
        debug_assert!(self.stack.is_empty());
        self.stack.push(start);
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
        self.stack.push(node);
    }

    fn reprioritize(&mut self, _node: &St, _g: C, _h: C) {
        unreachable!("LIFO never admits a node for reprioritization");
    }

    fn extract_next(&mut self) -> Result<St, SearchError> {
        self.stack.pop().ok_or(SearchError::EmptyFrontier)
    }

    fn contains(&self, node: &St) -> bool {
        self.stack.contains(node)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    /// Bottom of the stack first; the next extracted node is last.
    fn representation(&self) -> Vec<St> {
        self.stack.clone()
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
    fn extracts_newest_first() {
        let mut frontier = LifoFrontier::<MazeState>::new();
        Frontier::<_, MazeCost>::initialize(&mut frontier, s(0, 0), 0);
        Frontier::<_, MazeCost>::insert(&mut frontier, s(0, 1), 1, 0);
        Frontier::<_, MazeCost>::insert(&mut frontier, s(1, 0), 1, 0);

        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(1, 0)));
        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(0, 1)));
        assert_eq!(Frontier::<_, MazeCost>::extract_next(&mut frontier), Ok(s(0, 0)));
        assert_eq!(
            Frontier::<_, MazeCost>::extract_next(&mut frontier),
            Err(SearchError::EmptyFrontier)
        );
    }
}
