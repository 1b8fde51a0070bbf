use crate::data_structures::indexed_heap::IndexedMinHeap;
use crate::engine::SearchError;
use crate::frontiers::Admission;
use crate::frontiers::AdmitContext;
use crate::frontiers::Frontier;
use crate::space::Cost;
use crate::space::State;

/// The ranking tuple for greedy best-first.
///
/// Only the heuristic estimate matters (`f = h`); ties go to the
/// earlier-inserted node to keep extraction deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GreedyRank<C>
where
    C: Cost,
{
    h: C,
    seq: u64,
}

impl<C> GreedyRank<C>
where
    C: Cost,
{
    pub fn new(h: C, seq: u64) -> Self {
        Self { h, seq }
    }
}

/// The greedy best-first frontier.
///
/// Greedy ignores path cost entirely, so the first discovered parent of a
/// node is final: a node resident in the frontier or already closed is never
/// re-admitted, even when a cheaper path to it shows up later. That is the
/// intended policy, not an omission.
#[derive(Clone, Debug, Default)]
pub struct GreedyFrontier<St, C>
where
    St: State,
    C: Cost,
{
    heap: IndexedMinHeap<St, GreedyRank<C>>,
    next_seq: u64,
}

impl<St, C> GreedyFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: IndexedMinHeap::new(),
            next_seq: 0,
        }
    }
}

impl<St, C> Frontier<St, C> for GreedyFrontier<St, C>
where
    St: State,
    C: Cost,
{
    const INFORMED: bool = true;

    fn f(_g: C, h: C) -> C {
        h
    }

    fn initialize(&mut self, start: St, h: C) {
        debug_assert!(self.heap.is_empty());
        self.insert(start, C::zero(), h);
    }

    fn admit(&self, _node: &St, ctx: &AdmitContext<C>) -> Admission {
        // First wins: no cost comparison for resident nodes.
        if ctx.closed || ctx.in_frontier {
            Admission::Skip
        } else {
            Admission::Insert
        }
    }

    fn insert(&mut self, node: St, _g: C, h: C) {
        let rank = GreedyRank::new(h, self.next_seq);
        self.next_seq += 1;
        self.heap.push(node, rank);
    }

    fn reprioritize(&mut self, _node: &St, _g: C, _h: C) {
        unreachable!("greedy keeps the first discovered parent");
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
        let mut entries: Vec<(GreedyRank<C>, St)> = self.heap.iter().copied().collect();
        entries.sort_by_key(|(rank, _)| *rank);
        entries.into_iter().map(|(_, node)| node).collect()
    }
}
