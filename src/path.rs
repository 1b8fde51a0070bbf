use rustc_hash::FxHashMap;

use crate::engine::SearchError;
use crate::space::State;

/// Walks parent links from `goal` back to `start` and returns the node
/// sequence start→goal, both endpoints included.
///
/// The walk is bounded by the number of nodes in the parent map; failing to
/// reach `start` within that bound means the map is corrupted (a missing
/// link or a cycle) and yields [`SearchError::DisconnectedPath`].
pub fn reconstruct<St>(
    parents: &FxHashMap<St, Option<St>>,
    start: &St,
    goal: &St,
) -> Result<Vec<St>, SearchError>
where
    St: State,
{
    let bound = parents.len();
    let mut path = vec![*goal];
    let mut current = *goal;

    while current != *start {
        if path.len() >= bound {
            return Err(SearchError::DisconnectedPath);
        }
        match parents.get(&current) {
            Some(Some(parent)) => {
                path.push(*parent);
                current = *parent;
            }
            // Start is the only node allowed a `None` parent, and the loop
            // already stops there.
            _ => return Err(SearchError::DisconnectedPath),
        }
    }

    path.reverse();
    Ok(path)
}
