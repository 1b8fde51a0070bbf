use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

// Binary heap laid out in an array.
//
// ```text
//               0
//        1             2
//    3      4      5        6
//  7   8  9  10  11  12  13  14
// ```
//
//   - Up:         `(i-1)/2`
//   - Down-left:  `(2*i) + 1`
//   - Down-right: `2*(i+1)`

#[inline(always)]
#[must_use]
fn index_up(i: usize) -> usize {
    (i - 1) / 2
}
#[inline(always)]
#[must_use]
fn index_down_left(i: usize) -> usize {
    (2 * i) + 1
}
#[inline(always)]
#[must_use]
fn index_down_right(i: usize) -> usize {
    2 * (i + 1)
}

/// A min-heap over `(rank, key)` entries that also tracks the heap position
/// of every key.
///
/// The position map allows re-ranking an entry by key identity
/// (`decrease`) without a linear search for it, which is what the A*
/// frontier needs to update an open node when a cheaper path is found.
#[derive(Clone, Debug)]
pub struct IndexedMinHeap<K, R>
where
    K: Copy + Eq + Hash + Debug,
    R: Copy + Ord + Debug,
{
    heap: Vec<(R, K)>,
    /// Key -> index into `heap`. Kept in sync on every swap.
    positions: FxHashMap<K, usize>,
}

impl<K, R> IndexedMinHeap<K, R>
where
    K: Copy + Eq + Hash + Debug,
    R: Copy + Ord + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: vec![],
            positions: FxHashMap::default(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    #[inline(always)]
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<R> {
        self.positions.get(key).map(|&i| self.heap[i].0)
    }

    /// Entries in array order. Deterministic for a fixed operation sequence.
    pub fn iter(&self) -> impl Iterator<Item = &(R, K)> {
        self.heap.iter()
    }

    /// Adds a new key.
    ///
    /// The key must not already be in the heap; use `decrease` to re-rank.
    pub fn push(&mut self, key: K, rank: R) {
        debug_assert!(!self.contains(&key), "Pushed a key twice: {key:?}");

        let index = self.heap.len();
        self.heap.push((rank, key));
        self.positions.insert(key, index);
        self.sift_up(index);

        self.verify();
    }

    /// Removes and returns the minimum-ranked entry.
    pub fn pop(&mut self) -> Option<(K, R)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        if last != 0 {
            self.swap_entries(0, last);
        }
        let (rank, key) = self.heap.pop().expect("checked non-empty above");
        self.positions.remove(&key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        self.verify();
        Some((key, rank))
    }

    /// Improves the rank of an existing key and restores heap order.
    ///
    /// The new rank must not be worse than the current one.
    pub fn decrease(&mut self, key: &K, rank: R) {
        let index = *self
            .positions
            .get(key)
            .expect("decrease() requires the key to be present");
        debug_assert!(
            rank <= self.heap[index].0,
            "decrease() must not worsen a rank: {rank:?} > {:?}",
            self.heap[index].0
        );

        self.heap[index].0 = rank;
        self.sift_up(index);

        self.verify();
    }

    /// Raises an entry. Returns its new index.
    fn sift_up(&mut self, index: usize) -> usize {
        let mut pos = index;
        while pos > 0 {
            let parent = index_up(pos);
            if self.heap[parent].0 <= self.heap[pos].0 {
                break;
            }
            self.swap_entries(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers an entry. Returns its new index.
    fn sift_down(&mut self, index: usize) -> usize {
        let len = self.heap.len();
        let mut pos = index;

        loop {
            let left = index_down_left(pos);
            if left >= len {
                break;
            }

            // Pick the best child
            let mut child = left;
            let right = index_down_right(pos);
            if right < len && self.heap[right].0 < self.heap[left].0 {
                child = right;
            }

            if self.heap[pos].0 <= self.heap[child].0 {
                break;
            }
            self.swap_entries(pos, child);
            pos = child;
        }
        pos
    }

    /// Swaps two entries, keeping the position map in sync.
    #[inline(always)]
    fn swap_entries(&mut self, l: usize, r: usize) {
        debug_assert!(l != r, "Swap({l}, {r}) is pointless");
        self.heap.swap(l, r);
        self.positions.insert(self.heap[l].1, l);
        self.positions.insert(self.heap[r].1, r);
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify(&self) {
        // All good... (hopefully)
    }
    #[cfg(feature = "verify")]
    fn verify(&self) {
        debug_assert_eq!(self.heap.len(), self.positions.len());
        // Every entry,
        for (i, (rank, key)) in self.heap.iter().enumerate() {
            // - Has the right position recorded.
            debug_assert_eq!(self.positions[key], i);

            // - Goes after its parent entry, if any.
            if i == 0 {
                continue;
            }
            let p = index_up(i);
            debug_assert!(
                self.heap[p].0 <= *rank,
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }
}

impl<K, R> Default for IndexedMinHeap<K, R>
where
    K: Copy + Eq + Hash + Debug,
    R: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
