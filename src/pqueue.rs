//! The mergeable priority queue.
//!
//! [`PQueue`] owns a forest of heap-ordered trees whose roots form a
//! circular doubly linked list. Every mutating operation funnels through
//! the root-list splice primitives; extraction additionally runs the
//! consolidation pass that links same-degree roots until all root degrees
//! are distinct.

use std::fmt;

use crate::arena::{Arena, NodeIdx};

/// Error returned by minimum queries and extractions on an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueueError;

impl fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the queue contains no elements")
    }
}

impl std::error::Error for EmptyQueueError {}

/// A mergeable priority queue built on a Fibonacci heap.
///
/// Keys are ordered by a predicate fixed at construction; [`PQueue::new`]
/// defaults to ascending order for `K: Ord`. The predicate must define a
/// consistent strict weak ordering. That contract is assumed rather than
/// validated: an inconsistent predicate yields a wrong minimum, never
/// memory unsafety.
///
/// The queue is single-owner and not thread safe. Callers needing shared
/// access must provide their own mutual exclusion.
///
/// # Example
///
/// ```rust
/// use fibonacci_pqueue::PQueue;
///
/// let mut queue = PQueue::new();
/// queue.insert(5);
/// queue.insert(3);
/// queue.insert(8);
///
/// assert_eq!(queue.find_min(), Ok(&3));
/// assert_eq!(queue.extract_min(), Ok(3));
/// assert_eq!(queue.extract_min(), Ok(5));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct PQueue<K> {
    less: Box<dyn Fn(&K, &K) -> bool>,
    arena: Arena<K>,
    min: Option<NodeIdx>,
    n: usize,
}

impl<K: Ord> PQueue<K> {
    /// Creates an empty queue ordered ascending.
    pub fn new() -> Self {
        Self::with_comparator(|a, b| a < b)
    }

    /// Builds a queue containing `elements`, ordered ascending.
    ///
    /// O(elements): each value is inserted lazily, no consolidation runs.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self::from_elements_with(elements, |a, b| a < b)
    }
}

impl<K> PQueue<K> {
    /// Creates an empty queue ordered by `less`.
    ///
    /// `less(a, b)` must hold exactly when `a` should be extracted before
    /// `b`; ties may fall either way. A descending predicate turns the
    /// queue into a max-queue, and a key-extraction predicate orders
    /// composite values.
    pub fn with_comparator<F>(less: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        PQueue {
            less: Box::new(less),
            arena: Arena::new(),
            min: None,
            n: 0,
        }
    }

    /// Builds a queue containing `elements`, ordered by `less`.
    pub fn from_elements_with<I, F>(elements: I, less: F) -> Self
    where
        I: IntoIterator<Item = K>,
        F: Fn(&K, &K) -> bool + 'static,
    {
        let mut queue = Self::with_comparator(less);
        for key in elements {
            queue.insert(key);
        }
        queue
    }

    /// Number of elements currently in the queue.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts `key` as a fresh singleton root.
    ///
    /// O(1): the new node joins the root list and the cost of restoring a
    /// low-degree root structure is deferred to the next extraction.
    pub fn insert(&mut self, key: K) {
        let node = self.arena.alloc(key);
        self.add_to_roots(node);
        self.n += 1;
    }

    /// Returns the smallest key without removing it. O(1).
    pub fn find_min(&self) -> Result<&K, EmptyQueueError> {
        self.min
            .map(|min| &self.arena[min].key)
            .ok_or(EmptyQueueError)
    }

    /// Removes and returns the smallest key. O(log n) amortized.
    pub fn extract_min(&mut self) -> Result<K, EmptyQueueError> {
        let min = self.min.ok_or(EmptyQueueError)?;

        // Promote the children of the departing minimum to roots. The walk
        // is counted by degree: once splicing starts rewriting neighbor
        // links a circular list has no usable end sentinel, and a single
        // child is its own neighbor on both sides.
        let degree = self.arena[min].degree;
        if let Some(first_child) = self.arena[min].child {
            let mut child = first_child;
            for _ in 0..degree {
                let next = self.arena[child].left;
                self.arena[child].parent = None;
                self.add_to_roots(child);
                child = next;
            }
        }

        self.remove_from_roots(min);
        let right = self.arena[min].right;
        if right == min {
            self.min = None;
        } else {
            // Any surviving root works as the provisional minimum;
            // consolidation re-derives the true one.
            self.min = Some(right);
            self.consolidate();
        }

        self.n -= 1;
        Ok(self.arena.remove(min).key)
    }

    /// Returns the second-smallest key without changing the stored keyset.
    /// O(log n) amortized.
    ///
    /// Composed from extraction and reinsertion rather than a dedicated
    /// walk, so the internal tree shape changes even though the keyset does
    /// not: the reinserted minimum comes back as a fresh singleton root.
    /// The returned key is cloned because its original stays in the queue.
    ///
    /// Fails on a queue with fewer than two elements, leaving the queue
    /// exactly as found.
    pub fn find_second(&mut self) -> Result<K, EmptyQueueError>
    where
        K: Clone,
    {
        let first = self.extract_min()?;
        let second = self.find_min().cloned();
        self.insert(first);
        second
    }

    /// Removes and returns the second-smallest key, leaving the minimum in
    /// place. O(log n) amortized.
    ///
    /// Fails on a queue with fewer than two elements, leaving the queue
    /// exactly as found.
    pub fn extract_second(&mut self) -> Result<K, EmptyQueueError> {
        let first = self.extract_min()?;
        let second = self.extract_min();
        self.insert(first);
        second
    }

    /// Absorbs `other`, keeping this queue's comparator.
    ///
    /// The two root lists are joined with four link rewrites and a single
    /// comparison picks the surviving minimum; no consolidation runs.
    /// `other` must have been built with a compatible ordering. Taking it
    /// by value enforces that the absorbed queue is never used again.
    ///
    /// Relocating the absorbed nodes into this queue's arena is linear in
    /// the absorbed queue's slot count; the link structure itself is
    /// spliced in constant time.
    pub fn merge(&mut self, other: PQueue<K>) {
        let PQueue {
            less: _,
            arena: other_arena,
            min: other_min,
            n: other_n,
        } = other;
        let Some(other_min) = other_min else {
            return;
        };

        let offset = self.arena.append(other_arena);
        let other_min = other_min.offset(offset);

        match self.min {
            None => self.min = Some(other_min),
            Some(self_min) => {
                let self_right = self.arena[self_min].right;
                let other_left = self.arena[other_min].left;
                self.arena[self_min].right = other_min;
                self.arena[other_min].left = self_min;
                self.arena[other_left].right = self_right;
                self.arena[self_right].left = other_left;

                if self.key_less(other_min, self_min) {
                    self.min = Some(other_min);
                }
            }
        }
        self.n += other_n;
    }

    /// The comparator applied to the keys at two arena indices.
    fn key_less(&self, a: NodeIdx, b: NodeIdx) -> bool {
        (self.less)(&self.arena[a].key, &self.arena[b].key)
    }

    /// Splices `node` into the root list next to the current minimum and
    /// advances the minimum if `node` compares smaller. The only place the
    /// cached minimum moves outside of consolidation.
    fn add_to_roots(&mut self, node: NodeIdx) {
        match self.min {
            Some(min) => {
                let min_right = self.arena[min].right;
                self.arena[node].left = min;
                self.arena[node].right = min_right;
                self.arena[min].right = node;
                self.arena[min_right].left = node;
                if self.key_less(node, min) {
                    self.min = Some(node);
                }
            }
            None => {
                self.arena[node].left = node;
                self.arena[node].right = node;
                self.min = Some(node);
            }
        }
    }

    /// Unsplices `node` from whichever circular list holds it by relinking
    /// its neighbors. Leaves `self.min` alone; callers removing the minimum
    /// itself reassign it afterward.
    fn remove_from_roots(&mut self, node: NodeIdx) {
        let left = self.arena[node].left;
        let right = self.arena[node].right;
        self.arena[left].right = right;
        self.arena[right].left = left;
    }

    /// Links same-degree roots until every root degree is distinct, then
    /// rebuilds the root list and re-derives the minimum.
    ///
    /// A single call is O(roots), but across any operation sequence the
    /// standard potential argument (potential = root count; nothing is
    /// ever marked without decrease-key) amortizes extraction to O(log n).
    fn consolidate(&mut self) {
        let mut slots: Vec<Option<NodeIdx>> = vec![None; degree_slots(self.n)];

        // Detach one root at a time, linking it with any same-degree tree
        // already in the table until its slot is free.
        while let Some(detached) = self.min {
            let left = self.arena[detached].left;
            self.min = if left == detached { None } else { Some(left) };
            self.remove_from_roots(detached);
            self.arena[detached].left = detached;
            self.arena[detached].right = detached;

            let mut x = detached;
            let mut degree = self.arena[x].degree;
            while let Some(y) = slots[degree] {
                // The root that compares smaller becomes the parent.
                let (winner, loser) = if self.key_less(x, y) { (x, y) } else { (y, x) };
                self.heap_link(loser, winner);
                slots[degree] = None;
                x = winner;
                degree += 1;
            }
            slots[degree] = Some(x);
        }

        // Reinsert the surviving trees; add_to_roots re-derives the minimum
        // as it goes. The first tree is already self-linked from detaching.
        for root in slots.into_iter().flatten() {
            match self.min {
                None => self.min = Some(root),
                Some(_) => self.add_to_roots(root),
            }
        }
    }

    /// Makes `loser` a child of `winner`, leaving the winner's degree one
    /// higher.
    ///
    /// Precondition: `winner`'s key does not compare greater than
    /// `loser`'s, so heap order holds across the new edge.
    fn heap_link(&mut self, loser: NodeIdx, winner: NodeIdx) {
        self.remove_from_roots(loser);
        self.arena[loser].parent = Some(winner);
        match self.arena[winner].child {
            Some(child) => {
                let child_right = self.arena[child].right;
                self.arena[loser].left = child;
                self.arena[loser].right = child_right;
                self.arena[child].right = loser;
                self.arena[child_right].left = loser;
            }
            None => {
                self.arena[loser].left = loser;
                self.arena[loser].right = loser;
                self.arena[winner].child = Some(loser);
            }
        }
        self.arena[winner].degree += 1;
    }
}

/// Capacity of the consolidation degree table.
///
/// Without decrease-key every tree stays binomial, so a root of degree d
/// has 2^d descendants and d never exceeds ceil(log2(n)). One extra slot
/// covers a link performed while a root sits at the table's edge, and the
/// n <= 1 guard keeps the logarithm out of degenerate territory.
fn degree_slots(n: usize) -> usize {
    if n <= 1 {
        return 2;
    }
    let ceil_log2 = (usize::BITS - (n - 1).leading_zeros()) as usize;
    ceil_log2 + 2
}

impl<K: Ord> Default for PQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for PQueue<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<K> Extend<K> for PQueue<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for PQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PQueue")
            .field("len", &self.n)
            .field("min", &self.min.map(|min| &self.arena[min].key))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<K> PQueue<K> {
    /// Walks the whole forest checking every structural invariant, from
    /// the circular root list down to per-edge heap order and per-node
    /// degree counts.
    fn assert_invariants(&self) {
        let Some(min) = self.min else {
            assert_eq!(self.n, 0, "empty queue with nonzero count");
            return;
        };

        let mut total = 0;
        let mut roots = 0;
        let mut cur = min;
        loop {
            roots += 1;
            assert!(roots <= self.n, "root list does not close");
            assert_eq!(self.arena[cur].parent, None, "root with a parent");
            assert!(
                !self.key_less(cur, min),
                "cached minimum is not the smallest root"
            );
            let right = self.arena[cur].right;
            assert_eq!(self.arena[right].left, cur, "broken sibling links");
            total += self.check_tree(cur);
            cur = right;
            if cur == min {
                break;
            }
        }
        assert_eq!(total, self.n, "element count does not match the forest");
    }

    fn check_tree(&self, root: NodeIdx) -> usize {
        let mut size = 1;
        let degree = self.arena[root].degree;
        match self.arena[root].child {
            None => assert_eq!(degree, 0, "childless node with nonzero degree"),
            Some(first) => {
                assert!(degree > 0, "node with a child but zero degree");
                let mut child = first;
                for _ in 0..degree {
                    assert_eq!(self.arena[child].parent, Some(root), "wrong parent link");
                    assert!(!self.key_less(child, root), "heap order violated");
                    let right = self.arena[child].right;
                    assert_eq!(self.arena[right].left, child, "broken sibling links");
                    size += self.check_tree(child);
                    child = right;
                }
                assert_eq!(child, first, "child list length differs from degree");
            }
        }
        size
    }
}
