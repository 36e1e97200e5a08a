//! A mergeable priority queue built on a Fibonacci heap.
//!
//! The queue is a forest of heap-ordered multi-way trees whose roots are
//! linked in a circular doubly linked list, with the minimum root cached.
//! Insertion and merging are lazy: new elements and absorbed queues join the
//! root list directly, and the work of rebuilding a bounded-degree forest is
//! deferred to the next extraction (consolidation). That laziness is what
//! buys the constant-time insert and merge.
//!
//! Nodes live in an index-addressed arena owned by the queue, so the
//! structure contains no reference cycles and no unsafe pointer juggling.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert` | O(1) |
//! | `find_min` | O(1) |
//! | `merge` | O(1) root-list splice |
//! | `extract_min` | O(log n) amortized |
//! | `find_second` / `extract_second` | O(log n) amortized |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_pqueue::PQueue;
//!
//! let mut queue: PQueue<i32> = [3, 1, 4, 1, 5].into_iter().collect();
//! assert_eq!(queue.find_min(), Ok(&1));
//! assert_eq!(queue.extract_min(), Ok(1));
//! assert_eq!(queue.len(), 4);
//! ```
//!
//! The ordering is supplied at construction. The default requires `K: Ord`
//! and orders ascending; any strict predicate works in its place:
//!
//! ```rust
//! use fibonacci_pqueue::PQueue;
//!
//! let mut queue = PQueue::with_comparator(|a: &i32, b: &i32| a > b);
//! queue.insert(3);
//! queue.insert(7);
//! assert_eq!(queue.find_min(), Ok(&7));
//! ```

mod arena;
pub mod pqueue;

pub use pqueue::{EmptyQueueError, PQueue};
