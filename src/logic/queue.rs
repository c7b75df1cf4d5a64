//! Max-priority queue over `f64` priorities with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Secondary key for equal priorities; larger pops first.
pub trait TieRank {
    fn tie_rank(&self) -> usize {
        0
    }
}

struct Entry<T> {
    priority: f64,
    rank: usize,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Primary: higher priority first
        // Secondary: higher tie rank first
        // Tertiary: earlier insertion first
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.rank.cmp(&other.rank))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Binary-heap backed queue that pops the highest priority first. Equal
/// priorities fall back to [`TieRank`], then to insertion order, so popping
/// order is fully reproducible.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T: TieRank> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T, priority: f64) {
        let entry = Entry {
            priority,
            rank: item.tie_rank(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
