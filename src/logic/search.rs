//! Best-first branch-and-bound over slot assignments.
//!
//! Nodes are prefixes of the final slot array. A child extends its parent by
//! one roster index; it is queued only when its bound beats the incumbent, and
//! the frontier pops the node with the best confirmed (fully placed blocks)
//! score first.

use crate::config::SearchLimits;
use crate::logic::memory_table::PairingMemory;
use crate::logic::ordering::regular_block_count;
use crate::logic::queue::{PriorityQueue, TieRank};
use crate::logic::scoring::{estimate_partial_solution_weight, improves, solution_score, ScoreMatrix};
use crate::logic::slots::SLOTS_PER_MATCH;
use crate::models::Player;
use std::time::Instant;

/// One search node. Never mutated after it is queued.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeItem {
    /// Roster index placed in each filled slot.
    pub solution: Vec<usize>,
    /// Roster indices still to place.
    pub elements: Vec<usize>,
    /// Upper bound over every completion.
    pub score: f64,
    /// Exact score of the completed blocks; frontier ordering key.
    pub partial_score: f64,
}

impl TieRank for NodeItem {
    /// Deeper nodes first among equal confirmed scores.
    fn tie_rank(&self) -> usize {
        self.solution.len()
    }
}

/// Result of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Slot -> roster index permutation.
    pub solution: Vec<usize>,
    pub score: f64,
    pub expanded: u64,
    /// False when a limit stopped the search before the frontier emptied.
    pub exhausted: bool,
}

/// Per-search state shared by all expansions.
pub struct SearchContext {
    matrix: ScoreMatrix,
    is_guest: Vec<bool>,
    /// Leading slots reserved for regulars.
    regular_slots: usize,
}

impl SearchContext {
    pub fn new(players: &[Player], memory: &PairingMemory) -> Self {
        Self {
            matrix: ScoreMatrix::new(memory, players),
            is_guest: players.iter().map(|p| p.guest).collect(),
            regular_slots: regular_block_count(players) * SLOTS_PER_MATCH,
        }
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    /// Whether roster index `candidate` may take the next slot after `filled` slots.
    fn accepts(&self, filled: usize, candidate: usize) -> bool {
        filled >= self.regular_slots || !self.is_guest[candidate]
    }
}

/// Queue every child of (`partial`, `elements`) whose bound beats `max_score`.
/// Returns the number of children queued.
pub fn expand(
    queue: &mut PriorityQueue<NodeItem>,
    ctx: &SearchContext,
    partial: &[usize],
    elements: &[usize],
    max_score: f64,
) -> usize {
    let mut queued = 0;
    for (i, &candidate) in elements.iter().enumerate() {
        if !ctx.accepts(partial.len(), candidate) {
            continue;
        }
        let mut solution = Vec::with_capacity(partial.len() + 1);
        solution.extend_from_slice(partial);
        solution.push(candidate);
        let left: Vec<usize> = elements[..i]
            .iter()
            .chain(&elements[i + 1..])
            .copied()
            .collect();
        let weight = estimate_partial_solution_weight(&ctx.matrix, &solution, &left);
        if improves(weight.score, max_score) {
            queue.push(
                NodeItem {
                    solution,
                    elements: left,
                    score: weight.score,
                    partial_score: weight.partial_score,
                },
                weight.partial_score,
            );
            queued += 1;
        }
    }
    queued
}

/// Search the best slot assignment of `players`.
///
/// `seed` is the starting incumbent and must be a permutation of
/// `0..players.len()`; `None`, or a seed that is not such a permutation,
/// means roster order. The seed is returned unchanged when nothing beats it,
/// so the result is always a complete permutation.
pub fn generate_matching(
    players: &[Player],
    seed: Option<&[usize]>,
    memory: &PairingMemory,
    limits: &SearchLimits,
) -> SearchOutcome {
    let ctx = SearchContext::new(players, memory);
    let mut final_solution: Vec<usize> = match seed {
        Some(s) if is_permutation(s, players.len()) => s.to_vec(),
        Some(s) => {
            log::warn!("Ignoring seed {:?}: not a permutation of {} players", s, players.len());
            (0..players.len()).collect()
        }
        None => (0..players.len()).collect(),
    };
    let mut max_score = solution_score(&ctx.matrix, &final_solution);
    let seed_score = max_score;

    let started = Instant::now();
    let time_limit = limits.time_limit();
    let mut queue = PriorityQueue::new();
    let elements: Vec<usize> = (0..players.len()).collect();
    expand(&mut queue, &ctx, &[], &elements, max_score);
    let mut expanded: u64 = 1;
    let mut exhausted = true;

    while let Some(node) = queue.pop() {
        if node.elements.is_empty() {
            if improves(node.score, max_score) {
                max_score = node.score;
                final_solution = node.solution;
            }
            continue;
        }
        if !exhausted || !improves(node.score, max_score) {
            // Out of budget: only drain complete assignments already queued.
            continue;
        }
        let over_budget = limits.max_expansions.is_some_and(|cap| expanded >= cap)
            || time_limit.is_some_and(|limit| started.elapsed() >= limit);
        if over_budget {
            exhausted = false;
            continue;
        }
        expand(&mut queue, &ctx, &node.solution, &node.elements, max_score);
        expanded += 1;
    }

    if exhausted {
        log::debug!(
            "Search over {} players: {} expansions, score {:.3} (seed {:.3})",
            players.len(),
            expanded,
            max_score,
            seed_score
        );
    } else {
        log::warn!(
            "Search over {} players stopped after {} expansions, keeping score {:.3}",
            players.len(),
            expanded,
            max_score
        );
    }

    SearchOutcome {
        solution: final_solution,
        score: max_score,
        expanded,
        exhausted,
    }
}

/// Whether `solution` uses every index in `0..n` exactly once.
pub fn is_permutation(solution: &[usize], n: usize) -> bool {
    let mut seen = vec![false; n];
    solution.len() == n
        && solution
            .iter()
            .all(|&i| i < n && !std::mem::replace(&mut seen[i], true))
}
