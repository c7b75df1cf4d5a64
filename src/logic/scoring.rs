//! Fairness scoring of full and partial slot assignments.
//!
//! A partial solution is a prefix of slots: `partial[s]` is the roster index
//! placed in slot `s`. `left` holds the roster indices not yet placed. Every
//! term that depends on an unplaced player is replaced by the best value any
//! of the `left` players could reach, so the returned `score` never
//! underestimates the best completion of the prefix.

use crate::logic::memory_table::PairingMemory;
use crate::logic::slots::{block_count, block_slots, player_pair, player_rivals, SLOTS_PER_MATCH};
use crate::models::Player;

/// Scores smaller than this are treated as ties.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Whether `candidate` beats `incumbent` by more than [`SCORE_EPSILON`].
pub fn improves(candidate: f64, incumbent: f64) -> bool {
    candidate > incumbent + SCORE_EPSILON
}

/// Dense per-search lookup of both memory tables, indexed by roster position.
/// Entry `(a, b)` is the score seen from `a`; guests zero every entry they touch.
#[derive(Clone, Debug)]
pub struct ScoreMatrix {
    size: usize,
    with: Vec<f64>,
    against: Vec<f64>,
}

impl ScoreMatrix {
    pub fn new(memory: &PairingMemory, players: &[Player]) -> Self {
        let size = players.len();
        let mut with = vec![0.0; size * size];
        let mut against = vec![0.0; size * size];
        for (a, pa) in players.iter().enumerate() {
            for (b, pb) in players.iter().enumerate() {
                if a == b {
                    continue;
                }
                let is_guest = pa.guest || pb.guest;
                with[a * size + b] = memory.play_with.get_score(&pa.id, &pb.id, is_guest);
                against[a * size + b] = memory.play_against.get_score(&pa.id, &pb.id, is_guest);
            }
        }
        Self { size, with, against }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn with_score(&self, a: usize, b: usize) -> f64 {
        self.with[a * self.size + b]
    }

    pub fn against_score(&self, a: usize, b: usize) -> f64 {
        self.against[a * self.size + b]
    }
}

/// Bound and confirmed score of a partial solution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight {
    /// Upper bound over every completion (exact once all slots are placed).
    pub score: f64,
    /// Exact score of the fully placed blocks only.
    pub partial_score: f64,
}

#[derive(Clone, Copy)]
enum Table {
    With,
    Against,
}

struct Frame<'a> {
    matrix: &'a ScoreMatrix,
    partial: &'a [usize],
    left: &'a [usize],
    /// Best teammate score of `left[k]` among the other unplaced players.
    open_with: Vec<f64>,
    /// Best opponent score of `left[k]` among the other unplaced players.
    open_against: Vec<f64>,
}

impl<'a> Frame<'a> {
    fn new(matrix: &'a ScoreMatrix, partial: &'a [usize], left: &'a [usize]) -> Self {
        let open = |table: Table| -> Vec<f64> {
            left.iter()
                .map(|&x| {
                    left.iter()
                        .filter(|&&y| y != x)
                        .map(|&y| Self::lookup(matrix, table, x, y))
                        .reduce(f64::max)
                        .unwrap_or(0.0)
                })
                .collect()
        };
        Self {
            matrix,
            partial,
            left,
            open_with: open(Table::With),
            open_against: open(Table::Against),
        }
    }

    fn lookup(matrix: &ScoreMatrix, table: Table, a: usize, b: usize) -> f64 {
        match table {
            Table::With => matrix.with_score(a, b),
            Table::Against => matrix.against_score(a, b),
        }
    }

    fn best_among_left(&self, table: Table, player: usize) -> f64 {
        self.left
            .iter()
            .map(|&y| Self::lookup(self.matrix, table, player, y))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Term for `player` against whoever sits in `other`; `open` bounds it
    /// while `other` is still empty.
    fn counterpart(&self, table: Table, player: usize, other: usize, open: impl FnOnce() -> f64) -> f64 {
        if other >= self.matrix.len() {
            return 0.0;
        }
        match self.partial.get(other) {
            Some(&o) => Self::lookup(self.matrix, table, player, o),
            None => open(),
        }
    }

    fn placed_slot(&self, slot: usize, player: usize) -> f64 {
        let [r1, r2] = player_rivals(slot);
        let with = self.counterpart(Table::With, player, player_pair(slot), || {
            self.best_among_left(Table::With, player)
        });
        let rival = |r: usize| {
            self.counterpart(Table::Against, player, r, || {
                self.best_among_left(Table::Against, player)
            })
        };
        with + rival(r1) + rival(r2)
    }

    /// Best any unplaced player could score in an empty slot.
    fn open_slot(&self, slot: usize) -> f64 {
        let [r1, r2] = player_rivals(slot);
        self.left
            .iter()
            .enumerate()
            .map(|(k, &x)| {
                self.counterpart(Table::With, x, player_pair(slot), || self.open_with[k])
                    + self.counterpart(Table::Against, x, r1, || self.open_against[k])
                    + self.counterpart(Table::Against, x, r2, || self.open_against[k])
            })
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    fn slot(&self, slot: usize) -> f64 {
        match self.partial.get(slot) {
            Some(&player) => self.placed_slot(slot, player),
            None => self.open_slot(slot),
        }
    }

    fn block(&self, block: usize) -> f64 {
        block_slots(block)
            .filter(|&s| s < self.matrix.len())
            .map(|s| self.slot(s))
            .sum()
    }
}

/// Score of one slot: teammate term plus both rival terms. Unplaced
/// counterparts are bounded by the best of `left`.
pub fn score_player(matrix: &ScoreMatrix, partial: &[usize], slot: usize, left: &[usize]) -> f64 {
    Frame::new(matrix, partial, left).slot(slot)
}

/// Sum of [`score_player`] over the four slots of match block `block`.
pub fn score_match(matrix: &ScoreMatrix, partial: &[usize], block: usize, left: &[usize]) -> f64 {
    Frame::new(matrix, partial, left).block(block)
}

/// Bound over all blocks plus the exact score of the completed ones.
pub fn estimate_partial_solution_weight(
    matrix: &ScoreMatrix,
    partial: &[usize],
    left: &[usize],
) -> Weight {
    let frame = Frame::new(matrix, partial, left);
    let full_blocks = partial.len() / SLOTS_PER_MATCH;
    let mut score = 0.0;
    let mut partial_score = 0.0;
    for block in 0..block_count(matrix.len()) {
        let block_score = frame.block(block);
        score += block_score;
        if block < full_blocks {
            partial_score += block_score;
        }
    }
    Weight {
        score,
        partial_score,
    }
}

/// Exact score of a complete assignment.
pub fn solution_score(matrix: &ScoreMatrix, solution: &[usize]) -> f64 {
    estimate_partial_solution_weight(matrix, solution, &[]).score
}
