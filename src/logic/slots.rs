//! Slot geometry. Every 4 consecutive slots form one match:
//! `[drive local, reverse local, drive visitor, reverse visitor]`.

use std::ops::Range;

pub const SLOTS_PER_MATCH: usize = 4;

/// Slots of match block `block`.
pub fn block_slots(block: usize) -> Range<usize> {
    let min = block * SLOTS_PER_MATCH;
    min..min + SLOTS_PER_MATCH
}

/// Number of match blocks for `players` slots.
pub fn block_count(players: usize) -> usize {
    players.div_ceil(SLOTS_PER_MATCH)
}

/// Teammate slot.
pub fn player_pair(slot: usize) -> usize {
    slot ^ 1
}

/// The two slots of the opposing team in the same block.
pub fn player_rivals(slot: usize) -> [usize; 2] {
    let pair_index = slot / 2;
    let rival_pair_index = if pair_index % 2 == 0 {
        pair_index + 1
    } else {
        pair_index - 1
    };
    [rival_pair_index * 2, rival_pair_index * 2 + 1]
}
