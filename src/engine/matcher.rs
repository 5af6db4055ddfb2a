//! Hash-chain match finder.
//!
//! Positions are absolute indices into one contiguous window (dictionary
//! tail followed by the input). Each position is hashed over its first
//! `hash_len` bytes; the hash table holds the most recent position per hash
//! and a 64 Ki-entry chain table holds, for every position, the distance back
//! to the previous position with the same hash. Chains are walked newest
//! first, so a walk stops as soon as the distance exceeds [`MAX_OFFSET`].
//!
//! [`MatchFinder::insert`] must have been called up to (not including) the
//! position being searched; [`MatchFinder::find`] does that itself.

use crate::config::MAX_OFFSET;

pub const HASH_LOG: u32 = 16;
pub const HASH_TABLE_SIZE: usize = 1 << HASH_LOG;

/// Chain table covers exactly the reachable window.
pub const CHAIN_SIZE: usize = MAX_OFFSET;
const CHAIN_MASK: usize = CHAIN_SIZE - 1;

/// Longest match a single command can encode.
pub const MAX_MATCH_LEN: usize = 0xFFFF;

const EMPTY: u32 = u32::MAX;

/// A back-reference: copy `len` bytes from `offset` bytes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub offset: usize,
    pub len: usize,
}

pub struct MatchFinder {
    hash_table: Vec<u32>,
    chain_table: Vec<u16>,
    next_to_update: usize,
    hash_len: usize,
    min_match: usize,
    max_attempts: usize,
}

impl MatchFinder {
    /// Creates an empty finder. Returns `None` if the tables cannot be
    /// allocated.
    pub fn new(min_match: usize, max_attempts: usize) -> Option<Self> {
        let mut hash_table = Vec::new();
        hash_table.try_reserve_exact(HASH_TABLE_SIZE).ok()?;
        hash_table.resize(HASH_TABLE_SIZE, EMPTY);
        let mut chain_table = Vec::new();
        chain_table.try_reserve_exact(CHAIN_SIZE).ok()?;
        chain_table.resize(CHAIN_SIZE, 0u16);
        Some(MatchFinder {
            hash_table,
            chain_table,
            next_to_update: 0,
            hash_len: min_match.min(3),
            min_match,
            max_attempts,
        })
    }

    #[inline]
    fn hash_at(&self, data: &[u8], pos: usize) -> usize {
        let mut v = u32::from(data[pos]) | u32::from(data[pos + 1]) << 8;
        if self.hash_len > 2 {
            v |= u32::from(data[pos + 2]) << 16;
        }
        (v.wrapping_mul(2_654_435_761) >> (32 - HASH_LOG)) as usize
    }

    /// Registers every position in `[next_to_update, target)` that has
    /// `hash_len` bytes available.
    pub fn insert(&mut self, data: &[u8], target: usize) {
        let last_hashable = data.len().saturating_sub(self.hash_len - 1);
        let end = target.min(last_hashable);
        while self.next_to_update < end {
            let idx = self.next_to_update;
            let h = self.hash_at(data, idx);
            let prev = self.hash_table[h];
            let delta = if prev == EMPTY {
                0
            } else {
                (idx - prev as usize).min(CHAIN_MASK)
            };
            self.chain_table[idx & CHAIN_MASK] = delta as u16;
            self.hash_table[h] = idx as u32;
            self.next_to_update += 1;
        }
        self.next_to_update = self.next_to_update.max(target);
    }

    /// Longest match for `pos` that ends at or before `limit`, or `None` if
    /// nothing reaches `min_match`. Ties go to the nearest candidate.
    pub fn find(&mut self, data: &[u8], pos: usize, limit: usize) -> Option<Match> {
        let max_len = (limit - pos).min(MAX_MATCH_LEN);
        if max_len < self.min_match || pos + self.hash_len > data.len() {
            self.insert(data, pos);
            return None;
        }
        self.insert(data, pos);

        let mut best: Option<Match> = None;
        let head = self.hash_table[self.hash_at(data, pos)];
        if head == EMPTY {
            return None;
        }
        let mut candidate = head as usize;
        let mut attempts = self.max_attempts;
        while attempts > 0 && candidate < pos {
            let offset = pos - candidate;
            if offset > MAX_OFFSET {
                break;
            }
            let best_len = best.map_or(self.min_match - 1, |m| m.len);
            if data[candidate + best_len.min(max_len - 1)] == data[pos + best_len.min(max_len - 1)] {
                let len = count_match(data, candidate, pos, pos + max_len);
                if len > best_len {
                    best = Some(Match { offset, len });
                    if len == max_len {
                        break;
                    }
                }
            }
            let delta = self.chain_table[candidate & CHAIN_MASK] as usize;
            if delta == 0 || delta > candidate {
                break;
            }
            candidate -= delta;
            attempts -= 1;
        }
        best
    }
}

/// Number of equal bytes at `a` and `b`, stopping before `b` reaches `limit`.
/// `a` may overlap the bytes being matched (`a < b`).
#[inline]
pub fn count_match(data: &[u8], a: usize, b: usize, limit: usize) -> usize {
    let mut n = 0;
    while b + n < limit && data[a + n] == data[b + n] {
        n += 1;
    }
    n
}
