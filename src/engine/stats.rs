//! Token stream statistics.
//!
//! Every category keeps a `divisor`, the number of occurrences. A divisor of
//! zero means the category never occurred, which is reported differently from
//! a category whose average happens to be zero.

/// Min / max / total over one kind of run length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub min: u32,
    pub max: u32,
    pub total: u64,
    pub divisor: u32,
}

impl RunStats {
    pub fn record(&mut self, value: u32) {
        if self.divisor == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.total += u64::from(value);
        self.divisor += 1;
    }

    /// `total / divisor`, truncated; `None` when the category never occurred.
    pub fn average(&self) -> Option<u64> {
        (self.divisor > 0).then(|| self.total / u64::from(self.divisor))
    }

    pub fn merge(&mut self, other: &RunStats) {
        if other.divisor == 0 {
            return;
        }
        if self.divisor == 0 {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.total += other.total;
        self.divisor += other.divisor;
    }
}

/// Offsets and lengths of match tokens. Both are recorded per match, so they
/// share one divisor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub min_offset: u32,
    pub max_offset: u32,
    pub total_offsets: u64,
    pub min_len: u32,
    pub max_len: u32,
    pub total_lens: u64,
    /// Matches reusing the offset of the match before them.
    pub rep_offsets: u32,
    pub divisor: u32,
}

impl MatchStats {
    pub fn record(&mut self, offset: u32, len: u32, repeated: bool) {
        if self.divisor == 0 {
            self.min_offset = offset;
            self.max_offset = offset;
            self.min_len = len;
            self.max_len = len;
        } else {
            self.min_offset = self.min_offset.min(offset);
            self.max_offset = self.max_offset.max(offset);
            self.min_len = self.min_len.min(len);
            self.max_len = self.max_len.max(len);
        }
        self.total_offsets += u64::from(offset);
        self.total_lens += u64::from(len);
        if repeated {
            self.rep_offsets += 1;
        }
        self.divisor += 1;
    }

    pub fn average_offset(&self) -> Option<u64> {
        (self.divisor > 0).then(|| self.total_offsets / u64::from(self.divisor))
    }

    pub fn average_len(&self) -> Option<u64> {
        (self.divisor > 0).then(|| self.total_lens / u64::from(self.divisor))
    }

    pub fn merge(&mut self, other: &MatchStats) {
        if other.divisor == 0 {
            return;
        }
        if self.divisor == 0 {
            *self = *other;
            return;
        }
        self.min_offset = self.min_offset.min(other.min_offset);
        self.max_offset = self.max_offset.max(other.max_offset);
        self.total_offsets += other.total_offsets;
        self.min_len = self.min_len.min(other.min_len);
        self.max_len = self.max_len.max(other.max_len);
        self.total_lens += other.total_lens;
        self.rep_offsets += other.rep_offsets;
        self.divisor += other.divisor;
    }
}

/// Statistics over the whole generated token stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStats {
    /// Lengths of non-empty literal runs.
    pub literals: RunStats,
    pub matches: MatchStats,
    /// Lengths of matches at offset 1 (single-byte runs).
    pub rle1: RunStats,
    /// Lengths of matches at offset 2 (two-byte pattern runs).
    pub rle2: RunStats,
}

impl TokenStats {
    pub fn merge(&mut self, other: &TokenStats) {
        self.literals.merge(&other.literals);
        self.matches.merge(&other.matches);
        self.rle1.merge(&other.rle1);
        self.rle2.merge(&other.rle2);
    }
}
