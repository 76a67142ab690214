//! Combination statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected while combining hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombinationStatistics {
    /// Number of events processed.
    pub events_processed: usize,
    /// Number of sim hits processed.
    pub sim_hits_processed: usize,
    /// Number of maximal runs of equal track id seen.
    pub track_groups: usize,
    /// Groups that met the size threshold.
    pub combinations_kept: usize,
    /// Groups dropped for being too small.
    pub combinations_rejected: usize,
    /// True rec hits appended (one per non-null reference).
    pub true_hits: usize,
    /// Fake rec hits appended, duplicates included.
    pub fake_hits: usize,
    /// Fakes not appended because they were already in the combination.
    pub duplicate_fakes_skipped: usize,
}

impl CombinationStatistics {
    /// Adds the counters of `other` to these.
    pub fn merge(&mut self, other: &Self) {
        self.events_processed += other.events_processed;
        self.sim_hits_processed += other.sim_hits_processed;
        self.track_groups += other.track_groups;
        self.combinations_kept += other.combinations_kept;
        self.combinations_rejected += other.combinations_rejected;
        self.true_hits += other.true_hits;
        self.fake_hits += other.fake_hits;
        self.duplicate_fakes_skipped += other.duplicate_fakes_skipped;
    }

    /// Fraction of appended hits that are fakes, or 0 if nothing was appended.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fake_fraction(&self) -> f64 {
        let total = self.true_hits + self.fake_hits;
        if total == 0 {
            0.0
        } else {
            self.fake_hits as f64 / total as f64
        }
    }
}
