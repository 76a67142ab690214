//! Per-track rec-hit combination.
//!
//! Walks the sim hits of one event in order. Consecutive sim hits with the
//! same track id form a track group; every group yields one [`Combination`]
//! holding the rec hits produced from the group's sim hits plus the fake rec
//! hits of other tracks that were reconstructed close to them.
//!
//! # Complexity
//!
//! For every sim hit the fake scan covers the whole remaining suffix of the
//! event, past the end of the hit's own group, so fakes from any later track
//! are found. Cost is therefore O(n²) in the number of sim hits of the event,
//! not in the size of a single group. Keep event sizes bounded accordingly.

use crate::matching::FakeMatcher;
use crate::statistics::CombinationStatistics;
use hitcomb_core::combination::Combination;
use hitcomb_core::error::{Error, Result};
use hitcomb_core::geometry::TrackerGeometry;
use hitcomb_core::hit::{pair_hits, HitPair, RecHitCollection, RecHitRef, SimHit};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default fake match radius in centimetres.
pub const DEFAULT_MATCH_RADIUS: f64 = 0.1;

/// What to do with a fake rec hit that is already in the combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Append it again. A fake matched from several sim hits of the same
    /// track appears once per match.
    #[default]
    Keep,
    /// Append each fake at most once per combination.
    Skip,
}

/// Hit combiner configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombinerConfig {
    /// Minimum number of rec hits for a combination to be kept.
    pub min_hits: usize,
    /// Fakes strictly closer than this to a sim hit are matched (cm).
    pub match_radius: f64,
    /// Handling of fakes already present in the combination.
    pub duplicate_fakes: DuplicatePolicy,
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            min_hits: 1,
            match_radius: DEFAULT_MATCH_RADIUS,
            duplicate_fakes: DuplicatePolicy::Keep,
        }
    }
}

impl CombinerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum combination size.
    #[must_use]
    pub fn with_min_hits(mut self, min_hits: usize) -> Self {
        self.min_hits = min_hits;
        self
    }

    /// Sets the fake match radius.
    #[must_use]
    pub fn with_match_radius(mut self, radius: f64) -> Self {
        self.match_radius = radius;
        self
    }

    /// Sets the duplicate fake policy.
    #[must_use]
    pub fn with_duplicate_fakes(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_fakes = policy;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the match radius is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.match_radius.is_finite() || self.match_radius < 0.0 {
            return Err(Error::Config(format!(
                "match radius must be finite and non-negative, got {}",
                self.match_radius
            )));
        }
        Ok(())
    }
}

/// Reusable state for [`HitCombiner`].
///
/// Holds the combination being built and the statistics accumulated over
/// every call made with this state. Each caller owns its state, so one
/// combiner can serve several callers.
#[derive(Debug, Default)]
pub struct CombinerState {
    current: Combination,
    stats: CombinationStatistics,
}

impl CombinerState {
    /// Clears the accumulator and the statistics.
    pub fn reset(&mut self) {
        self.current.clear();
        self.stats = CombinationStatistics::default();
    }

    /// Statistics accumulated since creation or the last reset.
    #[must_use]
    pub fn statistics(&self) -> CombinationStatistics {
        self.stats
    }
}

/// Builds one rec-hit combination per sim track.
#[derive(Clone, Debug, Default)]
pub struct HitCombiner {
    config: CombinerConfig,
    matcher: FakeMatcher,
}

impl HitCombiner {
    /// Creates a combiner without validating the configuration.
    #[must_use]
    pub fn new(config: CombinerConfig) -> Self {
        let matcher = FakeMatcher::new(config.match_radius);
        Self { config, matcher }
    }

    /// Creates a combiner after validating the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn try_new(config: CombinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CombinerConfig {
        &self.config
    }

    /// Creates a fresh state.
    #[must_use]
    pub fn create_state(&self) -> CombinerState {
        CombinerState::default()
    }

    /// Combines the hits of one event.
    ///
    /// `sim_to_rec[i]` is the rec hit produced from `sim_hits[i]`, if any;
    /// both references point into `rec_hits`. Combinations are returned in
    /// order of first appearance of their track group.
    ///
    /// # Errors
    /// Returns an error if the two sequences differ in length, if a sim hit
    /// sits on a detector element unknown to `geometry`, or if a reference
    /// does not resolve in `rec_hits`. No combinations are returned then.
    pub fn combine<G: TrackerGeometry>(
        &self,
        sim_hits: &[SimHit],
        sim_to_rec: &[Option<RecHitRef>],
        rec_hits: &RecHitCollection,
        geometry: &G,
        state: &mut CombinerState,
    ) -> Result<Vec<Combination>> {
        let pairs = pair_hits(sim_hits, sim_to_rec)?;
        self.combine_pairs(&pairs, rec_hits, geometry, state)
    }

    /// Combines already paired hits of one event.
    ///
    /// # Errors
    /// See [`HitCombiner::combine`].
    pub fn combine_pairs<G: TrackerGeometry>(
        &self,
        pairs: &[HitPair<'_>],
        rec_hits: &RecHitCollection,
        geometry: &G,
        state: &mut CombinerState,
    ) -> Result<Vec<Combination>> {
        let mut stats = CombinationStatistics {
            events_processed: 1,
            ..Default::default()
        };
        let mut output = Vec::new();
        let current = &mut state.current;
        current.clear();

        for (i, pair) in pairs.iter().enumerate() {
            let sim = pair.sim;
            let sim_global = geometry.to_global(sim.det_id, sim.local_position)?;

            if let Some(rec) = pair.rec {
                rec_hits.resolve(rec)?;
                current.push(rec);
                stats.true_hits += 1;
            }

            self.matcher
                .scan(pair, &sim_global, &pairs[i..], rec_hits, |fake| {
                    if self.config.duplicate_fakes == DuplicatePolicy::Skip
                        && current.contains(fake)
                    {
                        stats.duplicate_fakes_skipped += 1;
                    } else {
                        current.push(fake);
                        stats.fake_hits += 1;
                    }
                })?;

            let group_ends = pairs
                .get(i + 1)
                .is_none_or(|next| next.track_id() != pair.track_id());
            if group_ends {
                stats.track_groups += 1;
                if current.len() >= self.config.min_hits {
                    let mut combination = current.clone();
                    combination.shrink_to_fit();
                    output.push(combination);
                    stats.combinations_kept += 1;
                } else {
                    trace!(
                        "dropping combination of track {} with {} hits (min {})",
                        pair.track_id(),
                        current.len(),
                        self.config.min_hits
                    );
                    stats.combinations_rejected += 1;
                }
                current.clear();
            }
        }

        stats.sim_hits_processed = pairs.len();
        debug!(
            "combined {} sim hits into {} combinations ({} groups, {} fakes)",
            stats.sim_hits_processed, stats.combinations_kept, stats.track_groups, stats.fake_hits
        );
        state.stats.merge(&stats);
        Ok(output)
    }
}
