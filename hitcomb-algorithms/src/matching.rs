//! Fake-hit matching.
//!
//! A rec hit produced by another track is a fake candidate for a sim hit
//! when it lies strictly closer than the match radius to the sim hit's
//! global position.

use crate::combiner::DEFAULT_MATCH_RADIUS;
use hitcomb_core::error::Result;
use hitcomb_core::geometry::GlobalPoint;
use hitcomb_core::hit::{HitPair, RecHitCollection, RecHitRef};

/// Distance-based fake matcher.
#[derive(Clone, Copy, Debug)]
pub struct FakeMatcher {
    radius: f64,
}

impl FakeMatcher {
    /// Creates a matcher with the given radius (global units).
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Returns the match radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns true if `candidate` is strictly within the radius of `sim`.
    #[inline]
    #[must_use]
    pub fn is_match(&self, sim: &GlobalPoint, candidate: &GlobalPoint) -> bool {
        sim.distance(candidate) < self.radius
    }

    /// Scans `window` for rec hits from other tracks that match `sim_global`.
    ///
    /// `trigger` is the pair whose sim hit is being matched; pairs of the
    /// same track, null references and references equal to the trigger's own
    /// rec hit are skipped. Matches are handed to `accept` in window order.
    ///
    /// # Errors
    /// Returns an error if a candidate reference does not resolve in
    /// `rec_hits`.
    pub fn scan<F>(
        &self,
        trigger: &HitPair<'_>,
        sim_global: &GlobalPoint,
        window: &[HitPair<'_>],
        rec_hits: &RecHitCollection,
        mut accept: F,
    ) -> Result<()>
    where
        F: FnMut(RecHitRef),
    {
        for candidate in window {
            if candidate.track_id() == trigger.track_id() {
                continue;
            }
            let Some(fake) = candidate.rec else {
                continue;
            };
            if Some(fake) == trigger.rec {
                continue;
            }
            let fake_hit = rec_hits.resolve(fake)?;
            if self.is_match(sim_global, &fake_hit.global_position) {
                accept(fake);
            }
        }
        Ok(())
    }
}

impl Default for FakeMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_RADIUS)
    }
}
