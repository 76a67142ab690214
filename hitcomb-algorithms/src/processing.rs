//! Multi-event driver.
//!
//! Events are combined one after another. The accumulator is cleared at the
//! start of every event; only the read-only geometry and the running
//! statistics carry over.

use crate::combiner::HitCombiner;
use crate::statistics::CombinationStatistics;
use hitcomb_core::combination::Combination;
use hitcomb_core::error::Result;
use hitcomb_core::geometry::TrackerGeometry;
use hitcomb_core::hit::{RecHitCollection, RecHitRef, SimHit};
use log::info;

/// Borrowed input collections of one event.
#[derive(Clone, Copy, Debug)]
pub struct EventHits<'a> {
    /// Sim hits ordered so that hits of one track are contiguous.
    pub sim_hits: &'a [SimHit],
    /// Rec hit produced from each sim hit, index aligned with `sim_hits`.
    pub sim_to_rec: &'a [Option<RecHitRef>],
    /// Storage the references point into.
    pub rec_hits: &'a RecHitCollection,
}

/// Combinations of a sequence of events.
#[derive(Clone, Debug, Default)]
pub struct CombinedEvents {
    /// Per-event output, in input order.
    pub events: Vec<Vec<Combination>>,
    /// Statistics over all events.
    pub statistics: CombinationStatistics,
}

impl CombinedEvents {
    /// Total number of combinations over all events.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.events.iter().map(Vec::len).sum()
    }
}

/// Combines the hits of one event with a fresh state.
///
/// # Errors
/// See [`HitCombiner::combine`].
pub fn combine_event<G: TrackerGeometry>(
    combiner: &HitCombiner,
    event: EventHits<'_>,
    geometry: &G,
) -> Result<Vec<Combination>> {
    let mut state = combiner.create_state();
    combiner.combine(
        event.sim_hits,
        event.sim_to_rec,
        event.rec_hits,
        geometry,
        &mut state,
    )
}

/// Combines a sequence of events in order.
///
/// # Errors
/// Stops at the first failing event and returns its error wrapped with the
/// event's index.
pub fn combine_events<'a, I, G>(
    combiner: &HitCombiner,
    events: I,
    geometry: &G,
) -> Result<CombinedEvents>
where
    I: IntoIterator<Item = EventHits<'a>>,
    G: TrackerGeometry,
{
    let mut state = combiner.create_state();
    let mut combined = CombinedEvents::default();

    for (index, event) in events.into_iter().enumerate() {
        let output = combiner
            .combine(
                event.sim_hits,
                event.sim_to_rec,
                event.rec_hits,
                geometry,
                &mut state,
            )
            .map_err(|err| err.in_event(index))?;
        combined.events.push(output);
    }

    combined.statistics = state.statistics();
    info!(
        "combined {} events: {} combinations kept, {} rejected, {} fakes",
        combined.statistics.events_processed,
        combined.statistics.combinations_kept,
        combined.statistics.combinations_rejected,
        combined.statistics.fake_hits
    );
    Ok(combined)
}
