//! Serialized event records.

use hitcomb_algorithms::EventHits;
use hitcomb_core::error::Result as CoreResult;
use hitcomb_core::{pair_hits, DataError, PlacementTable, RecHitCollection, RecHitRef, SimHit};
use serde::{Deserialize, Serialize};

/// Input collections of one event as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Sim hits, hits of one track contiguous.
    pub sim_hits: Vec<SimHit>,
    /// Rec hits referenced by `sim_to_rec`.
    pub rec_hits: RecHitCollection,
    /// Rec hit produced from each sim hit (`null` when none).
    pub sim_to_rec: Vec<Option<RecHitRef>>,
    /// Readout errors recorded for the event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DataError>,
}

impl EventRecord {
    /// Borrows the collections in the form the combiner takes.
    #[must_use]
    pub fn hits(&self) -> EventHits<'_> {
        EventHits {
            sim_hits: &self.sim_hits,
            sim_to_rec: &self.sim_to_rec,
            rec_hits: &self.rec_hits,
        }
    }

    /// Checks that the map is aligned with the sim hits and that every
    /// reference resolves.
    ///
    /// # Errors
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> CoreResult<()> {
        for pair in pair_hits(&self.sim_hits, &self.sim_to_rec)? {
            if let Some(rec) = pair.rec {
                self.rec_hits.resolve(rec)?;
            }
        }
        Ok(())
    }
}

/// A file of events sharing one geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFile {
    /// Placement of every detector element referenced by the events.
    pub geometry: PlacementTable,
    /// Events in processing order.
    pub events: Vec<EventRecord>,
}

/// Counts over an event file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub events: usize,
    pub detectors: usize,
    pub sim_hits: usize,
    pub rec_hits: usize,
    pub unmatched_sim_hits: usize,
    pub readout_errors: usize,
}

impl EventFile {
    /// Summarizes the file contents.
    #[must_use]
    pub fn summary(&self) -> FileSummary {
        let mut summary = FileSummary {
            events: self.events.len(),
            detectors: self.geometry.len(),
            ..Default::default()
        };
        for event in &self.events {
            summary.sim_hits += event.sim_hits.len();
            summary.rec_hits += event.rec_hits.len();
            summary.unmatched_sim_hits += event.sim_to_rec.iter().filter(|r| r.is_none()).count();
            summary.readout_errors += event.errors.len();
        }
        summary
    }

    /// All readout errors of the file, ordered by reporting unit. Errors of
    /// the same unit keep their file order.
    #[must_use]
    pub fn readout_errors(&self) -> Vec<&DataError> {
        let mut errors: Vec<&DataError> = self.events.iter().flat_map(|e| &e.errors).collect();
        errors.sort_by_key(|error| error.fed_id());
        errors
    }
}
