//! hitcomb-algorithms: Rec-hit combination for fast tracking simulation.
//!
//! This crate groups the rec hits of every simulated track into one
//! combination and attaches fake rec hits from other tracks that were
//! reconstructed within a fixed radius of the track's sim hits:
//! - **Combiner** - per-track grouping with a minimum size threshold
//! - **Matching** - strict distance test for fake candidates
//! - **Processing** - sequential driver over many events
//!
#![warn(missing_docs)]

mod combiner;
pub mod matching;
mod processing;
mod statistics;

pub use combiner::{
    CombinerConfig, CombinerState, DuplicatePolicy, HitCombiner, DEFAULT_MATCH_RADIUS,
};
pub use matching::FakeMatcher;
pub use processing::{combine_event, combine_events, CombinedEvents, EventHits};
pub use statistics::CombinationStatistics;

// Re-export the core types the combiner works on
pub use hitcomb_core::{Combination, RecHitRef};
