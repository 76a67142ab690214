//! Error types for hitcomb-core.

use crate::geometry::DetId;
use crate::hit::RecHitRef;
use thiserror::Error;

/// Result type alias for hitcomb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for hitcomb operations.
///
/// Every variant is a precondition violation on the event being processed.
/// None of them is retried: the caller gets the error and no partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The sim-hit sequence and the sim-to-rec map are not index aligned.
    #[error("sim hits and rec-hit map differ in length: {sim_hits} sim hits, {rec_refs} references")]
    LengthMismatch { sim_hits: usize, rec_refs: usize },

    /// The geometry has no element for this detector id.
    #[error("unknown detector element: {0}")]
    UnknownDetector(DetId),

    /// A rec-hit reference points outside its collection.
    #[error("rec-hit reference {reference} out of range for collection of {len} hits")]
    DanglingRecHit { reference: RecHitRef, len: usize },

    /// A rec-hit collection cannot address another hit.
    #[error("rec-hit collection is full at {len} hits")]
    CollectionFull { len: usize },

    /// Error raised while processing one event of a sequence.
    #[error("event {index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wraps this error with the index of the event it was raised for.
    #[must_use]
    pub fn in_event(self, index: usize) -> Self {
        Self::Event {
            index,
            source: Box::new(self),
        }
    }
}
