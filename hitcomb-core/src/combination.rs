//! Rec-hit combinations.

use crate::hit::RecHitRef;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rec hits associated with one simulated track.
///
/// Holds the hits produced from the track itself plus any fake hits from
/// other tracks that were matched to it, in insertion order. The same
/// reference may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Combination {
    hits: Vec<RecHitRef>,
}

impl Combination {
    /// Creates an empty combination.
    #[must_use]
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    /// Creates a combination with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
        }
    }

    /// Appends a hit.
    pub fn push(&mut self, hit: RecHitRef) {
        self.hits.push(hit);
    }

    /// Returns the number of hits, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if the combination is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns true if `hit` is already part of the combination.
    #[must_use]
    pub fn contains(&self, hit: RecHitRef) -> bool {
        self.hits.contains(&hit)
    }

    /// Returns the hits as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[RecHitRef] {
        &self.hits
    }

    /// Returns an iterator over the hits.
    pub fn iter(&self) -> impl Iterator<Item = &RecHitRef> {
        self.hits.iter()
    }

    /// Releases spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.hits.shrink_to_fit();
    }

    /// Removes every hit, keeping the allocation.
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Returns the number of hits the combination can hold without
    /// reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.hits.capacity()
    }
}

impl FromIterator<RecHitRef> for Combination {
    fn from_iter<I: IntoIterator<Item = RecHitRef>>(iter: I) -> Self {
        Self {
            hits: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Combination {
    type Item = &'a RecHitRef;
    type IntoIter = std::slice::Iter<'a, RecHitRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}
